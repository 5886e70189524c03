use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = download_sorter::cli::parse();
    app::run(args)
}
