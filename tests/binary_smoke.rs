use assert_cmd::cargo;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn bin() -> Command {
    Command::new(cargo::cargo_bin!("download_sorter"))
}

#[test]
fn print_config_with_explicit_path() {
    let out = bin()
        .args(["--print-config", "--config", "/tmp/some/config.xml"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("/tmp/some/config.xml"));
}

#[test]
fn once_sorts_and_exits() {
    let td = tempdir().unwrap();
    let root = td.path();
    let src = root.join("Downloads");
    let names = ["img", "vid", "sfx", "music", "doc"];
    for d in std::iter::once(&"Downloads").chain(names.iter()) {
        fs::create_dir_all(root.join(d)).unwrap();
    }
    fs::write(src.join("holiday.png"), b"png").unwrap();
    fs::write(src.join("notes.pdf"), b"pdf").unwrap();
    fs::write(src.join("setup.exe"), b"exe").unwrap();

    let cfg = root.join("config.xml");
    fs::write(
        &cfg,
        format!(
            "<config><source_dir>{}</source_dir><image_dir>{}</image_dir><video_dir>{}</video_dir><sfx_dir>{}</sfx_dir><music_dir>{}</music_dir><document_dir>{}</document_dir><log_level>quiet</log_level></config>",
            src.display(),
            root.join("img").display(),
            root.join("vid").display(),
            root.join("sfx").display(),
            root.join("music").display(),
            root.join("doc").display(),
        ),
    )
    .unwrap();

    let out = bin()
        .arg("--config")
        .arg(&cfg)
        .arg("--once")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(root.join("img").join("holiday.png").exists());
    assert!(root.join("doc").join("notes.pdf").exists());
    assert!(src.join("setup.exe").exists());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("2 moved"), "stdout: {stdout}");
}

#[test]
fn once_with_dry_run_moves_nothing() {
    let td = tempdir().unwrap();
    let root = td.path();
    let src = root.join("in");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(root.join("doc")).unwrap();
    fs::write(src.join("a.pdf"), b"x").unwrap();
    let cfg = root.join("config.xml");
    fs::write(&cfg, "<config></config>").unwrap();

    let status = bin()
        .arg("--config")
        .arg(&cfg)
        .arg("--source-dir")
        .arg(&src)
        .arg("--document-dir")
        .arg(root.join("doc"))
        .args(["--once", "--dry-run"])
        .status()
        .expect("spawn binary");
    assert!(status.success());
    assert!(src.join("a.pdf").exists());
    assert!(!root.join("doc").join("a.pdf").exists());
}

#[test]
fn bad_log_level_flag_fails_before_sorting() {
    let td = tempdir().unwrap();
    let out = bin()
        .args(["--log-level", "loud", "--once", "--config"])
        .arg(td.path().join("config.xml"))
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid log level"), "stderr: {stderr}");
}

#[test]
fn missing_source_dir_fails() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config></config>").unwrap();
    let status = bin()
        .arg("--config")
        .arg(&cfg)
        .arg("--source-dir")
        .arg(td.path().join("missing"))
        .arg("--once")
        .status()
        .expect("spawn binary");
    assert!(!status.success());
}
