use download_sorter::config::{validate_and_normalize, Config, Destinations};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn dests(root: &Path) -> Destinations {
    Destinations {
        image: root.join("img"),
        video: root.join("vid"),
        sfx: root.join("sfx"),
        music: root.join("music"),
        document: root.join("doc"),
    }
}

#[test]
fn valid_config_is_canonicalized() {
    let td = tempdir().unwrap();
    let d = dests(td.path());
    for (_, p) in d.named() {
        fs::create_dir_all(p).unwrap();
    }
    let src = td.path().join("in");
    fs::create_dir_all(&src).unwrap();

    let mut cfg = Config::new(td.path().join("in").join("..").join("in"), d);
    validate_and_normalize(&mut cfg).unwrap();
    assert_eq!(cfg.source_dir, dunce::canonicalize(&src).unwrap());
    assert!(cfg.destinations.image.is_absolute());
}

#[test]
fn missing_source_is_an_error() {
    let td = tempdir().unwrap();
    let mut cfg = Config::new(td.path().join("missing"), dests(td.path()));
    assert!(validate_and_normalize(&mut cfg).is_err());
}

#[test]
fn source_that_is_a_file_is_an_error() {
    let td = tempdir().unwrap();
    let f = td.path().join("file");
    fs::write(&f, "x").unwrap();
    let mut cfg = Config::new(f, dests(td.path()));
    assert!(validate_and_normalize(&mut cfg).is_err());
}

#[test]
fn missing_destinations_are_tolerated() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    fs::create_dir_all(&src).unwrap();
    let mut cfg = Config::new(src, dests(td.path()));
    validate_and_normalize(&mut cfg).unwrap();
    assert!(!cfg.destinations.video.exists());
}

#[test]
fn destination_that_is_a_file_is_an_error() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    fs::create_dir_all(&src).unwrap();
    let d = dests(td.path());
    fs::write(&d.document, "x").unwrap();
    let mut cfg = Config::new(src, d);
    assert!(validate_and_normalize(&mut cfg).is_err());
}

#[test]
fn destination_equal_to_source_is_an_error() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    fs::create_dir_all(&src).unwrap();
    let mut d = dests(td.path());
    d.image = src.clone();
    let mut cfg = Config::new(src, d);
    assert!(validate_and_normalize(&mut cfg).is_err());
}

#[test]
fn log_file_inside_source_is_made_canonical() {
    let td = tempdir().unwrap();
    let src = td.path().join("in");
    fs::create_dir_all(&src).unwrap();
    let mut cfg = Config::new(&src, dests(td.path()));
    cfg.log_file = Some(src.join("..").join("in").join("sorter.log"));

    validate_and_normalize(&mut cfg).unwrap();

    let canonical_src = dunce::canonicalize(&src).unwrap();
    assert_eq!(cfg.log_file, Some(canonical_src.join("sorter.log")));
    assert!(cfg.log_file.as_ref().unwrap().starts_with(&cfg.source_dir));
}
