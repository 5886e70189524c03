use download_sorter::fs_ops::move_file;
use download_sorter::SorterError;
use std::ffi::OsStr;
use std::fs;
use tempfile::tempdir;

#[test]
fn incoming_keeps_name_and_occupant_is_renamed() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src_dir = td.path().join("src");
    let dest = td.path().join("docs");
    fs::create_dir_all(&src_dir)?;
    fs::create_dir_all(&dest)?;
    fs::write(dest.join("report.pdf"), "old")?;
    let src = src_dir.join("report.pdf");
    fs::write(&src, "new")?;

    let out = move_file(&dest, &src, OsStr::new("report.pdf"))?;

    assert!(!src.exists());
    assert_eq!(out.dest, dest.join("report.pdf"));
    assert_eq!(out.displaced.as_deref(), Some(dest.join("report(1).pdf").as_path()));
    assert_eq!(fs::read_to_string(dest.join("report.pdf"))?, "new");
    assert_eq!(fs::read_to_string(dest.join("report(1).pdf"))?, "old");
    Ok(())
}

#[test]
fn older_renamed_copies_are_preserved() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src_dir = td.path().join("src");
    let dest = td.path().join("docs");
    fs::create_dir_all(&src_dir)?;
    fs::create_dir_all(&dest)?;
    fs::write(dest.join("report.pdf"), "v2")?;
    fs::write(dest.join("report(1).pdf"), "v1")?;
    let src = src_dir.join("report.pdf");
    fs::write(&src, "v3")?;

    move_file(&dest, &src, OsStr::new("report.pdf"))?;

    assert_eq!(fs::read_to_string(dest.join("report(1).pdf"))?, "v1");
    assert_eq!(fs::read_to_string(dest.join("report(2).pdf"))?, "v2");
    assert_eq!(fs::read_to_string(dest.join("report.pdf"))?, "v3");
    Ok(())
}

#[test]
fn destination_that_is_a_file_is_reported_as_missing() {
    let td = tempdir().unwrap();
    let src = td.path().join("a.png");
    fs::write(&src, "x").unwrap();
    let not_dir = td.path().join("Pictures");
    fs::write(&not_dir, "plain file").unwrap();
    let err = move_file(&not_dir, &src, OsStr::new("a.png")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SorterError>(),
        Some(SorterError::DestinationMissing(_))
    ));
    assert_eq!(fs::read_to_string(&not_dir).unwrap(), "plain file");
    assert!(src.exists());
}

#[test]
fn directories_move_too() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("slides.pptx");
    fs::create_dir_all(&src)?;
    fs::write(src.join("inner.xml"), "x")?;
    let dest = td.path().join("docs");
    fs::create_dir_all(&dest)?;

    let out = move_file(&dest, &src, OsStr::new("slides.pptx"))?;
    assert!(!src.exists());
    assert!(out.dest.join("inner.xml").exists());
    Ok(())
}

#[test]
fn missing_source_reports_source_not_found() {
    let td = tempdir().unwrap();
    let err = move_file(td.path(), &td.path().join("ghost.pdf"), OsStr::new("ghost.pdf"))
        .unwrap_err();
    match err.downcast_ref::<SorterError>() {
        Some(SorterError::SourceNotFound(p)) => assert!(p.ends_with("ghost.pdf")),
        other => panic!("expected SourceNotFound, got {other:?}"),
    }
}

#[test]
fn missing_destination_leaves_source_in_place() {
    let td = tempdir().unwrap();
    let src = td.path().join("a.png");
    fs::write(&src, "x").unwrap();
    let nope = td.path().join("nope");
    let err = move_file(&nope, &src, OsStr::new("a.png")).unwrap_err();
    assert!(src.exists());
    match err.downcast_ref::<SorterError>() {
        Some(SorterError::DestinationMissing(p)) => assert_eq!(p, &nope),
        other => panic!("expected DestinationMissing, got {other:?}"),
    }
    assert_eq!(err.downcast_ref::<SorterError>().map(SorterError::code), Some(2));
}

#[cfg(unix)]
#[test]
fn permission_denied_is_typed() {
    use std::os::unix::fs::PermissionsExt;
    let td = tempdir().unwrap();
    let src = td.path().join("a.png");
    fs::write(&src, "x").unwrap();
    let dest = td.path().join("locked");
    fs::create_dir_all(&dest).unwrap();
    fs::set_permissions(&dest, fs::Permissions::from_mode(0o500)).unwrap();

    // Root bypasses directory permissions; nothing to assert there.
    let marker = dest.join(".write-check");
    if fs::write(&marker, b"").is_ok() {
        let _ = fs::remove_file(&marker);
        fs::set_permissions(&dest, fs::Permissions::from_mode(0o700)).unwrap();
        return;
    }

    let err = move_file(&dest, &src, OsStr::new("a.png")).unwrap_err();
    fs::set_permissions(&dest, fs::Permissions::from_mode(0o700)).unwrap();
    assert!(matches!(
        err.downcast_ref::<SorterError>(),
        Some(SorterError::PermissionDenied { .. })
    ));
    assert!(src.exists());
}
