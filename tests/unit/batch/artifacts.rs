use super::*;
use crate::batch::metadata::Attribute;

fn temp_root(tag: &str) -> PathBuf {
    let dir =
        std::env::temp_dir().join(format!("lasercat_artifacts_{tag}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn sample_metadata() -> Metadata {
    Metadata {
        name: "LaserCat 3".to_string(),
        description: "d".to_string(),
        attributes: vec![Attribute::text("Eyes", "Pacified")],
        laser_cat_id: 9,
    }
}

#[test]
fn stems_are_zero_padded() {
    assert_eq!(artifact_stem(7), "00007");
    assert_eq!(artifact_stem(123_456), "123456");
}

#[test]
fn fs_store_lays_out_directories() {
    let root = temp_root("layout");
    let mut store = FsArtifactStore::new(&root);

    store.write_image(ArtifactKind::Still, 3, b"png").unwrap();
    store.write_image(ArtifactKind::LaserLoop, 4, b"gif").unwrap();
    store.write_image(ArtifactKind::Ripple, 5, b"gif").unwrap();
    store.write_warp_frame(5, "frame1", 12, b"png").unwrap();
    store.write_metadata(3, &sample_metadata()).unwrap();
    store.write_report(&RarityReport::default()).unwrap();

    assert!(root.join("lasercats/00003.png").is_file());
    assert!(root.join("gifs/00004.gif").is_file());
    assert!(root.join("fx_gifs/00005.gif").is_file());
    assert!(root.join("fx_frames/00005_frame1_12.png").is_file());
    assert!(root.join("report.json").is_file());

    let meta = std::fs::read_to_string(root.join("metadata/00003")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&meta).unwrap();
    assert_eq!(value["laserCatId"], 9);
    assert_eq!(value["name"], "LaserCat 3");

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn fs_store_surfaces_io_failures() {
    let root = temp_root("blocked");
    std::fs::write(&root, b"not a directory").unwrap();
    let mut store = FsArtifactStore::new(&root);

    let err = store.write_image(ArtifactKind::Still, 0, b"x").unwrap_err();
    assert!(matches!(err, crate::foundation::error::LaserCatError::Other(_)));

    std::fs::remove_file(&root).unwrap();
}

#[test]
fn memory_store_indexes_by_kind_and_ordinal() {
    let mut store = MemoryArtifactStore::new();
    store.write_image(ArtifactKind::Ripple, 2, b"a").unwrap();
    store.write_image(ArtifactKind::Still, 1, b"b").unwrap();

    assert_eq!(store.image(ArtifactKind::Ripple, 2), Some(&b"a"[..]));
    assert_eq!(store.kinds_of(1), vec![ArtifactKind::Still]);
    assert!(store.image(ArtifactKind::Still, 2).is_none());
}
