//! Asset files on disk: open sniffs and unpacks, save packs on request.
use std::path::PathBuf;

use dvpl_codecs::{decode, encode, open_asset, packed_path, save_asset, unpacked_path};

const UI_SAMPLE: &str = r#"Header:
  version: 135
ImportedPackages:
  - "~res:/UI/Screens/Battle/Shell.yaml"
Prototypes:
  - class: "UIControl"
    name: "MainScreen"
    size: [1920, 1080]
    position: [0, 0]
    visible: true"#;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dvpl_test_{}_{}", std::process::id(), name))
}

#[test]
fn test_open_plain_file_is_passed_through() {
    let path = temp_path("plain.yaml");
    std::fs::write(&path, UI_SAMPLE).unwrap();

    let asset = open_asset(&path).unwrap();
    assert!(!asset.was_container);
    assert_eq!(asset.content, UI_SAMPLE.as_bytes());
    assert_eq!(asset.path, path);
}

#[test]
fn test_open_container_is_unpacked() {
    let path = temp_path("packed.yaml.dvpl");
    std::fs::write(&path, encode(Some(UI_SAMPLE.as_bytes())).unwrap()).unwrap();

    let asset = open_asset(&path).unwrap();
    assert!(asset.was_container);
    assert_eq!(asset.content, UI_SAMPLE.as_bytes());
}

#[test]
fn test_open_corrupt_container_is_an_error() {
    let path = temp_path("corrupt.yaml.dvpl");
    let mut packed = encode(Some(UI_SAMPLE.as_bytes())).unwrap();
    packed[0] ^= 0xFF;
    std::fs::write(&path, packed).unwrap();

    let err = open_asset(&path).unwrap_err();
    let report = format!("{:#}", err);
    assert!(report.contains("checksum mismatch"), "got: {report}");
}

#[test]
fn test_open_missing_file_names_the_path() {
    let path = temp_path("does_not_exist.sc2");
    let err = open_asset(&path).unwrap_err().to_string();
    assert!(err.contains("does_not_exist.sc2"), "got: {err}");
}

#[test]
fn test_empty_paths_are_rejected() {
    assert!(open_asset("").is_err());
    assert!(save_asset("", b"data", true).is_err());
}

#[test]
fn test_save_preserves_original_form() {
    let packed_file = temp_path("save_packed.sc2.dvpl");
    save_asset(&packed_file, UI_SAMPLE.as_bytes(), true).unwrap();
    let on_disk = std::fs::read(&packed_file).unwrap();
    assert_eq!(decode(&on_disk).unwrap(), UI_SAMPLE.as_bytes());

    let plain_file = temp_path("save_plain.sc2");
    save_asset(&plain_file, UI_SAMPLE.as_bytes(), false).unwrap();
    assert_eq!(std::fs::read(&plain_file).unwrap(), UI_SAMPLE.as_bytes());
}

#[test]
fn test_open_edit_save_cycle() {
    let path = temp_path("cycle.yaml.dvpl");
    save_asset(&path, UI_SAMPLE.as_bytes(), true).unwrap();

    let asset = open_asset(&path).unwrap();
    let edited = String::from_utf8(asset.content).unwrap().replace("MainScreen", "Hangar");
    save_asset(&path, edited.as_bytes(), asset.was_container).unwrap();

    let reopened = open_asset(&path).unwrap();
    assert!(reopened.was_container);
    assert_eq!(reopened.content, edited.as_bytes());
}

#[test]
fn test_empty_asset_roundtrips_through_disk() {
    let path = temp_path("empty.txt.dvpl");
    save_asset(&path, b"", true).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 20);

    let asset = open_asset(&path).unwrap();
    assert!(asset.was_container);
    assert!(asset.content.is_empty());
}

#[test]
fn test_path_helpers_invert() {
    let original = PathBuf::from("Data/UI/Screens/Hangar.yaml");
    let packed = packed_path(&original);
    assert_eq!(packed, PathBuf::from("Data/UI/Screens/Hangar.yaml.dvpl"));
    assert_eq!(unpacked_path(&packed), Some(original));
}
