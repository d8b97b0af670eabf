use std::io::Write;

use platnav::core::Vec2;
use platnav_cli::{parse_point, Level};
use tempfile::NamedTempFile;

fn write_level(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write level");
    file
}

#[test]
fn loads_solids_and_derives_bounds() {
    let file = write_level(
        r#"
solids:
  - { min: [-10, -1], max: [10, 0] }
  - { min: [4, 3], max: [8, 3.5] }
"#,
    );

    let level = Level::load(file.path()).expect("level");

    assert_eq!(level.world.solids.len(), 2);
    assert_eq!(level.bounds.min, Vec2::new(-10.0, -1.0));
    assert_eq!(level.bounds.max, Vec2::new(10.0, 3.5));
}

#[test]
fn explicit_bounds_override_the_solids() {
    let level = Level::parse(
        r#"
solids:
  - { min: [-10, -1], max: [10, 0] }
bounds: { min: [-20, -1], max: [20, 15] }
"#,
    )
    .expect("level");

    assert_eq!(level.bounds.max, Vec2::new(20.0, 15.0));
}

#[test]
fn corners_are_normalized() {
    let level = Level::parse("solids: [{ min: [3, 2], max: [1, 0] }]").expect("level");

    assert_eq!(level.world.solids[0].min, Vec2::new(1.0, 0.0));
    assert_eq!(level.world.solids[0].max, Vec2::new(3.0, 2.0));
}

#[test]
fn empty_level_without_bounds_is_rejected() {
    let err = Level::parse("solids: []").expect_err("no geometry");
    assert!(format!("{err:#}").contains("no solids"));
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(Level::parse("solids: []\nspawn: [0, 0]").is_err());
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing.yaml");

    let err = Level::load(&path).expect_err("missing file");

    assert!(format!("{err:#}").contains("missing.yaml"));
}

#[test]
fn parses_points() {
    assert_eq!(parse_point("1.5,-2"), Ok(Vec2::new(1.5, -2.0)));
    assert_eq!(parse_point(" 3 , 4 "), Ok(Vec2::new(3.0, 4.0)));
    assert!(parse_point("3").is_err());
    assert!(parse_point("a,1").is_err());
    assert!(parse_point("inf,1").is_err());
}
