use super::*;

#[test]
fn parses_a_small_grid() {
    let json = r#"{
        "width": 3, "height": 2,
        "pixel_width": 1.0, "pixel_height": 1.0,
        "nodata": -1,
        "origin": [115.0, -30.0],
        "values": [0, 0.5, 1, -1, 0, 0]
    }"#;
    let grid = from_reader(json.as_bytes()).unwrap();
    assert_eq!((grid.width(), grid.height()), (3, 2));
    assert_eq!(grid.nodata(), Some(-1.0));
    assert_eq!(grid.origin(), [115.0, -30.0]);
    assert_eq!(grid.valid_mask().get(0, 1), Some(false));
}

#[test]
fn shape_mismatch_is_validation_error() {
    let json = r#"{ "width": 2, "height": 2, "pixel_width": 1, "pixel_height": 1, "values": [0, 1] }"#;
    assert!(matches!(
        from_reader(json.as_bytes()),
        Err(WarmingError::Validation(_))
    ));
}

#[test]
fn zero_size_grid_is_empty_grid_error() {
    let json = r#"{ "width": 0, "height": 0, "pixel_width": 1, "pixel_height": 1, "values": [] }"#;
    assert!(matches!(
        from_reader(json.as_bytes()),
        Err(WarmingError::EmptyGrid(_))
    ));
}

#[test]
fn malformed_json_is_serde_error() {
    assert!(matches!(
        from_reader("[1, 2".as_bytes()),
        Err(WarmingError::Serde(_))
    ));
}

#[test]
fn missing_file_is_not_a_client_fault() {
    let err = from_path("target/no_such_dir/grid.json").unwrap_err();
    assert!(!err.is_client_fault());
    assert!(err.to_string().contains("grid.json"));
}
