use std::io::Cursor;

use super::*;
use crate::render::geotiff::{GeoReference, GeoTiffOptions, encode_geotiff};

#[test]
fn reads_back_a_byte_geotiff() {
    let bytes = Grid::new(4, 2, vec![0u8, 255, 51, 0, 0, 0, 255, 10]).unwrap();
    let georef = GeoReference {
        origin: [116.0, -32.0],
        pixel: PixelSize::new(0.5, 0.25).unwrap(),
    };
    let opts = GeoTiffOptions {
        nodata: 10,
        block_rows: 1,
        colormap: None,
    };
    let file = encode_geotiff(&bytes, &georef, &opts).unwrap();

    let grid = from_reader(Cursor::new(file)).unwrap();
    assert_eq!((grid.width(), grid.height()), (4, 2));
    assert_eq!(grid.pixel(), PixelSize::new(0.5, 0.25).unwrap());
    assert_eq!(grid.origin(), [116.0, -32.0]);
    assert_eq!(grid.values().get(1, 0), Some(1.0));
    assert!((grid.values().get(2, 0).unwrap() - 0.2).abs() < 1e-12);
    assert_eq!(grid.valid_mask().get(3, 1), Some(false));
    assert_eq!(grid.valid_mask().get(0, 0), Some(true));
}

#[test]
fn garbage_is_not_a_client_fault() {
    let err = from_reader(Cursor::new(b"not a tiff".to_vec())).unwrap_err();
    assert!(!err.is_client_fault());
}

#[test]
fn missing_file_is_not_a_client_fault() {
    let err = from_path("target/no_such_dir/grid.tif").unwrap_err();
    assert!(!err.is_client_fault());
}
