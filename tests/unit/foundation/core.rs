use super::*;

fn px() -> PixelSize {
    PixelSize::new(1.0, 1.0).unwrap()
}

#[test]
fn grid_new_rejects_length_mismatch() {
    assert!(Grid::new(2, 2, vec![0.0; 3]).is_err());
    let g = Grid::new(3, 2, vec![0.0; 6]).unwrap();
    assert_eq!((g.width(), g.height(), g.len()), (3, 2, 6));
}

#[test]
fn grid_get_is_row_major_and_bounded() {
    let g = Grid::new(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
    assert_eq!(g.get(2, 0), Some(2));
    assert_eq!(g.get(0, 1), Some(3));
    assert_eq!(g.get(3, 0), None);
    assert_eq!(g.get(0, 2), None);
}

#[test]
fn pixel_size_must_be_positive() {
    assert!(PixelSize::new(0.0, 1.0).is_err());
    assert!(PixelSize::new(1.0, f64::NAN).is_err());
    assert_eq!(PixelSize::new(2.0, 3.0).unwrap().area(), 6.0);
}

#[test]
fn zero_size_grid_is_empty_grid_error() {
    let g = Grid::new(0, 0, Vec::<f64>::new()).unwrap();
    let err = LossGrid::new(g, px(), None).unwrap_err();
    assert!(matches!(err, WarmingError::EmptyGrid(_)));
}

#[test]
fn all_nodata_grid_is_empty_grid_error() {
    let g = Grid::filled(4, 4, -9999.0);
    let err = LossGrid::new(g, px(), Some(-9999.0)).unwrap_err();
    assert!(matches!(err, WarmingError::EmptyGrid(_)));

    let g = Grid::filled(2, 2, f64::NAN);
    let err = LossGrid::new(g, px(), Some(f64::NAN)).unwrap_err();
    assert!(matches!(err, WarmingError::EmptyGrid(_)));
}

#[test]
fn out_of_range_and_non_finite_values_are_rejected() {
    let g = Grid::new(2, 1, vec![0.5, 1.5]).unwrap();
    assert!(matches!(
        LossGrid::new(g, px(), None),
        Err(WarmingError::Validation(_))
    ));
    let g = Grid::new(2, 1, vec![0.5, f64::NAN]).unwrap();
    assert!(LossGrid::new(g, px(), None).is_err());
}

#[test]
fn loss_fractions_scale_by_amount_and_zero_nodata() {
    let g = Grid::new(3, 1, vec![1.0, 0.5, -1.0]).unwrap();
    let loss = LossGrid::new(g, px(), Some(-1.0)).unwrap();
    let f = loss.loss_fractions(50.0);
    assert_eq!(f.data(), &[0.5, 0.25, 0.0]);
    assert_eq!(loss.valid_mask().data(), &[true, true, false]);
}
