use std::f64::consts::PI;

use super::*;

fn km() -> PixelSize {
    PixelSize::new(1.0, 1.0).unwrap()
}

#[test]
fn tier_boundaries_are_strict() {
    let tiers = default_local_tiers();
    assert_eq!(select_tier(&tiers, 0.0), 0);
    assert_eq!(select_tier(&tiers, 0.999), 0);
    assert_eq!(select_tier(&tiers, 1.0), 1);
    assert_eq!(select_tier(&tiers, 2.0 * PI), 2);
    assert_eq!(select_tier(&tiers, 5.0 * PI), 3);
    assert_eq!(select_tier(&tiers, 7.0 * PI), 4);
    assert_eq!(select_tier(&tiers, 8.0 * PI), 4);
    assert_eq!(select_tier(&tiers, 1.0e6), 4);
}

#[test]
fn area_counts_positive_loss_times_cell_area() {
    let loss = Grid::new(3, 1, vec![0.5, 0.0, 0.25]).unwrap();
    let px = PixelSize::new(2.0, 3.0).unwrap();
    assert!((affected_area(&loss, px) - 4.5).abs() < 1e-12);
}

#[test]
fn isolated_cell_uses_smallest_tier() {
    let mut loss = Grid::filled(5, 5, 0.0);
    loss.set(2, 2, 0.5).unwrap();
    let est = LocalEstimator::default().estimate(&loss, km());
    assert_eq!(est.tier_index, 0);
    assert_eq!(est.tier.slope, 1.93);
    // The radius-1 kernel excludes the centre, so a lone cell averages to zero.
    assert!(est.field.data().iter().all(|&v| v == 0.0));
}

#[test]
fn output_is_zero_where_there_is_no_direct_loss() {
    let mut loss = Grid::filled(7, 7, 0.0);
    loss.set(3, 3, 1.0).unwrap();
    loss.set(4, 3, 1.0).unwrap();
    let est = LocalEstimator::default().estimate(&loss, km());
    // Area 2 falls in the second tier: slope 3.94 over a radius-2 disk (12 cells).
    assert_eq!(est.tier_index, 1);
    let expected = 3.94 / 12.0;
    assert!((est.field.get(3, 3).unwrap() - expected).abs() < 1e-12);
    assert!((est.field.get(4, 3).unwrap() - expected).abs() < 1e-12);
    assert_eq!(est.field.get(5, 3), Some(0.0));
    assert_eq!(est.field.get(3, 4), Some(0.0));
}

#[test]
fn large_uniform_loss_selects_outermost_tier() {
    let loss = Grid::filled(10, 10, 1.0);
    let (field, tier) = estimate_local(&loss, 1.0, 1.0).unwrap();
    assert_eq!(tier.slope, 5.1);
    assert_eq!(tier.kernel_radius, 8);
    assert!(field.data().iter().all(|&v| v > 0.0));
}

#[test]
fn estimator_rejects_bad_tier_tables() {
    let mut tiers = default_local_tiers();
    tiers[3].area_threshold = 1.0;
    assert!(LocalEstimator::new(tiers).is_err());
    assert!(LocalEstimator::new(Vec::new()).is_err());
}

#[test]
fn default_estimator_has_one_kernel_per_tier() {
    let est = LocalEstimator::default();
    assert_eq!(est.tiers(), default_local_tiers().as_slice());
    assert_eq!(est.kernels.len(), est.tiers().len());
    for (k, t) in est.kernels.iter().zip(est.tiers()) {
        assert_eq!(k.outer_radius(), t.kernel_radius);
    }
}
