use super::*;
use crate::foundation::core::{Grid, PixelSize};
use crate::model::event::EventType;

fn grid_with(cells: &[(usize, usize, f64)], w: usize, h: usize) -> LossGrid {
    let mut g = Grid::filled(w, h, 0.0);
    for &(x, y, v) in cells {
        g.set(x, y, v).unwrap();
    }
    LossGrid::new(g, PixelSize::new(1.0, 1.0).unwrap(), None).unwrap()
}

#[test]
fn oversized_grid_is_rejected_before_computing() {
    let mut cfg = EngineConfig::default();
    cfg.limits.max_cells = 10;
    let p = Predictor::new(cfg).unwrap();
    let grid = grid_with(&[(1, 1, 1.0)], 4, 4);
    let ev = DeforestationEvent::new(100.0, EventType::ClearFell).unwrap();
    assert!(matches!(
        p.predict(&grid, &ev),
        Err(WarmingError::Validation(_))
    ));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let mut cfg = EngineConfig::default();
    cfg.local.clear();
    assert!(Predictor::new(cfg).is_err());
}

#[test]
fn parallel_engine_matches_sequential_engine() {
    let grid = grid_with(&[(5, 5, 1.0), (6, 5, 0.5), (20, 12, 0.8)], 30, 18);
    let ev = DeforestationEvent::new(70.0, EventType::Fragmented).unwrap();

    let seq = Predictor::new(EngineConfig::default()).unwrap();
    let mut cfg = EngineConfig::default();
    cfg.threading.parallel = true;
    cfg.threading.threads = Some(2);
    let par = Predictor::new(cfg).unwrap();

    let a = seq.predict(&grid, &ev).unwrap();
    let b = par.predict(&grid, &ev).unwrap();
    assert_eq!(a.field, b.field);
    assert_eq!(a.local_tier, b.local_tier);
}

#[test]
fn configured_fragmented_factor_is_applied() {
    let grid = grid_with(&[(4, 4, 1.0)], 9, 9);
    let clear = DeforestationEvent::new(100.0, EventType::ClearFell).unwrap();
    let frag = DeforestationEvent::new(100.0, EventType::Fragmented).unwrap();
    let mut cfg = EngineConfig::default();
    cfg.fragmented_factor = 0.25;
    let p = Predictor::new(cfg).unwrap();

    let c = p.predict(&grid, &clear).unwrap();
    let f = p.predict(&grid, &frag).unwrap();
    for (cv, fv) in c.field.data().iter().zip(f.field.data()) {
        assert_eq!(*fv, *cv * 0.25);
    }
}

#[test]
fn nodata_cells_contribute_no_loss() {
    let mut g = Grid::filled(9, 9, -1.0);
    g.set(4, 4, 1.0).unwrap();
    let with_nodata =
        LossGrid::new(g, PixelSize::new(1.0, 1.0).unwrap(), Some(-1.0)).unwrap();
    let plain = grid_with(&[(4, 4, 1.0)], 9, 9);
    let ev = DeforestationEvent::new(100.0, EventType::ClearFell).unwrap();
    let p = Predictor::new(EngineConfig::default()).unwrap();
    assert_eq!(
        p.predict(&with_nodata, &ev).unwrap().field,
        p.predict(&plain, &ev).unwrap().field
    );
}

#[test]
fn predictor_can_be_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Predictor>();
}
