use super::*;
use crate::kernel::annulus::generate_kernel;

fn impulse(w: usize, h: usize, x: usize, y: usize) -> Grid<f64> {
    let mut g = Grid::filled(w, h, 0.0);
    g.set(x, y, 1.0).unwrap();
    g
}

#[test]
fn impulse_response_is_the_kernel() {
    let k = generate_kernel(2, 1).unwrap();
    let out = convolve_zero_padded(&impulse(9, 9, 4, 4), &k);
    for y in 0..9 {
        for x in 0..9 {
            let expected = k.weight(x as isize - 4, y as isize - 4);
            assert_eq!(out.get(x, y).unwrap(), expected);
        }
    }
}

#[test]
fn zero_input_stays_exactly_zero() {
    let k = generate_kernel(4, 2).unwrap();
    let out = convolve_zero_padded(&Grid::filled(7, 5, 0.0), &k);
    assert!(out.data().iter().all(|&v| v == 0.0));
}

#[test]
fn out_of_grid_neighbours_contribute_zero() {
    // A uniform field averages to 1 in the interior but loses the taps that fall off the edge.
    let k = generate_kernel(1, 0).unwrap();
    let out = convolve_zero_padded(&Grid::filled(5, 5, 1.0), &k);
    assert!((out.get(2, 2).unwrap() - 1.0).abs() < 1e-12);
    assert!((out.get(0, 2).unwrap() - 0.75).abs() < 1e-12);
    assert!((out.get(0, 0).unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn corner_impulse_keeps_only_in_grid_taps() {
    let k = generate_kernel(1, 0).unwrap();
    let out = convolve_zero_padded(&impulse(3, 3, 0, 0), &k);
    assert_eq!(out.get(1, 0), Some(0.25));
    assert_eq!(out.get(0, 1), Some(0.25));
    assert_eq!(out.get(0, 0), Some(0.0));
    let total: f64 = out.data().iter().sum();
    assert!((total - 0.5).abs() < 1e-12);
}
