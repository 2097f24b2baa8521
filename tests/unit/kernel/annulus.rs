use super::*;

#[test]
fn radius_one_is_the_four_neighbourhood() {
    let k = generate_kernel(1, 0).unwrap();
    assert_eq!(k.size(), 3);
    assert_eq!(k.weight(0, 0), 0.0);
    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        assert_eq!(k.weight(dx, dy), 0.25);
    }
    for (dx, dy) in [(1, 1), (-1, -1), (1, -1), (-1, 1)] {
        assert_eq!(k.weight(dx, dy), 0.0);
    }
    assert_eq!(k.taps().len(), 4);
}

#[test]
fn kernels_sum_to_one_for_all_valid_radii() {
    for outer in 1..=10u32 {
        for inner in 0..outer {
            let k = generate_kernel(outer, inner).unwrap();
            assert!(
                (k.sum() - 1.0).abs() < 1e-12,
                "outer={outer} inner={inner} sum={}",
                k.sum()
            );
            assert!(k.weights().iter().all(|&w| w >= 0.0));
            assert_eq!(k.size(), (2 * outer + 1) as usize);
        }
    }
}

#[test]
fn inner_radius_cuts_out_the_disk() {
    let k = generate_kernel(4, 2).unwrap();
    assert_eq!(k.weight(0, 0), 0.0);
    assert_eq!(k.weight(2, 0), 0.0);
    assert_eq!(k.weight(1, 1), 0.0);
    assert!(k.weight(2, 2) > 0.0);
    assert!(k.weight(4, 0) > 0.0);
    assert_eq!(k.weight(4, 1), 0.0);
}

#[test]
fn kernel_is_symmetric() {
    let k = generate_kernel(6, 4).unwrap();
    for t in k.taps() {
        assert_eq!(k.weight(-t.dx, -t.dy), t.weight);
        assert_eq!(k.weight(t.dy, t.dx), t.weight);
    }
}

#[test]
fn invalid_radii_are_rejected() {
    assert!(matches!(
        generate_kernel(0, 0),
        Err(WarmingError::InvalidRadius(_))
    ));
    assert!(matches!(
        generate_kernel(2, 2),
        Err(WarmingError::InvalidRadius(_))
    ));
    assert!(matches!(
        generate_kernel(2, 3),
        Err(WarmingError::InvalidRadius(_))
    ));
}
