use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WarmingError::invalid_radius("x")
            .to_string()
            .contains("invalid radius:")
    );
    assert!(WarmingError::empty_grid("x").to_string().contains("empty grid:"));
    assert!(
        WarmingError::degenerate_range("x")
            .to_string()
            .contains("degenerate range:")
    );
    assert!(
        WarmingError::invalid_event_type("x")
            .to_string()
            .contains("invalid event type:")
    );
    assert!(
        WarmingError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        WarmingError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        WarmingError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WarmingError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_wrapped_errors_are_not_client_faults() {
    assert!(WarmingError::invalid_radius("x").is_client_fault());
    assert!(WarmingError::degenerate_range("x").is_client_fault());
    let io = WarmingError::Other(anyhow::Error::new(std::io::Error::other("disk")));
    assert!(!io.is_client_fault());
}
