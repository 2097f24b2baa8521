use super::*;

#[test]
fn parses_the_two_event_types() {
    assert_eq!("clear-fell".parse::<EventType>().unwrap(), EventType::ClearFell);
    assert_eq!("fragmented".parse::<EventType>().unwrap(), EventType::Fragmented);
    assert_eq!(EventType::Fragmented.to_string(), "fragmented");
}

#[test]
fn unknown_event_type_is_structured_error() {
    let err = "selective".parse::<EventType>().unwrap_err();
    assert!(matches!(err, WarmingError::InvalidEventType(_)));
    assert!(err.to_string().contains("selective"));
}

#[test]
fn event_type_serde_uses_kebab_names() {
    let t: EventType = serde_json::from_str("\"clear-fell\"").unwrap();
    assert_eq!(t, EventType::ClearFell);
    assert_eq!(
        serde_json::to_string(&EventType::Fragmented).unwrap(),
        "\"fragmented\""
    );
    assert!(serde_json::from_str::<EventType>("\"frag\"").is_err());
}

#[test]
fn amount_must_be_a_positive_percentage() {
    assert!(DeforestationEvent::new(0.0, EventType::ClearFell).is_err());
    assert!(DeforestationEvent::new(100.5, EventType::ClearFell).is_err());
    assert!(DeforestationEvent::new(f64::NAN, EventType::ClearFell).is_err());
    let ev = DeforestationEvent::new(100.0, EventType::Fragmented).unwrap();
    assert_eq!(ev.amount(), 100.0);
    assert_eq!(ev.event_type(), EventType::Fragmented);
}
