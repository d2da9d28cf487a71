use super::Scope;

#[test]
fn it_parses_aggregate() {
    assert_eq!(Scope::parse("School"), Scope::Aggregate);
    assert_eq!(Scope::parse("  School "), Scope::Aggregate);
    assert_eq!(Scope::parse(""), Scope::Aggregate);
}

#[test]
fn it_parses_segments() {
    assert_eq!(Scope::parse("10-A"), Scope::Segment("10-A".to_string()));
    assert_eq!(Scope::parse(" 10-B"), Scope::Segment("10-B".to_string()));
}

#[test]
fn it_is_case_sensitive() {
    assert_eq!(Scope::parse("school"), Scope::Segment("school".to_string()));
}

#[test]
fn it_maps_aggregate_to_null_on_the_wire() {
    assert_eq!(Scope::Aggregate.wire_value(), None);
    assert_eq!(
        Scope::parse("10-A").wire_value(),
        Some("10-A".to_string())
    );
}

#[test]
fn it_formats_labels() {
    assert_eq!(Scope::Aggregate.label(), "All classes");
    assert_eq!(Scope::parse("10-C").label(), "Class 10-C");
}

#[test]
fn it_formats_prose_names() {
    assert_eq!(Scope::Aggregate.prose_name(), "the whole school");
    assert_eq!(Scope::parse("10-C").prose_name(), "10-C");
}

#[test]
fn it_displays_identifiers() {
    assert_eq!(Scope::Aggregate.to_string(), "School");
    assert_eq!(Scope::parse("10-A").to_string(), "10-A");
    assert!(Scope::Aggregate.is_aggregate());
    assert!(!Scope::parse("10-A").is_aggregate());
}
