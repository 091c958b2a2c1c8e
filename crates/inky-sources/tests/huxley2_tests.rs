//! Departures board decoding against recorded responses.

use inky_common::format_error_message;
use inky_sources::huxley2::parse_departures;
use inky_sources::{HuxleyQuery, SourceError};
use test_utils::read_fixture;

fn fixture(name: &str) -> String {
    read_fixture("inky-sources", name)
}

fn query(count: usize) -> HuxleyQuery {
    HuxleyQuery {
        from: "BET".into(),
        to: "WMW".into(),
        count,
        token: None,
    }
}

#[test]
fn test_departures() {
    let schedule = parse_departures(&fixture("huxley_departures.json"), &query(3)).unwrap();

    assert_eq!(schedule.origin, "Bethnal Green");
    assert_eq!(schedule.destination, "Walthamstow Central");
    assert_eq!(schedule.services.as_ref().map(Vec::len), Some(3));
    assert_eq!(schedule.advisory, None);

    assert_eq!(schedule.line(0).unwrap(), "07:52 | P1 to Chingford - On time");
    assert_eq!(schedule.line(1).unwrap(), "08:07 | P? to Walthamstow Central - 08:11");
    assert_eq!(schedule.line(2).unwrap(), "08:22 | P12 to Chingford - Cancelled");
    assert!(schedule.line(3).is_err());
}

#[test]
fn test_requesting_more_slots_than_services() {
    let schedule = parse_departures(&fixture("huxley_departures.json"), &query(5)).unwrap();
    assert_eq!(schedule.line(3).unwrap(), "");
    assert_eq!(schedule.line(4).unwrap(), "");
}

#[test]
fn test_no_services() {
    let schedule = parse_departures(&fixture("huxley_no_services.json"), &query(3)).unwrap();
    assert_eq!(schedule.services, None);
    assert_eq!(schedule.line(0).unwrap(), "No train services to Walthamstow Central.");
    assert_eq!(schedule.line(1).unwrap(), "");
}

#[test]
fn test_advisory_is_wrapped_across_slots() {
    let schedule = parse_departures(&fixture("huxley_advisory.json"), &query(3)).unwrap();
    let advisory = schedule.advisory.clone().unwrap();
    assert!(advisory.starts_with("Disruption between Hackney Downs"));

    assert_eq!(schedule.line(0).unwrap(), "Disruption between Hackney Downs and C");
    assert_eq!(schedule.line(1).unwrap(), "hingford due to a signalling fault. Ti");
    assert_eq!(schedule.line(2).unwrap(), format_error_message(&advisory, 2, 38));
}

#[test]
fn test_falls_back_to_query_codes() {
    let schedule = parse_departures(r#"{"trainServices": null}"#, &query(1)).unwrap();
    assert_eq!(schedule.origin, "BET");
    assert_eq!(schedule.destination, "WMW");
}

#[test]
fn test_malformed_body() {
    let err = parse_departures("not json", &query(3)).unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
}
