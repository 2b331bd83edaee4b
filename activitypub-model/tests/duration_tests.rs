use activitypub_model::duration::{self, DurationError};
use chrono::TimeDelta;
use pretty_assertions::assert_eq;

// ── Parsing ───────────────────────────────────────────────────────

#[test]
fn parses_fixed_units() {
    assert_eq!(duration::parse("PT30S").unwrap(), TimeDelta::seconds(30));
    assert_eq!(duration::parse("PT5M").unwrap(), TimeDelta::minutes(5));
    assert_eq!(duration::parse("P2D").unwrap(), TimeDelta::days(2));
    assert_eq!(duration::parse("P1W").unwrap(), TimeDelta::weeks(1));
    assert_eq!(
        duration::parse("P1DT2H3M4S").unwrap(),
        TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::minutes(3) + TimeDelta::seconds(4)
    );
}

#[test]
fn parses_fraction_and_sign() {
    assert_eq!(duration::parse("PT0.5S").unwrap(), TimeDelta::milliseconds(500));
    assert_eq!(duration::parse("-PT10M").unwrap(), TimeDelta::minutes(-10));
}

#[test]
fn rejects_calendar_units() {
    assert_eq!(
        duration::parse("P1M").unwrap_err(),
        DurationError::CalendarUnit {
            text: "P1M".into(),
            unit: 'M'
        }
    );
    assert!(matches!(
        duration::parse("P1Y"),
        Err(DurationError::CalendarUnit { unit: 'Y', .. })
    ));
}

#[test]
fn rejects_malformed_text() {
    assert_eq!(
        duration::parse("1H").unwrap_err(),
        DurationError::MissingDesignator("1H".into())
    );
    for text in ["P", "PT", "PTH", "PT1.5H", "PT1M1H", "PT1H1H", "P1DT", "PT1X", "PT.5S"] {
        assert!(
            matches!(duration::parse(text), Err(DurationError::Invalid(_))),
            "{text}"
        );
    }
}

#[test]
fn rejects_overflow() {
    assert!(matches!(
        duration::parse("P99999999999999999D"),
        Err(DurationError::Invalid(_) | DurationError::OutOfRange(_))
    ));
}

// ── Formatting ────────────────────────────────────────────────────

#[test]
fn formats_shortest_form() {
    assert_eq!(duration::format(TimeDelta::zero()), "PT0S");
    assert_eq!(duration::format(TimeDelta::minutes(150)), "PT2H30M");
    assert_eq!(duration::format(TimeDelta::days(3)), "P3D");
    assert_eq!(duration::format(TimeDelta::weeks(1) + TimeDelta::seconds(1)), "P7DT1S");
    assert_eq!(duration::format(TimeDelta::milliseconds(1500)), "PT1.5S");
    assert_eq!(duration::format(TimeDelta::minutes(-10)), "-PT10M");
}

#[test]
fn formatted_text_parses_back() {
    for delta in [
        TimeDelta::seconds(59),
        TimeDelta::hours(25),
        TimeDelta::milliseconds(-1250),
        TimeDelta::weeks(2),
    ] {
        assert_eq!(duration::parse(&duration::format(delta)).unwrap(), delta);
    }
}
