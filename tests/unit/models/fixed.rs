//! Unit tests for two-decimal values

use quotegrid::models::Fixed2;

#[test]
fn test_display_pads_two_decimals() {
    assert_eq!(Fixed2::from_hundredths(1230).to_string(), "12.30");
    assert_eq!(Fixed2::from_hundredths(0).to_string(), "0.00");
    assert_eq!(Fixed2::from_hundredths(7).to_string(), "0.07");
}

#[test]
fn test_display_negative_below_one() {
    assert_eq!(Fixed2::from_hundredths(-5).to_string(), "-0.05");
    assert_eq!(Fixed2::from_hundredths(-500).to_string(), "-5.00");
}

#[test]
fn test_from_f64_rounds_half_away_from_zero() {
    assert_eq!(Fixed2::from_f64(1.125).unwrap().to_string(), "1.13");
    assert_eq!(Fixed2::from_f64(-1.125).unwrap().to_string(), "-1.13");
    assert_eq!(Fixed2::from_f64(100.0 / 3.0).unwrap().to_string(), "33.33");
}

#[test]
fn test_from_f64_rejects_non_finite() {
    assert!(Fixed2::from_f64(f64::NAN).is_none());
    assert!(Fixed2::from_f64(f64::INFINITY).is_none());
    assert!(Fixed2::from_f64(f64::NEG_INFINITY).is_none());
    assert!(Fixed2::from_f64(1e300).is_none());
}

#[test]
fn test_parse() {
    assert_eq!("12.3".parse::<Fixed2>().unwrap().hundredths(), 1230);
    assert_eq!("-0.05".parse::<Fixed2>().unwrap().hundredths(), -5);
    assert_eq!("7".parse::<Fixed2>().unwrap().hundredths(), 700);
    assert!("1.234".parse::<Fixed2>().is_err());
    assert!("abc".parse::<Fixed2>().is_err());
    assert!(".5".parse::<Fixed2>().is_err());
}

#[test]
fn test_serializes_as_string_and_none_as_null() {
    let value = Some(Fixed2::from_hundredths(1000));
    assert_eq!(serde_json::to_string(&value).unwrap(), "\"10.00\"");
    let missing: Option<Fixed2> = None;
    assert_eq!(serde_json::to_string(&missing).unwrap(), "null");

    let parsed: Fixed2 = serde_json::from_str("\"-3.20\"").unwrap();
    assert_eq!(parsed.hundredths(), -320);
}

#[test]
fn test_zero_is_not_negative() {
    assert!(!Fixed2::ZERO.is_negative());
    assert!(Fixed2::from_hundredths(-1).is_negative());
}
