//! Codec round-trip and narrowing tests
//!
//! Exercises every scalar kind through the global round trip
//! (encode -> interpreter slot -> decode) and pins down the documented
//! numeric semantics: one double-precision representation for all
//! integer widths, truncation toward zero, modular wrapping.

use lantern_lua::{Session, SessionOptions};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn bool_roundtrip_is_exact() {
    let session = Session::new().unwrap();
    session.set_global("flag", true).unwrap();
    assert!(session.get_global::<bool>("flag").unwrap());
    session.set_global("flag", false).unwrap();
    assert!(!session.get_global::<bool>("flag").unwrap());
}

#[test]
fn text_roundtrip_is_exact() {
    let session = Session::new().unwrap();
    session.set_global("text", "perfectly ordinary text").unwrap();
    assert_eq!(
        session.get_global::<String>("text").unwrap(),
        "perfectly ordinary text"
    );

    // Length-delimited encoding keeps embedded NUL bytes intact.
    session.set_global("text", "a\0b").unwrap();
    assert_eq!(session.get_global::<String>("text").unwrap(), "a\0b");
}

#[test]
fn integer_widths_roundtrip_at_their_extremes() {
    let session = Session::new().unwrap();

    session.set_global("v", i8::MIN).unwrap();
    assert_eq!(session.get_global::<i8>("v").unwrap(), i8::MIN);

    session.set_global("v", u8::MAX).unwrap();
    assert_eq!(session.get_global::<u8>("v").unwrap(), u8::MAX);

    session.set_global("v", i32::MAX).unwrap();
    assert_eq!(session.get_global::<i32>("v").unwrap(), i32::MAX);

    session.set_global("v", u32::MAX).unwrap();
    assert_eq!(session.get_global::<u32>("v").unwrap(), u32::MAX);
}

#[test]
fn integers_are_exact_only_inside_the_double_window() {
    let session = Session::new().unwrap();

    // 2^53 is the last contiguous exactly-representable integer.
    let edge = 1i64 << 53;
    session.set_global("v", edge).unwrap();
    assert_eq!(session.get_global::<i64>("v").unwrap(), edge);

    // One past the edge rounds back onto it: the documented
    // double-truncated approximation, not an error.
    session.set_global("v", edge + 1).unwrap();
    assert_eq!(session.get_global::<i64>("v").unwrap(), edge);
}

#[test]
fn out_of_range_decode_wraps_modulo_width() {
    let session = Session::new().unwrap();

    // u64::MAX widens to the double 2^64, which wraps to 0 on decode.
    session.set_global("v", u64::MAX).unwrap();
    assert_eq!(session.get_global::<u64>("v").unwrap(), 0);

    // A value beyond u8 wraps modulo 256.
    session.set_global("v", 300i64).unwrap();
    assert_eq!(session.get_global::<u8>("v").unwrap(), 44);
}

#[rstest]
#[case(3.9, 3)]
#[case(-3.9, -3)]
#[case(0.999, 0)]
#[case(-0.999, 0)]
fn decode_truncates_toward_zero(#[case] raw: f64, #[case] expected: i32) {
    let session = Session::new().unwrap();
    session.set_global("v", raw).unwrap();
    assert_eq!(session.get_global::<i32>("v").unwrap(), expected);
}

#[test]
fn float_roundtrip_is_exact() {
    let session = Session::new().unwrap();
    session.set_global("v", 0.1f64).unwrap();
    assert_eq!(session.get_global::<f64>("v").unwrap(), 0.1);

    session.set_global("v", 1.5f32).unwrap();
    assert_eq!(session.get_global::<f32>("v").unwrap(), 1.5);
}

#[test]
fn widths_collapse_on_the_interpreter_side() {
    let session = Session::new().unwrap();

    // The slot carries a number, nothing more; any integer kind can
    // read it back.
    session.set_global("v", 42u8).unwrap();
    assert_eq!(session.get_global::<i64>("v").unwrap(), 42);
    assert_eq!(session.get_global::<u16>("v").unwrap(), 42);
    assert_eq!(session.get_global::<f64>("v").unwrap(), 42.0);
}

fn bare_session() -> Session {
    // No stdlib: cheaper per-case setup for the property tests.
    Session::with_options(SessionOptions { stdlib: false }).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn i64_roundtrips_exactly_inside_the_safe_window(
        value in -(1i64 << 53)..=(1i64 << 53),
    ) {
        let session = bare_session();
        session.set_global("v", value).unwrap();
        prop_assert_eq!(session.get_global::<i64>("v").unwrap(), value);
    }

    #[test]
    fn f64_roundtrips_exactly(value in -1.0e300f64..1.0e300f64) {
        let session = bare_session();
        session.set_global("v", value).unwrap();
        prop_assert_eq!(session.get_global::<f64>("v").unwrap(), value);
    }

    #[test]
    fn text_roundtrips_exactly(value in "\\PC*") {
        let session = bare_session();
        session.set_global("v", value.as_str()).unwrap();
        prop_assert_eq!(session.get_global::<String>("v").unwrap(), value);
    }
}
