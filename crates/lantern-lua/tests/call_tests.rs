//! Call dispatcher tests
//!
//! Drives script-side functions by name from host code: arity coverage,
//! left-to-right argument ordering, typed results, error surfacing, and
//! the stack-balance invariant across mixed success/failure sequences.

use lantern_lua::{Error, Session};
use pretty_assertions::assert_eq;

fn session_with(source: &str) -> Session {
    let session = Session::new().unwrap();
    session.exec(source).unwrap();
    session
}

#[test]
fn zero_argument_call_returns_typed_result() {
    let session = session_with("function fortytwo() return 42 end");
    let result: i64 = session.call("fortytwo", ()).unwrap();
    assert_eq!(result, 42);
}

#[test]
fn six_argument_call_binds_every_parameter() {
    let session = session_with("function sum6(a, b, c, d, e, f) return a + b + c + d + e + f end");
    let result: i64 = session
        .call("sum6", (1i64, 2i64, 3i64, 4i64, 5i64, 6i64))
        .unwrap();
    assert_eq!(result, 21);
}

#[test]
fn arguments_bind_left_to_right() {
    let session = session_with("function concat3(a, b, c) return a .. b .. c end");
    let result: String = session.call("concat3", ("a", "b", "c")).unwrap();
    assert_eq!(result, "abc");
}

#[test]
fn mixed_argument_kinds_encode_correctly() {
    let session = session_with(
        "function blend(flag, n, text)
            if flag then return text .. tostring(n) end
            return text
        end",
    );
    let result: String = session.call("blend", (true, 7i64, "x")).unwrap();
    assert_eq!(result, "x7.0");
}

#[test]
fn void_call_requests_no_results() {
    let session = session_with("count = 0 function bump() count = count + 1 end");
    session.call::<(), _>("bump", ()).unwrap();
    session.call::<(), _>("bump", ()).unwrap();
    assert_eq!(session.get_global::<i64>("count").unwrap(), 2);
}

#[test]
fn host_roundtrip_through_registered_native() {
    // Host -> script -> host: the dispatcher and the thunk generator
    // are two directions of the same bridge.
    fn double(x: i64) -> i64 {
        x * 2
    }

    let session = session_with("function via(x) return double(x) + 1 end");
    session.register_function("double", double as fn(i64) -> i64).unwrap();
    let result: i64 = session.call("via", (20i64,)).unwrap();
    assert_eq!(result, 41);
}

#[test]
fn missing_function_surfaces_script_error() {
    let session = Session::new().unwrap();
    let err = session.call::<i64, _>("no_such_function", ()).unwrap_err();
    match err {
        Error::Script { message } => assert!(!message.is_empty()),
        other => panic!("expected script error, got {other:?}"),
    }
}

#[test]
fn script_raised_error_carries_interpreter_text() {
    let session = session_with("function boom() error('kaboom') end");
    let err = session.call::<(), _>("boom", ()).unwrap_err();
    match err {
        Error::Script { message } => assert!(message.contains("kaboom")),
        other => panic!("expected script error, got {other:?}"),
    }
}

#[test]
fn session_stays_usable_after_failures() {
    let session = session_with("function boom() error('kaboom') end");

    let _ = session.call::<(), _>("boom", ()).unwrap_err();
    let _ = session.call::<i64, _>("still_missing", ()).unwrap_err();

    session.exec("function add(a, b) return a + b end").unwrap();
    let result: i64 = session.call("add", (2i64, 3i64)).unwrap();
    assert_eq!(result, 5);
}

#[test]
fn stack_depth_is_balanced_across_mixed_sequences() {
    let session = session_with(
        "function ok(x) return x end
        function boom() error('kaboom') end",
    );
    let before = session.stack_depth();

    for round in 0..8 {
        let echoed: i64 = session.call("ok", (round as i64,)).unwrap();
        assert_eq!(echoed, round as i64);
        let _ = session.call::<(), _>("boom", ()).unwrap_err();
        let _ = session.call::<i64, _>("missing", ()).unwrap_err();
        session.set_global("g", round as i64).unwrap();
        let _ = session.get_global::<i64>("g").unwrap();
    }

    assert_eq!(session.stack_depth(), before);
}

#[test]
fn non_text_error_values_still_produce_a_message() {
    let session = session_with("function throws_table() error({ code = 3 }) end");
    let err = session.call::<(), _>("throws_table", ()).unwrap_err();
    match err {
        Error::Script { message } => assert!(!message.is_empty()),
        other => panic!("expected script error, got {other:?}"),
    }
}
