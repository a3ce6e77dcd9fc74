//! Typed argument and result channels for by-name interpreter calls
//!
//! `CallArguments` is implemented for tuples of 0..=6 encodable values,
//! pushed left to right in the order the callee binds its parameters.
//! `CallResult` selects how many result slots a protected call is asked
//! for: `()` requests none, each scalar kind requests exactly one and
//! decodes it from the stack top. The dispatch itself lives on
//! `Session::call`.

use crate::stack::{FromStack, ToStack};
use mlua_sys as ffi;
use std::os::raw::c_int;

/// An argument pack for `Session::call`.
pub trait CallArguments {
    /// Number of stack slots `push_all` produces.
    const COUNT: c_int;

    /// Encode every argument, left to right.
    ///
    /// # Safety
    ///
    /// `state` must be a live interpreter handle with room for `COUNT`
    /// more slots.
    unsafe fn push_all(self, state: *mut ffi::lua_State);
}

impl CallArguments for () {
    const COUNT: c_int = 0;

    unsafe fn push_all(self, _state: *mut ffi::lua_State) {}
}

macro_rules! call_arguments {
    ($count:expr; $($param:ident . $field:tt),+) => {
        impl<$($param: ToStack),+> CallArguments for ($($param,)+) {
            const COUNT: c_int = $count;

            unsafe fn push_all(self, state: *mut ffi::lua_State) {
                $(self.$field.push(state);)+
            }
        }
    };
}

call_arguments!(1; P0.0);
call_arguments!(2; P0.0, P1.1);
call_arguments!(3; P0.0, P1.1, P2.2);
call_arguments!(4; P0.0, P1.1, P2.2, P3.3);
call_arguments!(5; P0.0, P1.1, P2.2, P3.3, P4.4);
call_arguments!(6; P0.0, P1.1, P2.2, P3.3, P4.4, P5.5);

/// The result a caller asks a protected call for.
pub trait CallResult: Sized {
    /// Result slots requested from the interpreter: 0 or 1.
    const NRESULTS: c_int;

    /// Decode and consume whatever a successful call left on the stack.
    ///
    /// # Safety
    ///
    /// `state` must be a live interpreter handle holding exactly
    /// `NRESULTS` fresh result slots on top.
    unsafe fn take(state: *mut ffi::lua_State) -> Self;
}

impl CallResult for () {
    const NRESULTS: c_int = 0;

    unsafe fn take(_state: *mut ffi::lua_State) -> Self {}
}

macro_rules! scalar_result {
    ($($kind:ty),* $(,)?) => {$(
        impl CallResult for $kind {
            const NRESULTS: c_int = 1;

            unsafe fn take(state: *mut ffi::lua_State) -> Self {
                // The fresh return value sits on top; this is the one
                // place the crate reads through a negative index.
                let value = <$kind>::from_stack(state, -1);
                ffi::lua_pop(state, 1);
                value
            }
        }
    )*};
}

scalar_result!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, String);
