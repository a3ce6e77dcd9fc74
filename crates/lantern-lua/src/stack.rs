//! Value codec between Rust scalars and interpreter stack slots
//!
//! Provides traits for bidirectional conversion:
//! - `ToStack` - push one Rust value as exactly one stack slot
//! - `FromStack` - read the slot at an index into a Rust value
//!
//! Decoding is permissive: it follows the interpreter's own conversion
//! rules and never fails. A wrong-typed slot produces the degraded value
//! the C API produces (`0`, `false`, or `""`), not an error.
//!
//! All numeric kinds share the interpreter's double-precision
//! representation. Integers widen to `f64` on encode (lossy above
//! ±2^53) and decode by truncation toward zero, wrapping modulo the
//! target width. Round trips therefore do not preserve width or
//! signedness distinctions, only the numeric value the double can hold.

use mlua_sys as ffi;
use std::os::raw::{c_char, c_int};

/// Convert a Rust value into a single interpreter stack slot.
///
/// Implemented for the closed scalar set: `bool`, the sized integers,
/// `f32`/`f64`, and text (`&str`, `String`). Anything else is a
/// compile-time error at the call site.
pub trait ToStack {
    /// Push `self` onto the stack as one slot.
    ///
    /// # Safety
    ///
    /// `state` must be a live interpreter handle with room for one more
    /// slot.
    unsafe fn push(self, state: *mut ffi::lua_State);
}

/// Convert the interpreter stack slot at `index` into a Rust value.
///
/// Positive indices count from the stack bottom (1 = first argument);
/// `-1` addresses the top. The slot is read, not consumed.
pub trait FromStack: Sized {
    /// Read the slot at `index`.
    ///
    /// # Safety
    ///
    /// `state` must be a live interpreter handle and `index` must
    /// address a valid slot.
    unsafe fn from_stack(state: *mut ffi::lua_State, index: c_int) -> Self;
}

// Implementations for bool

impl ToStack for bool {
    unsafe fn push(self, state: *mut ffi::lua_State) {
        ffi::lua_pushboolean(state, c_int::from(self));
    }
}

impl FromStack for bool {
    unsafe fn from_stack(state: *mut ffi::lua_State, index: c_int) -> Self {
        // false and nil are the only falsy slots; 0 and "" decode true.
        ffi::lua_toboolean(state, index) != 0
    }
}

// Implementations for the integer kinds
//
// Encode always goes through lua_pushnumber: one numeric representation
// for every width, as the interpreter sees it.

macro_rules! integer_codec {
    ($($kind:ty),* $(,)?) => {$(
        impl ToStack for $kind {
            unsafe fn push(self, state: *mut ffi::lua_State) {
                ffi::lua_pushnumber(state, self as ffi::lua_Number);
            }
        }

        impl FromStack for $kind {
            unsafe fn from_stack(state: *mut ffi::lua_State, index: c_int) -> Self {
                // Truncate toward zero, then wrap modulo the target width.
                // NaN and non-numeric slots decode to 0.
                ffi::lua_tonumberx(state, index, std::ptr::null_mut()) as i128 as $kind
            }
        }
    )*};
}

integer_codec!(i8, i16, i32, i64, u8, u16, u32, u64);

// Implementations for the float kinds

impl ToStack for f64 {
    unsafe fn push(self, state: *mut ffi::lua_State) {
        ffi::lua_pushnumber(state, self);
    }
}

impl FromStack for f64 {
    unsafe fn from_stack(state: *mut ffi::lua_State, index: c_int) -> Self {
        ffi::lua_tonumberx(state, index, std::ptr::null_mut())
    }
}

impl ToStack for f32 {
    unsafe fn push(self, state: *mut ffi::lua_State) {
        ffi::lua_pushnumber(state, self as ffi::lua_Number);
    }
}

impl FromStack for f32 {
    unsafe fn from_stack(state: *mut ffi::lua_State, index: c_int) -> Self {
        ffi::lua_tonumberx(state, index, std::ptr::null_mut()) as f32
    }
}

// Implementations for text
//
// Encoding is length-delimited, so embedded NUL bytes survive the trip.
// The decode buffer belongs to the interpreter and is only valid until
// the next stack mutation; `from_stack` copies it out before returning,
// which is why the decoded form is an owned `String` rather than a
// borrowed view.

impl ToStack for &str {
    unsafe fn push(self, state: *mut ffi::lua_State) {
        ffi::lua_pushlstring(state, self.as_ptr() as *const c_char, self.len());
    }
}

impl ToStack for String {
    unsafe fn push(self, state: *mut ffi::lua_State) {
        ToStack::push(self.as_str(), state);
    }
}

impl ToStack for &String {
    unsafe fn push(self, state: *mut ffi::lua_State) {
        ToStack::push(self.as_str(), state);
    }
}

impl FromStack for String {
    unsafe fn from_stack(state: *mut ffi::lua_State, index: c_int) -> Self {
        let mut len = 0usize;
        // Converts a numeric slot to its text form in place; returns
        // null for anything that is neither text nor a number.
        let ptr = ffi::lua_tolstring(state, index, &mut len);
        if ptr.is_null() {
            return String::new();
        }
        let bytes = std::slice::from_raw_parts(ptr as *const u8, len);
        String::from_utf8_lossy(bytes).into_owned()
    }
}
