//! Native thunk generation for host function pointers
//!
//! `NativeFunction` is implemented for plain `fn` pointers of arity 0
//! through 6 whose parameters decode from the stack and whose return
//! encodes back onto it. Registering one wraps it in a trampoline
//! monomorphized for that exact signature, matching the interpreter's
//! native-callback convention: read the declared arguments from stack
//! slots 1..=N, run the host function, and report how many result slots
//! were pushed (0 for a `()` return, 1 otherwise). There is no runtime
//! branching on arity or type and no per-call allocation beyond what
//! text decoding requires.
//!
//! Argument decoding is permissive and cannot fail; a wrong-typed slot
//! degrades per the codec rules in `stack`. A panic in the host
//! function is caught at the boundary and re-raised as an interpreter
//! error, so the surrounding protected call reports it as
//! `Error::Script` instead of unwinding into foreign frames.
//!
//! Functions are registered by value: the pointer identity is fixed at
//! registration and rides in a light-userdata upvalue of the generated
//! closure. Arity 7+ is not expressible; there is no impl to call.

use crate::stack::{FromStack, ToStack};
use mlua_sys as ffi;
use std::os::raw::{c_char, c_int, c_void};
use std::panic::{self, AssertUnwindSafe};

/// Return channel of a native thunk: pushes zero or one result slots
/// and reports the count.
pub trait CallReturn {
    /// Encode the host return value per the native-callback convention.
    ///
    /// # Safety
    ///
    /// `state` must be a live interpreter handle with room for one more
    /// slot.
    unsafe fn push_results(self, state: *mut ffi::lua_State) -> c_int;
}

impl CallReturn for () {
    unsafe fn push_results(self, _state: *mut ffi::lua_State) -> c_int {
        0
    }
}

macro_rules! scalar_return {
    ($($kind:ty),* $(,)?) => {$(
        impl CallReturn for $kind {
            unsafe fn push_results(self, state: *mut ffi::lua_State) -> c_int {
                ToStack::push(self, state);
                1
            }
        }
    )*};
}

scalar_return!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, String, &'static str);

/// A host function pointer the interpreter can call through a generated
/// thunk. Implemented for `fn` pointers of arity 0..=6.
///
/// Function items do not coerce to pointers under generic inference, so
/// registration sites spell the signature out:
///
/// ```no_run
/// # use lantern_lua::Session;
/// fn add(a: i64, b: i64) -> i64 { a + b }
///
/// let session = Session::new().unwrap();
/// session.register_function("add", add as fn(i64, i64) -> i64).unwrap();
/// ```
pub trait NativeFunction: Copy + 'static {
    /// Decode arguments from slots 1..=N, call the host function, and
    /// encode the result.
    ///
    /// # Safety
    ///
    /// Must only run inside the interpreter's native-callback
    /// convention, with this function's declared arguments occupying
    /// the bottom of the current call frame's stack.
    unsafe fn invoke(self, state: *mut ffi::lua_State) -> c_int;
}

macro_rules! native_function {
    ($($param:ident @ $slot:expr),*) => {
        impl<Ret, $($param,)*> NativeFunction for fn($($param),*) -> Ret
        where
            Ret: CallReturn + 'static,
            $($param: FromStack + 'static,)*
        {
            unsafe fn invoke(self, state: *mut ffi::lua_State) -> c_int {
                // Call-argument evaluation decodes slot 1 first, so the
                // host sees its parameters in declared order.
                let out = self($($param::from_stack(state, $slot)),*);
                out.push_results(state)
            }
        }
    };
}

native_function!();
native_function!(P0 @ 1);
native_function!(P0 @ 1, P1 @ 2);
native_function!(P0 @ 1, P1 @ 2, P2 @ 3);
native_function!(P0 @ 1, P1 @ 2, P2 @ 3, P3 @ 4);
native_function!(P0 @ 1, P1 @ 2, P2 @ 3, P3 @ 4, P4 @ 5);
native_function!(P0 @ 1, P1 @ 2, P2 @ 3, P3 @ 4, P4 @ 5, P5 @ 6);

/// The single callback shape the interpreter invokes. Monomorphized per
/// registered signature; recovers the host fn pointer from its upvalue.
pub(crate) unsafe extern "C-unwind" fn trampoline<F: NativeFunction>(
    state: *mut ffi::lua_State,
) -> c_int {
    let raw = ffi::lua_touserdata(state, ffi::lua_upvalueindex(1));
    let function = std::mem::transmute_copy::<*mut c_void, F>(&raw);
    match panic::catch_unwind(AssertUnwindSafe(|| unsafe { function.invoke(state) })) {
        Ok(pushed) => pushed,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            ffi::lua_pushlstring(state, message.as_ptr() as *const c_char, message.len());
            // lua_error does not return; release the Rust-side buffers
            // before the jump.
            drop(message);
            drop(payload);
            ffi::lua_error(state)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        format!("native function panicked: {text}")
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("native function panicked: {text}")
    } else {
        String::from("native function panicked")
    }
}
