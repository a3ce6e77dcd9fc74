//! Interpreter session: owns the raw state and fronts every operation
//!
//! A `Session` wraps one embedded interpreter instance. Dropping it
//! closes the state. Every public operation is a single request/response
//! cycle against the interpreter stack and leaves the stack depth
//! unchanged, success or failure.
//!
//! # Examples
//!
//! ```
//! use lantern_lua::Session;
//!
//! fn add(a: i64, b: i64) -> i64 {
//!     a + b
//! }
//!
//! let session = Session::new().unwrap();
//! session.register_function("add", add as fn(i64, i64) -> i64).unwrap();
//! session.exec("total = add(2, 3)").unwrap();
//! assert_eq!(session.get_global::<i64>("total").unwrap(), 5);
//! ```

use crate::call::{CallArguments, CallResult};
use crate::error::Error;
use crate::global::Global;
use crate::native::{trampoline, NativeFunction};
use crate::script::Chunk;
use crate::stack::{FromStack, ToStack};
use mlua_sys as ffi;
use serde::{Deserialize, Serialize};
use std::ffi::CString;
use std::os::raw::c_void;
use tracing::{debug, trace};

/// Session construction options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionOptions {
    /// Open the interpreter's standard libraries on creation.
    pub stdlib: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { stdlib: true }
    }
}

/// An embedded interpreter instance.
///
/// Holds the only handle to the underlying state. The raw-pointer field
/// keeps the type `!Send`/`!Sync`: one session serves exactly one
/// thread, and at most one call sequence is ever in flight against its
/// stack.
pub struct Session {
    raw: *mut ffi::lua_State,
}

impl Session {
    /// Create a session with the standard libraries opened.
    pub fn new() -> Result<Self, Error> {
        Self::with_options(SessionOptions::default())
    }

    /// Create a session with explicit options.
    pub fn with_options(options: SessionOptions) -> Result<Self, Error> {
        let raw = unsafe { ffi::luaL_newstate() };
        if raw.is_null() {
            return Err(Error::SessionCreation);
        }
        if options.stdlib {
            unsafe { ffi::luaL_openlibs(raw) };
        }
        debug!(stdlib = options.stdlib, "created interpreter session");
        Ok(Session { raw })
    }

    /// Current interpreter stack depth.
    ///
    /// Diagnostic: every public operation on this type returns the
    /// depth to its prior value, so sequences of calls can assert
    /// balance around themselves.
    pub fn stack_depth(&self) -> usize {
        (unsafe { ffi::lua_gettop(self.raw) }) as usize
    }

    pub(crate) fn raw(&self) -> *mut ffi::lua_State {
        self.raw
    }

    /// Publish a host function pointer as an interpreter global.
    ///
    /// The thunk is specialized at compile time for the pointer's exact
    /// signature; script-side calls decode arguments permissively and
    /// encode the single return value, if any.
    pub fn register_function<F>(&self, name: &str, function: F) -> Result<(), Error>
    where
        F: NativeFunction,
    {
        let cname = CString::new(name)?;
        unsafe {
            let identity = std::mem::transmute_copy::<F, *mut c_void>(&function);
            ffi::lua_pushlightuserdata(self.raw, identity);
            ffi::lua_pushcclosure(self.raw, trampoline::<F>, 1);
            ffi::lua_setglobal(self.raw, cname.as_ptr());
        }
        trace!(name, "registered native function");
        Ok(())
    }

    /// Invoke the interpreter-side global function `name` under a
    /// protected call.
    ///
    /// Arguments are encoded left to right; `R` selects whether one
    /// result is decoded (`()` requests none). Failures inside the
    /// interpreter surface as `Error::Script` carrying the error text,
    /// and the session stays usable.
    ///
    /// # Examples
    ///
    /// ```
    /// use lantern_lua::Session;
    ///
    /// let session = Session::new().unwrap();
    /// session.exec("function add(a, b) return a + b end").unwrap();
    /// let sum: i64 = session.call("add", (40i64, 2i64)).unwrap();
    /// assert_eq!(sum, 42);
    /// ```
    pub fn call<R, A>(&self, name: &str, args: A) -> Result<R, Error>
    where
        R: CallResult,
        A: CallArguments,
    {
        let cname = CString::new(name)?;
        trace!(name, nargs = A::COUNT, "dispatching interpreter call");
        unsafe {
            ffi::lua_getglobal(self.raw, cname.as_ptr());
            args.push_all(self.raw);
            let status = ffi::lua_pcall(self.raw, A::COUNT, R::NRESULTS, 0);
            if status != ffi::LUA_OK {
                return Err(Error::Script {
                    message: pop_error_message(self.raw),
                });
            }
            Ok(R::take(self.raw))
        }
    }

    /// Typed handle to the global `name`. See `Global`.
    pub fn global<T>(&self, name: &str) -> Result<Global<'_, T>, Error> {
        Global::new(self, name)
    }

    /// Write one global; shorthand for `global(name)?.set(value)`.
    pub fn set_global<T: ToStack>(&self, name: &str, value: T) -> Result<(), Error> {
        self.global::<T>(name).map(|global| global.set(value))
    }

    /// Read one global; shorthand for `global(name)?.get()`.
    pub fn get_global<T: FromStack>(&self, name: &str) -> Result<T, Error> {
        self.global::<T>(name).map(|global| global.get())
    }

    /// Compile `source` into a re-runnable chunk. See `Chunk`.
    pub fn load(&self, source: &str, chunk_name: &str) -> Result<Chunk<'_>, Error> {
        Chunk::load(self, source, chunk_name)
    }

    /// Compile and run `source` once.
    pub fn exec(&self, source: &str) -> Result<(), Error> {
        self.load(source, "exec")?.run()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        unsafe { ffi::lua_close(self.raw) };
    }
}

/// Pop the single error value a failed load or protected call leaves on
/// top of the stack, returning its text.
///
/// Exactly one slot is consumed, keeping the stack balanced on the
/// failure path. Non-textual error values (the interpreter permits any
/// value as an error object) yield a placeholder so the surfaced
/// message is never empty.
pub(crate) unsafe fn pop_error_message(state: *mut ffi::lua_State) -> String {
    let message = String::from_stack(state, -1);
    ffi::lua_pop(state, 1);
    if message.is_empty() {
        String::from("interpreter error with a non-text error value")
    } else {
        message
    }
}
