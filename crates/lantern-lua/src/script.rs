//! Script compilation and protected execution
//!
//! `Session::load` compiles a source buffer into a chunk parked in the
//! interpreter registry, so one compilation can run any number of
//! times. Load and run failures both surface the interpreter's error
//! text as `Error::Script` and leave the stack balanced; the session
//! stays usable either way.

use crate::error::Error;
use crate::session::{pop_error_message, Session};
use mlua_sys as ffi;
use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use tracing::debug;

/// A compiled script bound to the session that compiled it.
///
/// The registry reference is released on drop.
pub struct Chunk<'s> {
    session: &'s Session,
    key: c_int,
}

impl<'s> Chunk<'s> {
    pub(crate) fn load(
        session: &'s Session,
        source: &str,
        chunk_name: &str,
    ) -> Result<Self, Error> {
        let name = CString::new(chunk_name)?;
        let state = session.raw();
        unsafe {
            let status = ffi::luaL_loadbufferx(
                state,
                source.as_ptr() as *const c_char,
                source.len(),
                name.as_ptr(),
                std::ptr::null(),
            );
            if status != ffi::LUA_OK {
                return Err(Error::Script {
                    message: pop_error_message(state),
                });
            }
            // Move the compiled chunk off the stack into the registry.
            let key = ffi::luaL_ref(state, ffi::LUA_REGISTRYINDEX);
            debug!(chunk = chunk_name, bytes = source.len(), "loaded script");
            Ok(Chunk { session, key })
        }
    }

    /// Run the chunk under a protected call.
    pub fn run(&self) -> Result<(), Error> {
        let state = self.session.raw();
        unsafe {
            ffi::lua_rawgeti(state, ffi::LUA_REGISTRYINDEX, self.key as ffi::lua_Integer);
            let status = ffi::lua_pcall(state, 0, 0, 0);
            if status != ffi::LUA_OK {
                return Err(Error::Script {
                    message: pop_error_message(state),
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Chunk<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk").field("key", &self.key).finish()
    }
}

impl Drop for Chunk<'_> {
    fn drop(&mut self) {
        unsafe { ffi::luaL_unref(self.session.raw(), ffi::LUA_REGISTRYINDEX, self.key) };
    }
}
