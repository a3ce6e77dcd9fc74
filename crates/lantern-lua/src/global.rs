//! Typed access to one named interpreter global
//!
//! A `Global` pairs one global name with one host type. It caches
//! nothing: every read resolves the global and decodes it fresh, every
//! write encodes and stores fresh, and each access is one balanced
//! stack round trip. The handle borrows its session, so it cannot
//! outlive it, and it is deliberately not `Clone`.

use crate::error::Error;
use crate::session::Session;
use crate::stack::{FromStack, ToStack};
use mlua_sys as ffi;
use std::ffi::CString;
use std::marker::PhantomData;

/// Non-owning (name, type) handle bound to one session.
///
/// # Examples
///
/// ```
/// use lantern_lua::Session;
///
/// let session = Session::new().unwrap();
/// let count = session.global::<i64>("count").unwrap();
/// count.set(3);
/// assert_eq!(count.get(), 3);
/// ```
pub struct Global<'s, T> {
    session: &'s Session,
    name: CString,
    _kind: PhantomData<fn() -> T>,
}

impl<'s, T> Global<'s, T> {
    pub(crate) fn new(session: &'s Session, name: &str) -> Result<Self, Error> {
        Ok(Global {
            session,
            name: CString::new(name)?,
            _kind: PhantomData,
        })
    }

    /// Read the global's current value.
    ///
    /// Decoding is permissive: an unset global is nil and degrades to
    /// `false`/`0`/`""` per the codec rules.
    pub fn get(&self) -> T
    where
        T: FromStack,
    {
        let state = self.session.raw();
        unsafe {
            ffi::lua_getglobal(state, self.name.as_ptr());
            let value = T::from_stack(state, -1);
            ffi::lua_pop(state, 1);
            value
        }
    }

    /// Overwrite the global with `value`.
    pub fn set(&self, value: T)
    where
        T: ToStack,
    {
        let state = self.session.raw();
        unsafe {
            value.push(state);
            ffi::lua_setglobal(state, self.name.as_ptr());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::session::Session;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_are_fresh_not_cached() {
        let session = Session::new().unwrap();
        let value = session.global::<i64>("value").unwrap();
        value.set(1);
        assert_eq!(value.get(), 1);

        // A script-side mutation is visible on the next read.
        session.exec("value = value + 41").unwrap();
        assert_eq!(value.get(), 42);
    }

    #[test]
    fn unset_global_degrades() {
        let session = Session::new().unwrap();
        assert_eq!(session.global::<i64>("missing").unwrap().get(), 0);
        assert!(!session.global::<bool>("missing").unwrap().get());
        assert_eq!(session.global::<String>("missing").unwrap().get(), "");
    }

    #[test]
    fn accesses_leave_the_stack_balanced() {
        let session = Session::new().unwrap();
        let text = session.global::<String>("text").unwrap();
        let before = session.stack_depth();
        text.set(String::from("hello"));
        let _ = text.get();
        assert_eq!(session.stack_depth(), before);
    }
}
