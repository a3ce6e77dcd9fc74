//! lantern-lua - typed embedding layer for Lua 5.4
//!
//! This library binds statically-typed Rust host code to an embedded
//! interpreter through its stack-based C API. It provides:
//! - Value codec between Rust scalars and interpreter stack slots
//! - Compile-time-specialized thunks exposing host `fn` pointers to scripts
//! - By-name protected calls into script functions with typed results
//! - Typed read/write handles for interpreter globals
//! - Session lifetime and script compilation wrappers
//!
//! The interpreter itself is an external dependency, built from the
//! vendored Lua 5.4 sources; this crate never reimplements it, only
//! marshals across its boundary.
//!
//! # Examples
//!
//! ```
//! use lantern_lua::Session;
//!
//! fn hypot(a: f64, b: f64) -> f64 {
//!     (a * a + b * b).sqrt()
//! }
//!
//! let session = Session::new().unwrap();
//! session.register_function("hypot", hypot as fn(f64, f64) -> f64).unwrap();
//! session.exec("c = hypot(3, 4)").unwrap();
//! assert_eq!(session.get_global::<f64>("c").unwrap(), 5.0);
//!
//! session.exec("function greet(name) return 'hello ' .. name end").unwrap();
//! let greeting: String = session.call("greet", ("lua",)).unwrap();
//! assert_eq!(greeting, "hello lua");
//! ```

/// Embedding layer version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod call;
pub mod error;
pub mod global;
pub mod native;
pub mod script;
pub mod session;
pub mod stack;

// Re-export commonly used types
pub use call::{CallArguments, CallResult};
pub use error::{Error, Result};
pub use global::Global;
pub use native::{CallReturn, NativeFunction};
pub use script::Chunk;
pub use session::{Session, SessionOptions};
pub use stack::{FromStack, ToStack};
