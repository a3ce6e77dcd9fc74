//! Project configuration (lantern.toml)
//!
//! Two sections, both optional:
//! - `[session]` - options forwarded to `Session::with_options`
//! - `[globals]` - values seeded into the interpreter before any script
//!   runs; booleans, integers, floats, and text are accepted
//!
//! An explicit `--config` path must exist and parse; without the flag,
//! a `lantern.toml` in the current directory is picked up when present.

use anyhow::{Context, Result};
use lantern_lua::{Session, SessionOptions};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "lantern.toml";

/// Parsed project configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub session: SessionOptions,
    pub globals: BTreeMap<String, GlobalValue>,
}

/// A pre-seeded global value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GlobalValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ProjectConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Seed every configured global into the session.
    pub fn apply_globals(&self, session: &Session) -> Result<()> {
        for (name, value) in &self.globals {
            match value {
                GlobalValue::Bool(flag) => session.set_global(name, *flag)?,
                GlobalValue::Int(number) => session.set_global(name, *number)?,
                GlobalValue::Float(number) => session.set_global(name, *number)?,
                GlobalValue::Text(text) => session.set_global(name, text.as_str())?,
            }
        }
        Ok(())
    }
}
