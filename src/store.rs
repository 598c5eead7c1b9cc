//! Script storage.
//!
//! Scripts are addressed by file name (`payload1.dd`, `lib/login.dd`, ...).
//! The firmware keeps them in flash; [`MemoryStore`] backs host builds and
//! tests.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};

#[allow(async_fn_in_trait)]
pub trait ScriptStore {
    /// Names of every stored script.
    async fn names(&mut self) -> Vec<String>;

    /// Full text of `name`, if stored.
    async fn load(&mut self, name: &str) -> Option<String>;

    /// Create or replace `name`.
    async fn save(&mut self, name: &str, text: &str) -> Result<()>;
}

/// RAM-backed store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    scripts: BTreeMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write (like a flash area mounted read-only).
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Builder-style insert that ignores the read-only flag.
    pub fn with(mut self, name: &str, text: &str) -> Self {
        self.scripts.insert(name.into(), text.into());
        self
    }
}

impl ScriptStore for MemoryStore {
    async fn names(&mut self) -> Vec<String> {
        self.scripts.keys().cloned().collect()
    }

    async fn load(&mut self, name: &str) -> Option<String> {
        self.scripts.get(name).cloned()
    }

    async fn save(&mut self, name: &str, text: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::StoreNotWritable);
        }
        self.scripts.insert(name.into(), text.into());
        Ok(())
    }
}
