//! Environment access and the `MINVER*` settings overlay
//!
//! Settings that the caller leaves unset are looked up in environment
//! variables named `MINVER<FIELDNAME>`, first in the per-call override map and
//! then in the process environment. The lookup goes through the
//! [EnvironmentProvider] trait so tests never touch the real environment.

pub mod overlay;

pub use overlay::{resolve, EnvironmentOverlay};

use std::collections::HashMap;

// Variables that translate to MinVer arguments
pub const MINVER_AUTO_INCREMENT: &str = "MINVERAUTOINCREMENT";
pub const MINVER_BUILD_METADATA: &str = "MINVERBUILDMETADATA";
pub const MINVER_DEFAULT_PRE_RELEASE_PHASE: &str = "MINVERDEFAULTPRERELEASEPHASE";
pub const MINVER_MINIMUM_MAJOR_MINOR: &str = "MINVERMINIMUMMAJORMINOR";
pub const MINVER_REPO: &str = "MINVERREPO";
pub const MINVER_TAG_PREFIX: &str = "MINVERTAGPREFIX";
pub const MINVER_VERBOSITY: &str = "MINVERVERBOSITY";

// Variables that change how the runner behaves
pub const MINVER_PREFER_GLOBAL_TOOL: &str = "MINVERPREFERGLOBALTOOL";
pub const MINVER_NO_FALLBACK: &str = "MINVERNOFALLBACK";
pub const MINVER_TOOL_PATH: &str = "MINVERTOOLPATH";

/// Read-only access to ambient environment variables
pub trait EnvironmentProvider: Send + Sync {
    /// Value of the variable, or `None` when it is not set
    fn get(&self, name: &str) -> Option<String>;
}

/// The environment of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory environment, for tests and for callers that sandbox the run
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvironmentProvider for MapEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
