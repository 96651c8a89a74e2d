//! Settings for a MinVer run
//!
//! [`MinVerSettings`] is what the caller (or the settings file) asks for.
//! [`EffectiveSettings`] is the immutable result of overlaying environment
//! variables on top of it, see [`crate::env::resolve`].

use crate::domain::{AutoIncrement, HostVerbosity, Verbosity};
use crate::error::{MinVerError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Explicit settings for a MinVer run.
///
/// Every field is optional; unset fields may still be filled from `MINVER*`
/// environment variables when the run starts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MinVerSettings {
    pub auto_increment: Option<AutoIncrement>,
    pub build_metadata: Option<String>,
    pub default_pre_release_phase: Option<String>,
    pub minimum_major_minor: Option<String>,
    pub repo: Option<PathBuf>,
    pub tag_prefix: Option<String>,
    pub prefer_global_tool: Option<bool>,
    pub no_fallback: Option<bool>,
    pub verbosity: Option<Verbosity>,
    pub tool_path: Option<PathBuf>,
    pub working_directory: Option<PathBuf>,

    /// Verbosity of the host driving the run, used when `verbosity` is unset
    #[serde(skip)]
    pub host_verbosity: Option<HostVerbosity>,

    /// Per-call environment variables. They take precedence over the process
    /// environment when resolving settings and are passed to the tool process.
    #[serde(rename = "env")]
    pub environment_variables: HashMap<String, String>,
}

fn non_blank(name: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(MinVerError::invalid_argument(format!(
            "{} cannot be empty or whitespace",
            name
        )));
    }
    Ok(value)
}

impl MinVerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_increment(mut self, auto_increment: AutoIncrement) -> Self {
        self.auto_increment = Some(auto_increment);
        self
    }

    /// Set the build metadata appended by MinVer
    ///
    /// # Returns
    /// * `Err(MinVerError::InvalidArgument)` - If the value is blank
    pub fn with_build_metadata(mut self, build_metadata: impl Into<String>) -> Result<Self> {
        self.build_metadata = Some(non_blank("build metadata", build_metadata)?);
        Ok(self)
    }

    /// Set the pre-release phase used when none can be derived from tags
    ///
    /// # Returns
    /// * `Err(MinVerError::InvalidArgument)` - If the value is blank
    pub fn with_default_pre_release_phase(mut self, phase: impl Into<String>) -> Result<Self> {
        self.default_pre_release_phase = Some(non_blank("default pre-release phase", phase)?);
        Ok(self)
    }

    /// Set the `major.minor` floor
    ///
    /// # Returns
    /// * `Err(MinVerError::InvalidArgument)` - If the value is blank
    pub fn with_minimum_major_minor(mut self, minimum: impl Into<String>) -> Result<Self> {
        self.minimum_major_minor = Some(non_blank("minimum major minor", minimum)?);
        Ok(self)
    }

    pub fn with_repo(mut self, repo: impl Into<PathBuf>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Set the prefix MinVer strips when matching tags
    ///
    /// # Returns
    /// * `Err(MinVerError::InvalidArgument)` - If the value is blank
    pub fn with_tag_prefix(mut self, tag_prefix: impl Into<String>) -> Result<Self> {
        self.tag_prefix = Some(non_blank("tag prefix", tag_prefix)?);
        Ok(self)
    }

    pub fn with_prefer_global_tool(mut self) -> Self {
        self.prefer_global_tool = Some(true);
        self
    }

    pub fn with_no_fallback(mut self) -> Self {
        self.no_fallback = Some(true);
        self
    }

    /// Run this exact MinVer binary. Implies global tool and no fallback.
    pub fn with_tool_path(mut self, tool_path: impl Into<PathBuf>) -> Self {
        self.tool_path = Some(tool_path.into());
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }

    pub fn with_host_verbosity(mut self, host_verbosity: HostVerbosity) -> Self {
        self.host_verbosity = Some(host_verbosity);
        self
    }

    /// Run the tool from the given working directory
    pub fn from_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(path.into());
        self
    }

    pub fn with_environment_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.insert(name.into(), value.into());
        self
    }

    /// Fill every unset field from `base`.
    ///
    /// Environment variable maps are merged, entries in `self` winning.
    pub fn layered_over(self, base: MinVerSettings) -> MinVerSettings {
        let mut environment_variables = base.environment_variables;
        environment_variables.extend(self.environment_variables);

        MinVerSettings {
            auto_increment: self.auto_increment.or(base.auto_increment),
            build_metadata: self.build_metadata.or(base.build_metadata),
            default_pre_release_phase: self
                .default_pre_release_phase
                .or(base.default_pre_release_phase),
            minimum_major_minor: self.minimum_major_minor.or(base.minimum_major_minor),
            repo: self.repo.or(base.repo),
            tag_prefix: self.tag_prefix.or(base.tag_prefix),
            prefer_global_tool: self.prefer_global_tool.or(base.prefer_global_tool),
            no_fallback: self.no_fallback.or(base.no_fallback),
            verbosity: self.verbosity.or(base.verbosity),
            tool_path: self.tool_path.or(base.tool_path),
            working_directory: self.working_directory.or(base.working_directory),
            host_verbosity: self.host_verbosity.or(base.host_verbosity),
            environment_variables,
        }
    }
}

/// Settings after the environment overlay has been applied.
///
/// Built by [`crate::env::resolve`]; never mutated afterwards. When
/// `tool_path` is set, `prefer_global_tool` and `no_fallback` are both true.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveSettings {
    pub auto_increment: Option<AutoIncrement>,
    pub build_metadata: Option<String>,
    pub default_pre_release_phase: Option<String>,
    pub minimum_major_minor: Option<String>,
    pub repo: Option<PathBuf>,
    pub tag_prefix: Option<String>,
    pub prefer_global_tool: bool,
    pub no_fallback: bool,
    pub verbosity: Option<Verbosity>,
    pub host_verbosity: Option<HostVerbosity>,
    pub tool_path: Option<PathBuf>,
    pub working_directory: Option<PathBuf>,
    pub environment_variables: HashMap<String, String>,
}
