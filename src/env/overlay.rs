use crate::env::{
    EnvironmentProvider, MINVER_AUTO_INCREMENT, MINVER_BUILD_METADATA,
    MINVER_DEFAULT_PRE_RELEASE_PHASE, MINVER_MINIMUM_MAJOR_MINOR, MINVER_NO_FALLBACK,
    MINVER_PREFER_GLOBAL_TOOL, MINVER_REPO, MINVER_TAG_PREFIX, MINVER_TOOL_PATH,
    MINVER_VERBOSITY,
};
use crate::settings::{EffectiveSettings, MinVerSettings};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

/// Typed lookup of `MINVER*` variables across the per-call overrides and the
/// ambient environment.
///
/// A non-blank override wins over the ambient value; blank values count as
/// unset. Typed getters return `None` for values they cannot parse.
pub struct EnvironmentOverlay<'a> {
    overrides: &'a HashMap<String, String>,
    environment: &'a dyn EnvironmentProvider,
}

impl<'a> EnvironmentOverlay<'a> {
    pub fn new(
        overrides: &'a HashMap<String, String>,
        environment: &'a dyn EnvironmentProvider,
    ) -> Self {
        EnvironmentOverlay {
            overrides,
            environment,
        }
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(name).filter(|v| !is_blank(v)) {
            return Some(value.clone());
        }
        self.environment.get(name).filter(|v| !is_blank(v))
    }

    /// Accepts `1`/`true`/`yes` and `0`/`false`/`no`, case-insensitively
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        let value = self.get_string(name)?;
        match value.to_lowercase().as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        }
    }

    /// Parses through the enum's case-insensitive [`FromStr`] implementation
    pub fn get_enum<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get_string(name)?.parse().ok()
    }

    pub fn get_path(&self, name: &str) -> Option<PathBuf> {
        self.get_string(name).map(PathBuf::from)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !is_blank(v)).cloned()
}

/// Resolve the settings for one run.
///
/// For each field the explicit value wins when set (and non-blank), then the
/// `overrides` map, then `environment`, else the field stays unset. A tool path
/// from any source forces `prefer_global_tool` and `no_fallback` to `true`.
///
/// # Arguments
/// * `settings` - Explicit settings from the caller
/// * `environment` - Ambient environment lookup
/// * `overrides` - Per-call environment variable overrides
pub fn resolve(
    settings: &MinVerSettings,
    environment: &dyn EnvironmentProvider,
    overrides: &HashMap<String, String>,
) -> EffectiveSettings {
    let overlay = EnvironmentOverlay::new(overrides, environment);

    let tool_path = settings
        .tool_path
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| overlay.get_path(MINVER_TOOL_PATH));

    let mut prefer_global_tool = settings
        .prefer_global_tool
        .or_else(|| overlay.get_bool(MINVER_PREFER_GLOBAL_TOOL))
        .unwrap_or(false);
    let mut no_fallback = settings
        .no_fallback
        .or_else(|| overlay.get_bool(MINVER_NO_FALLBACK))
        .unwrap_or(false);

    // A tool path names one exact binary, run as a global tool with no substitute.
    if tool_path.is_some() {
        prefer_global_tool = true;
        no_fallback = true;
    }

    EffectiveSettings {
        auto_increment: settings
            .auto_increment
            .or_else(|| overlay.get_enum(MINVER_AUTO_INCREMENT)),
        build_metadata: non_blank(&settings.build_metadata)
            .or_else(|| overlay.get_string(MINVER_BUILD_METADATA)),
        default_pre_release_phase: non_blank(&settings.default_pre_release_phase)
            .or_else(|| overlay.get_string(MINVER_DEFAULT_PRE_RELEASE_PHASE)),
        minimum_major_minor: non_blank(&settings.minimum_major_minor)
            .or_else(|| overlay.get_string(MINVER_MINIMUM_MAJOR_MINOR)),
        repo: settings
            .repo
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| overlay.get_path(MINVER_REPO)),
        tag_prefix: non_blank(&settings.tag_prefix)
            .or_else(|| overlay.get_string(MINVER_TAG_PREFIX)),
        prefer_global_tool,
        no_fallback,
        verbosity: settings
            .verbosity
            .or_else(|| overlay.get_enum(MINVER_VERBOSITY)),
        host_verbosity: settings.host_verbosity,
        tool_path,
        working_directory: settings.working_directory.clone(),
        environment_variables: overrides.clone(),
    }
}
