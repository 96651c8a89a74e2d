//! Preferred/fallback orchestration of the MinVer tools
//!
//! A run resolves the effective settings, runs the preferred tool and, unless
//! fallback is disabled, runs the other tool once if the preferred one fails.
//! Both runs are sequential and blocking.

use crate::domain::MinVerVersion;
use crate::env::{self, EnvironmentProvider, SystemEnvironment};
use crate::error::{MinVerError, Result};
use crate::settings::{EffectiveSettings, MinVerSettings};
use crate::tool::{MinVerInvoker, ToolInvoker, ToolRun};
use std::sync::Arc;

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct MinVerRun {
    /// The calculated version
    pub version: MinVerVersion,
    /// Name of the tool that produced the version
    pub tool: String,
    /// Exit code of the preferred tool. Non-zero when the fallback produced
    /// the version, so callers can still flag that the preferred tool failed.
    pub exit_code: i32,
    /// Whether the fallback tool produced the version
    pub used_fallback: bool,
}

/// Runs MinVer, preferring one installation and falling back to the other
pub struct MinVerRunner {
    local: Arc<dyn ToolInvoker>,
    global: Arc<dyn ToolInvoker>,
    environment: Arc<dyn EnvironmentProvider>,
}

impl Default for MinVerRunner {
    fn default() -> Self {
        Self::new(
            Arc::new(MinVerInvoker::local()),
            Arc::new(MinVerInvoker::global()),
            Arc::new(SystemEnvironment),
        )
    }
}

impl MinVerRunner {
    /// Create a runner from explicit collaborators
    ///
    /// # Arguments
    /// * `local` - Invoker for the local tool (`dotnet minver`)
    /// * `global` - Invoker for the global tool (`minver` or a tool path)
    /// * `environment` - Source of ambient `MINVER*` variables
    pub fn new(
        local: Arc<dyn ToolInvoker>,
        global: Arc<dyn ToolInvoker>,
        environment: Arc<dyn EnvironmentProvider>,
    ) -> Self {
        MinVerRunner {
            local,
            global,
            environment,
        }
    }

    /// Settings as they will be used for a run, after the environment overlay
    pub fn effective_settings(&self, settings: &MinVerSettings) -> EffectiveSettings {
        env::resolve(
            settings,
            self.environment.as_ref(),
            &settings.environment_variables,
        )
    }

    /// Calculate the version
    ///
    /// # Returns
    /// * `Ok(MinVerVersion)` - Version from the first tool that succeeded
    /// * `Err` - If no tool succeeded or a tool printed an invalid version
    pub fn run(&self, settings: &MinVerSettings) -> Result<MinVerVersion> {
        self.run_detailed(settings).map(|run| run.version)
    }

    /// Calculate the version and report which tool produced it
    ///
    /// # Returns
    /// * `Ok(MinVerRun)` - Version plus the tool and preferred exit code
    /// * `Err(MinVerError::ToolFailed)` - Preferred tool failed and fallback is disabled
    /// * `Err(MinVerError::FallbackExhausted)` - Both tools failed
    /// * `Err(MinVerError::Version)` - A tool exited with 0 but printed no valid version
    pub fn run_detailed(&self, settings: &MinVerSettings) -> Result<MinVerRun> {
        log::debug!("Executing MinVer tool");

        let effective = self.effective_settings(settings);

        let (preferred, fallback) = if effective.prefer_global_tool {
            (&self.global, &self.local)
        } else {
            (&self.local, &self.global)
        };

        let preferred_run = preferred.try_run(&effective)?;
        if preferred_run.succeeded() {
            return Ok(MinVerRun {
                version: version_of(preferred_run, preferred.name())?,
                tool: preferred.name().to_string(),
                exit_code: 0,
                used_fallback: false,
            });
        }

        if effective.no_fallback {
            log::debug!(
                "{}: Process returned an error (exit code {}); fallback disabled.",
                preferred.name(),
                preferred_run.exit_code
            );
            return Err(MinVerError::ToolFailed {
                tool: preferred.name().to_string(),
                exit_code: preferred_run.exit_code,
            });
        }

        let fallback_run = fallback.try_run(&effective)?;
        if fallback_run.succeeded() {
            log::debug!(
                "{}: Process returned an error (exit code {}), but {} executed successfully.",
                preferred.name(),
                preferred_run.exit_code,
                fallback.name()
            );
            return Ok(MinVerRun {
                version: version_of(fallback_run, fallback.name())?,
                tool: fallback.name().to_string(),
                exit_code: preferred_run.exit_code,
                used_fallback: true,
            });
        }

        log::debug!(
            "{}: Process returned an error (exit code {}).",
            preferred.name(),
            preferred_run.exit_code
        );
        log::debug!(
            "{}: Process returned an error (exit code {}).",
            fallback.name(),
            fallback_run.exit_code
        );

        Err(MinVerError::FallbackExhausted {
            preferred: preferred.name().to_string(),
            preferred_exit_code: preferred_run.exit_code,
            fallback: fallback.name().to_string(),
            fallback_exit_code: fallback_run.exit_code,
        })
    }
}

fn version_of(run: ToolRun, tool: &str) -> Result<MinVerVersion> {
    run.version
        .ok_or_else(|| MinVerError::version(format!("{} reported success without a version", tool)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvironment;
    use crate::tool::{ExecutionSequence, MockTool};

    const LOCAL_OUTPUT: &[&str] = &[
        "MinVer: Using { Commit: d34db33, Tag: 'v5.0.0', Version: 5.0.0, Height: 8 }.",
        "MinVer: Calculated version 5.0.1-alpha.0.8.",
        "5.0.1-alpha.0.8",
    ];
    const GLOBAL_OUTPUT: &[&str] = &["1.2.3-preview.0.4"];

    fn runner(local: &Arc<MockTool>, global: &Arc<MockTool>) -> MinVerRunner {
        MinVerRunner::new(
            local.clone(),
            global.clone(),
            Arc::new(MapEnvironment::new()),
        )
    }

    #[test]
    fn test_runs_local_tool_first_by_default() {
        let seq = ExecutionSequence::new();
        let local = Arc::new(MockTool::new("local", 0, LOCAL_OUTPUT, seq.clone()));
        let global = Arc::new(MockTool::new("global", 0, GLOBAL_OUTPUT, seq));

        let run = runner(&local, &global)
            .run_detailed(&MinVerSettings::new())
            .unwrap();

        assert_eq!(run.version.raw(), "5.0.1-alpha.0.8");
        assert_eq!(run.tool, "local");
        assert_eq!(run.exit_code, 0);
        assert!(!run.used_fallback);
        assert_eq!(local.call_count(), 1);
        assert_eq!(global.call_count(), 0);
    }

    #[test]
    fn test_fallback_reports_preferred_exit_code() {
        let seq = ExecutionSequence::new();
        let local = Arc::new(MockTool::new("local", 4, &[], seq.clone()));
        let global = Arc::new(MockTool::new("global", 0, GLOBAL_OUTPUT, seq));

        let run = runner(&local, &global)
            .run_detailed(&MinVerSettings::new())
            .unwrap();

        assert_eq!(run.version.raw(), "1.2.3-preview.0.4");
        assert_eq!(run.tool, "global");
        assert_eq!(run.exit_code, 4);
        assert!(run.used_fallback);
    }

    #[test]
    fn test_parse_failure_is_not_retried() {
        let seq = ExecutionSequence::new();
        let local = Arc::new(MockTool::new("local", 0, &["not a version"], seq.clone()));
        let global = Arc::new(MockTool::new("global", 0, GLOBAL_OUTPUT, seq));

        let err = runner(&local, &global)
            .run(&MinVerSettings::new())
            .unwrap_err();

        assert!(matches!(err, MinVerError::Version(_)));
        assert_eq!(global.call_count(), 0);
    }

    #[test]
    fn test_environment_drives_preference() {
        let seq = ExecutionSequence::new();
        let local = Arc::new(MockTool::new("local", 0, LOCAL_OUTPUT, seq.clone()));
        let global = Arc::new(MockTool::new("global", 0, GLOBAL_OUTPUT, seq));
        let runner = MinVerRunner::new(
            local.clone(),
            global.clone(),
            Arc::new(MapEnvironment::new().with(env::MINVER_PREFER_GLOBAL_TOOL, "true")),
        );

        let version = runner.run(&MinVerSettings::new()).unwrap();
        assert_eq!(version.raw(), "1.2.3-preview.0.4");
        assert_eq!(local.call_count(), 0);
    }

    #[test]
    fn test_effective_settings_are_passed_to_tool() {
        let seq = ExecutionSequence::new();
        let local = Arc::new(MockTool::new("local", 0, LOCAL_OUTPUT, seq.clone()));
        let global = Arc::new(MockTool::new("global", 0, GLOBAL_OUTPUT, seq));
        let settings =
            MinVerSettings::new().with_environment_variable(env::MINVER_TAG_PREFIX, "v");

        runner(&local, &global).run(&settings).unwrap();

        let seen = local.last_settings().unwrap();
        assert_eq!(seen.tag_prefix.as_deref(), Some("v"));
    }
}
