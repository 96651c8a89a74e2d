//! MinVer tool invocation
//!
//! MinVer can be installed two ways, and both are run the same way apart from
//! how the binary is located:
//!
//! - **local tool**: `dotnet minver ...`, resolved through the .NET SDK from the
//!   repository's tool manifest
//! - **global tool**: `minver ...` found on `PATH`, or the exact binary given
//!   as a tool path
//!
//! The [ToolInvoker] trait is the seam the runner depends on. The concrete
//! implementations are:
//!
//! - [invoker::MinVerInvoker]: spawns the real process, configured by a
//!   [invoker::ToolDescriptor]
//! - [mock::MockTool]: canned results for testing the runner

pub mod args;
pub mod command;
pub mod invoker;
pub mod mock;

pub use command::{ProcessOutput, ProcessRunner, SystemProcessRunner, ToolCommand};
pub use invoker::{MinVerInvoker, ToolDescriptor, ToolKind};
pub use mock::{ExecutionSequence, MockTool};

use crate::domain::MinVerVersion;
use crate::error::Result;
use crate::settings::EffectiveSettings;

/// Outcome of one attempt to run MinVer
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRun {
    /// Process exit code; launch failures are reported as 1
    pub exit_code: i32,
    /// Parsed version, present exactly when `exit_code` is 0
    pub version: Option<MinVerVersion>,
}

impl ToolRun {
    pub fn success(version: MinVerVersion) -> Self {
        ToolRun {
            exit_code: 0,
            version: Some(version),
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        ToolRun {
            exit_code,
            version: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// A way of running MinVer.
///
/// ## Error Handling
///
/// Launch errors and non-zero exit codes are not errors: they come back as a
/// failed [ToolRun] so the caller can fall back to another tool. Only a
/// successful run whose output is not a valid version returns `Err`.
pub trait ToolInvoker: Send + Sync {
    /// Display name used in logs and errors
    fn name(&self) -> &str;

    /// Run MinVer once with the given settings
    ///
    /// # Returns
    /// * `Ok(ToolRun)` - Exit code, plus the version when the exit code is 0
    /// * `Err(MinVerError::Version)` - If MinVer succeeded but printed no valid version
    fn try_run(&self, settings: &EffectiveSettings) -> Result<ToolRun>;
}
