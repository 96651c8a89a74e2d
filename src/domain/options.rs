//! Enumerated MinVer options
//!
//! All of them parse case-insensitively from their lowercase names, which is
//! how they appear on the MinVer command line and in `MINVER*` variables.

use crate::error::{MinVerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which version component MinVer increments after the latest tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoIncrement {
    Major,
    Minor,
    Patch,
}

impl AutoIncrement {
    /// Value passed to `--auto-increment`
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoIncrement::Major => "major",
            AutoIncrement::Minor => "minor",
            AutoIncrement::Patch => "patch",
        }
    }
}

impl FromStr for AutoIncrement {
    type Err = MinVerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(AutoIncrement::Major),
            "minor" => Ok(AutoIncrement::Minor),
            "patch" => Ok(AutoIncrement::Patch),
            _ => Err(MinVerError::invalid_argument(format!(
                "Invalid auto-increment: '{}' (expected major, minor or patch)",
                s
            ))),
        }
    }
}

impl fmt::Display for AutoIncrement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MinVer's own log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Value passed to `--verbosity`
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Error => "error",
            Verbosity::Warn => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

impl FromStr for Verbosity {
    type Err = MinVerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Verbosity::Error),
            "warn" => Ok(Verbosity::Warn),
            "info" => Ok(Verbosity::Info),
            "debug" => Ok(Verbosity::Debug),
            "trace" => Ok(Verbosity::Trace),
            _ => Err(MinVerError::invalid_argument(format!(
                "Invalid verbosity: '{}' (expected error, warn, info, debug or trace)",
                s
            ))),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verbosity of the host build tool driving the run.
///
/// Used only when no explicit [`Verbosity`] is configured; see
/// [`HostVerbosity::to_tool_verbosity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostVerbosity {
    Quiet,
    Minimal,
    Normal,
    Detailed,
    Diagnostic,
}

impl HostVerbosity {
    /// Map onto MinVer's five-level scale
    pub fn to_tool_verbosity(self) -> Verbosity {
        match self {
            HostVerbosity::Quiet => Verbosity::Error,
            HostVerbosity::Minimal => Verbosity::Warn,
            HostVerbosity::Normal => Verbosity::Info,
            HostVerbosity::Detailed => Verbosity::Debug,
            HostVerbosity::Diagnostic => Verbosity::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_increment_parse_case_insensitive() {
        assert_eq!("major".parse::<AutoIncrement>().unwrap(), AutoIncrement::Major);
        assert_eq!("Minor".parse::<AutoIncrement>().unwrap(), AutoIncrement::Minor);
        assert_eq!("PATCH".parse::<AutoIncrement>().unwrap(), AutoIncrement::Patch);
    }

    #[test]
    fn test_auto_increment_parse_invalid() {
        assert!("".parse::<AutoIncrement>().is_err());
        assert!("build".parse::<AutoIncrement>().is_err());
        assert!("1".parse::<AutoIncrement>().is_err());
    }

    #[test]
    fn test_verbosity_parse() {
        assert_eq!("TRACE".parse::<Verbosity>().unwrap(), Verbosity::Trace);
        assert_eq!("warn".parse::<Verbosity>().unwrap(), Verbosity::Warn);
        assert!("verbose".parse::<Verbosity>().is_err());
    }

    #[test]
    fn test_display_matches_command_line_value() {
        assert_eq!(AutoIncrement::Minor.to_string(), "minor");
        assert_eq!(Verbosity::Debug.to_string(), "debug");
    }

    #[test]
    fn test_host_verbosity_mapping() {
        assert_eq!(HostVerbosity::Quiet.to_tool_verbosity(), Verbosity::Error);
        assert_eq!(HostVerbosity::Minimal.to_tool_verbosity(), Verbosity::Warn);
        assert_eq!(HostVerbosity::Normal.to_tool_verbosity(), Verbosity::Info);
        assert_eq!(HostVerbosity::Detailed.to_tool_verbosity(), Verbosity::Debug);
        assert_eq!(
            HostVerbosity::Diagnostic.to_tool_verbosity(),
            Verbosity::Trace
        );
    }
}
