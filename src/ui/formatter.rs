//! Pure formatting functions for UI output.
//!
//! `format_*` functions build strings and are testable; `display_*`
//! functions print them.

use crate::domain::MinVerVersion;
use crate::runner::MinVerRun;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Lines describing every field of a version, `name: value` per line.
///
/// Absent extensions are shown as an empty value.
pub fn format_version_details(version: &MinVerVersion) -> Vec<String> {
    vec![
        format!("Version: {}", version.raw()),
        format!("Major: {}", version.major()),
        format!("Minor: {}", version.minor()),
        format!("Patch: {}", version.patch()),
        format!("PreRelease: {}", version.pre_release().unwrap_or("")),
        format!("BuildMetadata: {}", version.build_metadata().unwrap_or("")),
        format!("IsPreRelease: {}", version.is_pre_release()),
        format!("AssemblyVersion: {}", version.assembly_version()),
        format!("FileVersion: {}", version.file_version()),
        format!("InformationalVersion: {}", version.informational_version()),
        format!("PackageVersion: {}", version.package_version()),
    ]
}

/// Print the version on stdout: the raw string, or every field with `details`.
pub fn display_version(version: &MinVerVersion, details: bool) {
    if details {
        for line in format_version_details(version) {
            println!("{}", line);
        }
    } else {
        println!("{}", version);
    }
}

/// Tell the user the preferred tool failed even though a version was produced.
///
/// # Arguments
/// * `run` - Report of a run that used the fallback tool
pub fn display_fallback_notice(run: &MinVerRun) {
    eprintln!(
        "{} preferred MinVer tool failed (exit code {}); version calculated by {}",
        style("⚠ WARNING:").yellow(),
        run.exit_code,
        style(&run.tool).bold()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_version_details() {
        let version = MinVerVersion::parse("1.2.3-alpha.4+abcdefg").unwrap();
        let lines = format_version_details(&version);
        assert_eq!(lines[0], "Version: 1.2.3-alpha.4+abcdefg");
        assert!(lines.contains(&"PreRelease: alpha.4".to_string()));
        assert!(lines.contains(&"BuildMetadata: abcdefg".to_string()));
        assert!(lines.contains(&"IsPreRelease: true".to_string()));
        assert!(lines.contains(&"AssemblyVersion: 1.0.0.0".to_string()));
        assert!(lines.contains(&"FileVersion: 1.2.3.0".to_string()));
    }

    #[test]
    fn test_format_version_details_release() {
        let version = MinVerVersion::parse("2.0.0").unwrap();
        let lines = format_version_details(&version);
        assert!(lines.contains(&"PreRelease: ".to_string()));
        assert!(lines.contains(&"IsPreRelease: false".to_string()));
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stderr
        display_status("test status");
    }
}
