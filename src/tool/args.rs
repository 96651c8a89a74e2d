//! MinVer command-line arguments

use crate::domain::Verbosity;
use crate::settings::EffectiveSettings;

/// Build the MinVer flags for the given settings.
///
/// Each flag is added only when its setting is present and non-blank, in the
/// order `--auto-increment`, `--build-metadata`, `--default-pre-release-phase`,
/// `--minimum-major-minor`, `--repo`, `--tag-prefix`, `--verbosity`. The flag
/// and its value are separate elements.
pub fn build_arguments(settings: &EffectiveSettings) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(auto_increment) = settings.auto_increment {
        push_flag(&mut args, "--auto-increment", auto_increment.as_str());
    }
    push_text_flag(&mut args, "--build-metadata", &settings.build_metadata);
    push_text_flag(
        &mut args,
        "--default-pre-release-phase",
        &settings.default_pre_release_phase,
    );
    push_text_flag(
        &mut args,
        "--minimum-major-minor",
        &settings.minimum_major_minor,
    );
    if let Some(repo) = &settings.repo {
        let repo = repo.to_string_lossy();
        if !repo.trim().is_empty() {
            push_flag(&mut args, "--repo", &repo);
        }
    }
    push_text_flag(&mut args, "--tag-prefix", &settings.tag_prefix);
    if let Some(verbosity) = effective_verbosity(settings) {
        push_flag(&mut args, "--verbosity", verbosity.as_str());
    }

    args
}

/// The explicit verbosity, or the host verbosity mapped onto MinVer's scale.
/// `None` leaves MinVer on its own default.
pub fn effective_verbosity(settings: &EffectiveSettings) -> Option<Verbosity> {
    settings.verbosity.or_else(|| {
        settings
            .host_verbosity
            .map(|host| host.to_tool_verbosity())
    })
}

/// Render arguments as a single command line, quoting values with whitespace.
pub fn render(args: &[String]) -> String {
    args.iter()
        .map(|arg| quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap the value in double quotes if it contains whitespace.
pub fn quote(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.push(value.to_string());
}

fn push_text_flag(args: &mut Vec<String>, flag: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
        push_flag(args, flag, value);
    }
}
