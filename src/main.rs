use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use minver_runner::config;
use minver_runner::ui;
use minver_runner::{AutoIncrement, HostVerbosity, MinVerRunner, MinVerSettings, Verbosity};

#[derive(clap::Parser)]
#[command(
    name = "minver-runner",
    version,
    about = "Calculate a version from git tags by running MinVer, with local/global tool fallback"
)]
struct Args {
    #[arg(long, help = "Version component to increment: major, minor or patch")]
    auto_increment: Option<AutoIncrement>,

    #[arg(long, help = "Build metadata to append")]
    build_metadata: Option<String>,

    #[arg(long, help = "Pre-release phase used when none can be derived")]
    default_pre_release_phase: Option<String>,

    #[arg(long, help = "Minimum major.minor (e.g. 1.0)")]
    minimum_major_minor: Option<String>,

    #[arg(long, help = "Repository directory")]
    repo: Option<PathBuf>,

    #[arg(long, help = "Prefix stripped from tags")]
    tag_prefix: Option<String>,

    #[arg(long, help = "MinVer verbosity: error, warn, info, debug or trace")]
    verbosity: Option<Verbosity>,

    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Run the global tool first (--prefer-global-tool=false overrides the settings file)"
    )]
    prefer_global_tool: Option<bool>,

    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Do not fall back to the other tool (--no-fallback=false overrides the settings file)"
    )]
    no_fallback: Option<bool>,

    #[arg(long, help = "Run this MinVer binary only (implies --prefer-global-tool --no-fallback)")]
    tool_path: Option<PathBuf>,

    #[arg(long, help = "Directory to run MinVer from")]
    working_directory: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Print every version field")]
    details: bool,

    #[arg(short, long, help = "Only report errors")]
    quiet: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "More output (-v, -vv)")]
    verbose: u8,
}

impl Args {
    fn host_verbosity(&self) -> Option<HostVerbosity> {
        if self.quiet {
            return Some(HostVerbosity::Quiet);
        }
        match self.verbose {
            0 => None,
            1 => Some(HostVerbosity::Detailed),
            _ => Some(HostVerbosity::Diagnostic),
        }
    }

    fn log_filter(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "debug",
            _ => "trace",
        }
    }

    /// Settings given on the command line; unset flags stay unset
    fn to_settings(&self) -> MinVerSettings {
        MinVerSettings {
            auto_increment: self.auto_increment,
            build_metadata: self.build_metadata.clone(),
            default_pre_release_phase: self.default_pre_release_phase.clone(),
            minimum_major_minor: self.minimum_major_minor.clone(),
            repo: self.repo.clone(),
            tag_prefix: self.tag_prefix.clone(),
            prefer_global_tool: self.prefer_global_tool,
            no_fallback: self.no_fallback,
            verbosity: self.verbosity,
            tool_path: self.tool_path.clone(),
            working_directory: self.working_directory.clone(),
            host_verbosity: self.host_verbosity(),
            ..MinVerSettings::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_target(false)
        .init();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let settings = args.to_settings().layered_over(config.settings);

    if args.verbose > 0 {
        ui::display_status("Running MinVer...");
    }

    let run = match MinVerRunner::default().run_detailed(&settings) {
        Ok(run) => run,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if run.used_fallback && !args.quiet {
        ui::display_fallback_notice(&run);
    }

    ui::display_version(&run.version, args.details);
    Ok(())
}
