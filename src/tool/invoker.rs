use crate::domain::MinVerVersion;
use crate::error::Result;
use crate::settings::EffectiveSettings;
use crate::tool::args::{build_arguments, render};
use crate::tool::command::{ProcessRunner, SystemProcessRunner, ToolCommand};
use crate::tool::{ToolInvoker, ToolRun};
use std::path::PathBuf;

/// How the MinVer binary is located
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// `dotnet minver`, through the .NET SDK and the local tool manifest
    Local,
    /// `minver` on `PATH`, or the configured tool path
    Global,
}

/// Fixed identity of one way of running MinVer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub name: &'static str,
}

impl ToolDescriptor {
    pub const LOCAL: ToolDescriptor = ToolDescriptor {
        kind: ToolKind::Local,
        name: "MinVer Local Tool (dotnet minver)",
    };

    pub const GLOBAL: ToolDescriptor = ToolDescriptor {
        kind: ToolKind::Global,
        name: "MinVer Global Tool (minver)",
    };

    /// Program to launch and the arguments that precede MinVer's own flags
    pub fn program(&self, settings: &EffectiveSettings) -> (PathBuf, Vec<String>) {
        match self.kind {
            ToolKind::Local => (PathBuf::from("dotnet"), vec!["minver".to_string()]),
            ToolKind::Global => (
                settings
                    .tool_path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("minver")),
                Vec::new(),
            ),
        }
    }

    /// The complete command for a run with `settings`
    pub fn command(&self, settings: &EffectiveSettings) -> ToolCommand {
        let (program, mut args) = self.program(settings);
        args.extend(build_arguments(settings));

        let mut env: Vec<(String, String)> = settings
            .environment_variables
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        env.sort();

        ToolCommand {
            program,
            args,
            working_directory: settings.working_directory.clone(),
            env,
        }
    }
}

/// Runs MinVer as a child process.
///
/// One type serves both the local and the global tool; the [ToolDescriptor]
/// decides which binary is launched and the name used in logs.
pub struct MinVerInvoker<R: ProcessRunner = SystemProcessRunner> {
    descriptor: ToolDescriptor,
    runner: R,
}

impl MinVerInvoker<SystemProcessRunner> {
    /// `dotnet minver`
    pub fn local() -> Self {
        Self::with_runner(ToolDescriptor::LOCAL, SystemProcessRunner)
    }

    /// `minver`, or the configured tool path
    pub fn global() -> Self {
        Self::with_runner(ToolDescriptor::GLOBAL, SystemProcessRunner)
    }
}

impl<R: ProcessRunner> MinVerInvoker<R> {
    pub fn with_runner(descriptor: ToolDescriptor, runner: R) -> Self {
        MinVerInvoker { descriptor, runner }
    }

    pub fn descriptor(&self) -> ToolDescriptor {
        self.descriptor
    }
}

impl<R: ProcessRunner> ToolInvoker for MinVerInvoker<R> {
    fn name(&self) -> &str {
        self.descriptor.name
    }

    fn try_run(&self, settings: &EffectiveSettings) -> Result<ToolRun> {
        let command = self.descriptor.command(settings);
        log::debug!(
            "{} arguments: [{}]",
            self.descriptor.name,
            render(&build_arguments(settings))
        );

        let output = match self.runner.run(&command) {
            Ok(output) => output,
            Err(e) => {
                log::debug!(
                    "{}: failed to start '{}': {}",
                    self.descriptor.name,
                    command.render(),
                    e
                );
                return Ok(ToolRun::failure(1));
            }
        };

        for line in output.stdout.iter().chain(output.stderr.iter()) {
            log::debug!("{}", line);
        }

        if output.exit_code != 0 {
            return Ok(ToolRun::failure(output.exit_code));
        }

        let version = MinVerVersion::from_output(&output.stdout)?;
        Ok(ToolRun::success(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AutoIncrement, HostVerbosity};
    use crate::error::MinVerError;
    use crate::tool::command::ProcessOutput;
    use log::Level;
    use std::io;
    use std::sync::Mutex;

    /// Records the launched command and replays a canned result
    struct ScriptedRunner {
        result: fn() -> io::Result<ProcessOutput>,
        launched: Mutex<Vec<ToolCommand>>,
    }

    impl ScriptedRunner {
        fn new(result: fn() -> io::Result<ProcessOutput>) -> Self {
            ScriptedRunner {
                result,
                launched: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProcessRunner for &ScriptedRunner {
        fn run(&self, command: &ToolCommand) -> io::Result<ProcessOutput> {
            self.launched.lock().unwrap().push(command.clone());
            (self.result)()
        }
    }

    fn tag_found_output() -> io::Result<ProcessOutput> {
        Ok(ProcessOutput {
            exit_code: 0,
            stdout: vec![
                "MinVer: Using { Commit: d34db33, Tag: 'v5.0.0', Version: 5.0.0, Height: 8 }."
                    .to_string(),
                "MinVer: Calculated version 5.0.1-alpha.0.8.".to_string(),
                "5.0.1-alpha.0.8".to_string(),
            ],
            stderr: Vec::new(),
        })
    }

    #[test]
    fn test_local_command_runs_through_dotnet() {
        let settings = EffectiveSettings {
            auto_increment: Some(AutoIncrement::Patch),
            ..EffectiveSettings::default()
        };
        let command = ToolDescriptor::LOCAL.command(&settings);
        assert_eq!(command.program, PathBuf::from("dotnet"));
        assert_eq!(command.args, vec!["minver", "--auto-increment", "patch"]);
    }

    #[test]
    fn test_global_command_runs_minver_directly() {
        let settings = EffectiveSettings {
            host_verbosity: Some(HostVerbosity::Normal),
            ..EffectiveSettings::default()
        };
        let command = ToolDescriptor::GLOBAL.command(&settings);
        assert_eq!(command.program, PathBuf::from("minver"));
        assert_eq!(command.args, vec!["--verbosity", "info"]);
    }

    #[test]
    fn test_global_command_uses_tool_path() {
        let settings = EffectiveSettings {
            tool_path: Some(PathBuf::from("/tools/minver")),
            working_directory: Some(PathBuf::from("/work")),
            ..EffectiveSettings::default()
        };
        let command = ToolDescriptor::GLOBAL.command(&settings);
        assert_eq!(command.program, PathBuf::from("/tools/minver"));
        assert_eq!(command.working_directory, Some(PathBuf::from("/work")));
    }

    #[test]
    fn test_successful_run_parses_last_line() {
        let runner = ScriptedRunner::new(tag_found_output);
        let invoker = MinVerInvoker::with_runner(ToolDescriptor::LOCAL, &runner);

        let run = invoker.try_run(&EffectiveSettings::default()).unwrap();
        assert!(run.succeeded());
        let version = run.version.unwrap();
        assert_eq!(version.major(), 5);
        assert_eq!(version.minor(), 0);
        assert_eq!(version.patch(), 1);
        assert_eq!(version.pre_release(), Some("alpha.0.8"));
        assert!(version.is_pre_release());
        assert_eq!(runner.launched.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_non_zero_exit_returns_code_without_version() {
        let runner = ScriptedRunner::new(|| {
            Ok(ProcessOutput {
                exit_code: 2,
                stdout: vec!["1.2.3".to_string()],
                stderr: vec!["MinVer: error".to_string()],
            })
        });
        let invoker = MinVerInvoker::with_runner(ToolDescriptor::GLOBAL, &runner);

        let run = invoker.try_run(&EffectiveSettings::default()).unwrap();
        assert_eq!(run, ToolRun::failure(2));
    }

    #[test]
    fn test_launch_failure_is_exit_code_one() {
        let runner = ScriptedRunner::new(|| {
            Err(io::Error::new(io::ErrorKind::NotFound, "No such file"))
        });
        let invoker = MinVerInvoker::with_runner(ToolDescriptor::LOCAL, &runner);

        let run = invoker.try_run(&EffectiveSettings::default()).unwrap();
        assert_eq!(run, ToolRun::failure(1));
    }

    #[test]
    fn test_garbage_output_on_success_is_error() {
        let runner = ScriptedRunner::new(|| {
            Ok(ProcessOutput {
                exit_code: 0,
                stdout: vec!["MinVer: something unexpected".to_string()],
                stderr: Vec::new(),
            })
        });
        let invoker = MinVerInvoker::with_runner(ToolDescriptor::GLOBAL, &runner);

        let err = invoker.try_run(&EffectiveSettings::default()).unwrap_err();
        assert!(matches!(err, MinVerError::Version(_)));
    }

    #[test]
    fn test_empty_output_on_success_is_error() {
        let runner = ScriptedRunner::new(|| Ok(ProcessOutput::default()));
        let invoker = MinVerInvoker::with_runner(ToolDescriptor::GLOBAL, &runner);
        assert!(invoker.try_run(&EffectiveSettings::default()).is_err());
    }

    #[test]
    fn test_captured_lines_are_logged() {
        testing_logger::setup();
        let runner = ScriptedRunner::new(tag_found_output);
        let invoker = MinVerInvoker::with_runner(ToolDescriptor::LOCAL, &runner);
        invoker.try_run(&EffectiveSettings::default()).unwrap();

        testing_logger::validate(|captured_logs| {
            let bodies: Vec<&str> = captured_logs
                .iter()
                .filter(|log| log.level == Level::Debug)
                .map(|log| log.body.as_str())
                .collect();
            assert!(bodies.contains(&"MinVer Local Tool (dotnet minver) arguments: []"));
            assert!(bodies.contains(&"MinVer: Calculated version 5.0.1-alpha.0.8."));
            assert!(bodies.contains(&"5.0.1-alpha.0.8"));
        });
    }

    #[test]
    fn test_names() {
        assert_eq!(MinVerInvoker::local().name(), "MinVer Local Tool (dotnet minver)");
        assert_eq!(MinVerInvoker::global().name(), "MinVer Global Tool (minver)");
        assert_eq!(MinVerInvoker::global().descriptor().kind, ToolKind::Global);
    }
}
