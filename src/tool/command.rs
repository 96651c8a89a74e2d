use crate::tool::args::render;
use std::io;
use std::path::PathBuf;
use std::process::Command;

/// A fully described process launch
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_directory: Option<PathBuf>,
    /// Extra environment variables set on the child process
    pub env: Vec<(String, String)>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        ToolCommand {
            program: program.into(),
            args: Vec::new(),
            working_directory: None,
            env: Vec::new(),
        }
    }

    /// Program and arguments as one line, values with whitespace quoted
    pub fn render(&self) -> String {
        let mut line = vec![self.program.to_string_lossy().into_owned()];
        line.extend(self.args.iter().cloned());
        render(&line)
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

/// Spawns processes and waits for them to finish
pub trait ProcessRunner: Send + Sync {
    /// Run the command to completion with stdout and stderr captured
    ///
    /// # Returns
    /// * `Ok(ProcessOutput)` - The process ran; any exit code
    /// * `Err` - The process could not be started
    fn run(&self, command: &ToolCommand) -> io::Result<ProcessOutput>;
}

/// [ProcessRunner] backed by [std::process::Command]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &ToolCommand) -> io::Result<ProcessOutput> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);

        if let Some(dir) = &command.working_directory {
            cmd.current_dir(dir);
        }
        for (key, value) in &command.env {
            cmd.env(key, value);
        }

        log::trace!("run {:?}", cmd);
        let output = cmd.output()?;

        Ok(ProcessOutput {
            // Killed by a signal: no exit code, still a failure.
            exit_code: output.status.code().unwrap_or(-1),
            stdout: split_lines(&output.stdout),
            stderr: split_lines(&output.stderr),
        })
    }
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
