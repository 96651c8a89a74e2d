use crate::domain::MinVerVersion;
use crate::error::Result;
use crate::settings::EffectiveSettings;
use crate::tool::{ToolInvoker, ToolRun};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared counter handing out increasing numbers, used to observe the order
/// in which several test doubles were invoked
#[derive(Debug, Clone, Default)]
pub struct ExecutionSequence(Arc<AtomicUsize>);

impl ExecutionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next number in the sequence, starting at 1
    pub fn next(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Mock tool for testing without running MinVer
pub struct MockTool {
    name: String,
    exit_code: i32,
    output: Vec<String>,
    sequence: ExecutionSequence,
    calls: Mutex<Vec<(usize, EffectiveSettings)>>,
}

impl MockTool {
    /// Create a mock that exits with `exit_code` after printing `output`
    pub fn new(
        name: impl Into<String>,
        exit_code: i32,
        output: &[&str],
        sequence: ExecutionSequence,
    ) -> Self {
        MockTool {
            name: name.into(),
            exit_code,
            output: output.iter().map(|line| line.to_string()).collect(),
            sequence,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// How many times the tool was run
    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    /// Sequence numbers of each run, in call order
    pub fn call_order(&self) -> Vec<usize> {
        self.lock_calls().iter().map(|(order, _)| *order).collect()
    }

    /// Settings passed to the most recent run
    pub fn last_settings(&self) -> Option<EffectiveSettings> {
        self.lock_calls().last().map(|(_, settings)| settings.clone())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<(usize, EffectiveSettings)>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ToolInvoker for MockTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_run(&self, settings: &EffectiveSettings) -> Result<ToolRun> {
        let order = self.sequence.next();
        self.lock_calls().push((order, settings.clone()));

        if self.exit_code != 0 {
            return Ok(ToolRun::failure(self.exit_code));
        }
        Ok(ToolRun::success(MinVerVersion::from_output(&self.output)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_shared_between_clones() {
        let sequence = ExecutionSequence::new();
        let clone = sequence.clone();
        assert_eq!(sequence.next(), 1);
        assert_eq!(clone.next(), 2);
        assert_eq!(sequence.next(), 3);
    }

    #[test]
    fn test_mock_tool_success() {
        let tool = MockTool::new(
            "local",
            0,
            &["MinVer: Calculated version 1.2.3.", "1.2.3"],
            ExecutionSequence::new(),
        );
        let run = tool.try_run(&EffectiveSettings::default()).unwrap();
        assert_eq!(run.version.unwrap().raw(), "1.2.3");
        assert_eq!(tool.call_count(), 1);
        assert_eq!(tool.call_order(), vec![1]);
    }

    #[test]
    fn test_mock_tool_failure() {
        let tool = MockTool::new("global", 127, &[], ExecutionSequence::new());
        let run = tool.try_run(&EffectiveSettings::default()).unwrap();
        assert_eq!(run, ToolRun::failure(127));
        assert_eq!(tool.name(), "global");
    }

    #[test]
    fn test_mock_tool_records_settings() {
        let tool = MockTool::new("local", 1, &[], ExecutionSequence::new());
        assert!(tool.last_settings().is_none());
        let settings = EffectiveSettings {
            tag_prefix: Some("v".to_string()),
            ..EffectiveSettings::default()
        };
        tool.try_run(&settings).unwrap();
        assert_eq!(tool.last_settings(), Some(settings));
    }
}
