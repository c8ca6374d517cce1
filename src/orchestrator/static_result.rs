//! Orchestrator that answers every task with the same text.

use async_trait::async_trait;
use chrono::Utc;

use super::Orchestrator;
use crate::crew::Crew;
use crate::crews::crew_output::CrewOutput;
use crate::tasks::task_output::TaskOutput;
use crate::types::usage_metrics::UsageMetrics;
use crate::utilities::errors::CrewError;

/// Returns a fixed string as the output of every task, so the crew result is
/// that string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticOrchestrator {
    result: String,
}

impl StaticOrchestrator {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }
}

#[async_trait]
impl Orchestrator for StaticOrchestrator {
    async fn kickoff(&self, crew: &Crew) -> Result<CrewOutput, CrewError> {
        let tasks_output = crew
            .tasks()
            .iter()
            .map(|task| {
                TaskOutput::new(
                    task.description.clone(),
                    task.expected_output.clone(),
                    task.agent.role.clone(),
                    self.result.clone(),
                    Utc::now(),
                )
            })
            .collect();

        CrewOutput::from_tasks(tasks_output, UsageMetrics::new()).ok_or(CrewError::EmptyCrew)
    }
}
