//! LLM-backed sequential orchestrator.
//!
//! Each task becomes one LLM call: the agent supplies the system message, the
//! task prompt the user message, and the raw outputs of every task that ran
//! before it are appended as context.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::Orchestrator;
use crate::crew::Crew;
use crate::crews::crew_output::CrewOutput;
use crate::llms::base_llm::{BaseLLM, LLMMessage};
use crate::process::Process;
use crate::task::Task;
use crate::tasks::task_output::TaskOutput;
use crate::types::usage_metrics::UsageMetrics;
use crate::utilities::errors::CrewError;

/// Separator placed between earlier task outputs in the context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Runs a crew's tasks in order through a single LLM.
#[derive(Debug, Clone)]
pub struct SequentialOrchestrator {
    llm: Arc<dyn BaseLLM>,
}

impl SequentialOrchestrator {
    pub fn new(llm: Arc<dyn BaseLLM>) -> Self {
        Self { llm }
    }

    /// Build the conversation for one task.
    pub fn build_messages(task: &Task, context: Option<&str>) -> Vec<LLMMessage> {
        let task_prompt = match context {
            Some(ctx) => format!("{}\n\nContext:\n{}", task.prompt(), ctx),
            None => task.prompt(),
        };

        vec![
            LLMMessage::system(task.agent.system_prompt()),
            LLMMessage::user(task_prompt),
        ]
    }

    async fn execute_task(
        &self,
        task: &Task,
        context: Option<&str>,
    ) -> Result<(TaskOutput, UsageMetrics), CrewError> {
        log::debug!(
            "Agent '{}' executing task: {}",
            task.agent.role,
            task.description
        );

        let started_at = Utc::now();
        let messages = Self::build_messages(task, context);
        let response = self.llm.call(&messages).await?;

        let raw = response.text.trim().to_string();
        if raw.is_empty() {
            return Err(CrewError::EmptyOutput {
                task: task.description.clone(),
            });
        }

        let output = TaskOutput::new(
            task.description.clone(),
            task.expected_output.clone(),
            task.agent.role.clone(),
            raw,
            started_at,
        );
        log::info!(
            "Task completed: agent='{}', summary='{}', duration={:.2}s",
            output.agent,
            output.summary,
            output.execution_duration()
        );

        Ok((output, response.usage))
    }

    async fn run_sequential_process(&self, crew: &Crew) -> Result<CrewOutput, CrewError> {
        let mut task_outputs: Vec<TaskOutput> = Vec::with_capacity(crew.tasks().len());
        let mut token_usage = UsageMetrics::new();

        for task in crew.tasks() {
            let context = if task_outputs.is_empty() {
                None
            } else {
                Some(
                    task_outputs
                        .iter()
                        .map(|o| o.raw.as_str())
                        .collect::<Vec<&str>>()
                        .join(CONTEXT_SEPARATOR),
                )
            };

            let (output, usage) = self.execute_task(task, context.as_deref()).await?;
            token_usage.add_usage_metrics(&usage);
            task_outputs.push(output);
        }

        CrewOutput::from_tasks(task_outputs, token_usage).ok_or(CrewError::EmptyCrew)
    }
}

#[async_trait]
impl Orchestrator for SequentialOrchestrator {
    async fn kickoff(&self, crew: &Crew) -> Result<CrewOutput, CrewError> {
        log::debug!(
            "SequentialOrchestrator kickoff: crew={}, model={}/{}",
            crew.name(),
            self.llm.provider(),
            self.llm.model()
        );

        match crew.process() {
            Process::Sequential => self.run_sequential_process(crew).await,
        }
    }
}
