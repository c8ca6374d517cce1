//! Main Crew struct.
//!
//! A crew is an ordered list of agents, an ordered list of tasks bound to
//! those agents, and the process that decides how the tasks run. It is pure
//! configuration: executing it is the job of an
//! [`Orchestrator`](crate::orchestrator::Orchestrator).

use md5::{Digest, Md5};
use serde::Serialize;
use std::sync::Arc;

use crate::agent::Agent;
use crate::crews::crew_output::CrewOutput;
use crate::orchestrator::Orchestrator;
use crate::process::Process;
use crate::task::Task;
use crate::utilities::errors::CrewError;

/// Represents a group of agents, defining how they should collaborate and the
/// tasks they should perform.
///
/// Invariant: every task's agent is one of `agents`. [`Crew::new`] is the only
/// public constructor and enforces it, so the fields are read-only from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crew {
    name: String,
    agents: Vec<Arc<Agent>>,
    tasks: Vec<Task>,
    process: Process,
}

impl Crew {
    /// Create a new Crew, checking that every task is assigned to one of the
    /// declared agents.
    ///
    /// # Errors
    ///
    /// * [`CrewError::EmptyCrew`] if `agents` or `tasks` is empty.
    /// * [`CrewError::UnknownAgent`] if a task refers to an undeclared agent.
    pub fn new(
        name: impl Into<String>,
        agents: Vec<Arc<Agent>>,
        tasks: Vec<Task>,
        process: Process,
    ) -> Result<Self, CrewError> {
        if agents.is_empty() || tasks.is_empty() {
            return Err(CrewError::EmptyCrew);
        }

        for task in &tasks {
            if !agents.iter().any(|agent| **agent == *task.agent) {
                return Err(CrewError::UnknownAgent {
                    task: task.description.clone(),
                    role: task.agent.role.clone(),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            agents,
            tasks,
            process,
        })
    }

    /// Assemble a crew whose tasks were built from `agents` directly.
    pub(crate) fn from_parts(
        name: impl Into<String>,
        agents: Vec<Arc<Agent>>,
        tasks: Vec<Task>,
        process: Process,
    ) -> Self {
        debug_assert!(!agents.is_empty() && !tasks.is_empty());
        debug_assert!(tasks
            .iter()
            .all(|task| agents.iter().any(|agent| Arc::ptr_eq(agent, &task.agent))));
        Self {
            name: name.into(),
            agents,
            tasks,
            process,
        }
    }

    /// Name of the crew.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Agents in declaration order.
    pub fn agents(&self) -> &[Arc<Agent>] {
        &self.agents
    }

    /// Tasks in execution order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The process flow that the crew will follow.
    pub fn process(&self) -> Process {
        self.process
    }

    /// Compute the key property (MD5 hash of agent keys + task keys).
    pub fn key(&self) -> String {
        let mut source: Vec<String> = self.agents.iter().map(|a| a.key()).collect();
        for task in &self.tasks {
            source.push(task.key());
        }
        let combined = source.join("|");
        let mut hasher = Md5::new();
        hasher.update(combined.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Execute the crew's workflow through `orchestrator`.
    ///
    /// Failures from the orchestrator are returned unchanged; the crew does
    /// not retry.
    pub async fn kickoff(&self, orchestrator: &dyn Orchestrator) -> Result<CrewOutput, CrewError> {
        log::info!(
            "Crew '{}' kickoff: key={}, process={}, agents={}, tasks={}",
            self.name,
            self.key(),
            self.process,
            self.agents.len(),
            self.tasks.len()
        );
        let output = orchestrator.kickoff(self).await?;
        log::info!(
            "Crew '{}' finished: kickoff_id={}, total_tokens={}",
            self.name,
            output.kickoff_id,
            output.token_usage.total_tokens
        );
        Ok(output)
    }
}

impl std::fmt::Display for Crew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Crew(name={}, process={}, number_of_agents={}, number_of_tasks={})",
            self.name,
            self.process,
            self.agents.len(),
            self.tasks.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::StaticOrchestrator;

    fn agents() -> (Arc<Agent>, Arc<Agent>) {
        (
            Arc::new(Agent::new("Architect", "Design", "Seasoned engineer.")),
            Arc::new(Agent::new("Engineer", "Implement", "Writes code.")),
        )
    }

    #[test]
    fn test_new_accepts_declared_agents() {
        let (architect, engineer) = agents();
        let crew = Crew::new(
            "software-engineering",
            vec![architect.clone(), engineer.clone()],
            vec![
                Task::new("Plan.", "Design doc.", architect),
                Task::new("Build.", "Code.", engineer),
            ],
            Process::Sequential,
        )
        .unwrap();
        assert_eq!(crew.agents().len(), 2);
        assert_eq!(crew.tasks().len(), 2);
        assert_eq!(crew.process(), Process::Sequential);
        assert_eq!(
            crew.to_string(),
            "Crew(name=software-engineering, process=sequential, number_of_agents=2, number_of_tasks=2)"
        );
    }

    #[test]
    fn test_new_rejects_undeclared_agent() {
        let (architect, engineer) = agents();
        let err = Crew::new(
            "broken",
            vec![architect.clone()],
            vec![
                Task::new("Plan.", "Design doc.", architect),
                Task::new("Build.", "Code.", engineer),
            ],
            Process::Sequential,
        )
        .unwrap_err();
        match err {
            CrewError::UnknownAgent { task, role } => {
                assert_eq!(task, "Build.");
                assert_eq!(role, "Engineer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_new_accepts_structurally_equal_agent() {
        let (architect, _) = agents();
        let copy = Arc::new((*architect).clone());
        let crew = Crew::new(
            "copy",
            vec![architect],
            vec![Task::new("Plan.", "Design doc.", copy)],
            Process::Sequential,
        );
        assert!(crew.is_ok());
    }

    #[test]
    fn test_new_rejects_empty() {
        let (architect, _) = agents();
        assert!(matches!(
            Crew::new("empty", vec![architect], Vec::new(), Process::Sequential),
            Err(CrewError::EmptyCrew)
        ));
        assert!(matches!(
            Crew::new("empty", Vec::new(), Vec::new(), Process::Sequential),
            Err(CrewError::EmptyCrew)
        ));
    }

    #[test]
    fn test_key_is_deterministic() {
        let build = || {
            let (architect, engineer) = agents();
            Crew::new(
                "k",
                vec![architect.clone(), engineer.clone()],
                vec![
                    Task::new("Plan.", "Design doc.", architect),
                    Task::new("Build.", "Code.", engineer),
                ],
                Process::Sequential,
            )
            .unwrap()
        };
        assert_eq!(build().key(), build().key());
    }

    #[test]
    fn test_kickoff_delegates_to_orchestrator() {
        let (architect, _) = agents();
        let crew = Crew::new(
            "solo",
            vec![architect.clone()],
            vec![Task::new("Plan.", "Design doc.", architect)],
            Process::Sequential,
        )
        .unwrap();
        let output = tokio_test::block_on(crew.kickoff(&StaticOrchestrator::new("done"))).unwrap();
        assert_eq!(output.raw, "done");
        assert_eq!(output.tasks_output.len(), 1);
    }
}
