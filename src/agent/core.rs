//! Core Agent struct.
//!
//! An agent is a named role with a goal and a backstory. It carries no
//! execution state of its own: an [`Orchestrator`](crate::orchestrator::Orchestrator)
//! turns it into a system prompt when one of its tasks runs.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

/// Represents an agent in a crew.
///
/// Agents are immutable once constructed and compare structurally; a crew
/// identifies its agents by position, not by an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Agent {
    /// Role of the agent.
    pub role: String,
    /// Objective of the agent.
    pub goal: String,
    /// Backstory of the agent.
    pub backstory: String,
}

impl Agent {
    /// Create a new Agent.
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    /// Compute the key property (MD5 hash of role|goal|backstory).
    pub fn key(&self) -> String {
        let source = format!("{}|{}|{}", self.role, self.goal, self.backstory);
        let mut hasher = Md5::new();
        hasher.update(source.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Render the system prompt that puts a model in this agent's role.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Agent(role={}, goal={}, backstory={})",
            self.role, self.goal, self.backstory
        )
    }
}
