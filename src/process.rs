//! Process types for crew execution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The execution policy a crew follows when its tasks are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Process {
    /// Tasks are executed one after another in order, each able to consult
    /// the outputs of the tasks before it.
    Sequential,
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Process::Sequential => write!(f, "sequential"),
        }
    }
}

impl Default for Process {
    fn default() -> Self {
        Process::Sequential
    }
}
