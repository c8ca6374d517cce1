//! The four catalogued crews.
//!
//! Every crew is two agents working in sequence: the first produces an
//! artifact (analysis, plan, architecture, wireframes) and the second consumes
//! it. The crews differ only in their text, so they are declared as
//! [`CrewBlueprint`] rows and built by [`build_pipeline`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::crew::Crew;
use crate::process::Process;
use crate::task::Task;

/// Identifies one of the catalogued crews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrewKind {
    BusinessAnalytics,
    Development,
    SoftwareEngineering,
    Website,
}

impl CrewKind {
    pub const ALL: [CrewKind; 4] = [
        CrewKind::BusinessAnalytics,
        CrewKind::Development,
        CrewKind::SoftwareEngineering,
        CrewKind::Website,
    ];

    /// Kebab-case name, also used as the crew name.
    pub fn name(self) -> &'static str {
        match self {
            Self::BusinessAnalytics => "business-analytics",
            Self::Development => "development",
            Self::SoftwareEngineering => "software-engineering",
            Self::Website => "website",
        }
    }

    fn blueprint(self) -> &'static CrewBlueprint {
        match self {
            Self::BusinessAnalytics => &BUSINESS_ANALYTICS,
            Self::Development => &DEVELOPMENT,
            Self::SoftwareEngineering => &SOFTWARE_ENGINEERING,
            Self::Website => &WEBSITE,
        }
    }
}

impl fmt::Display for CrewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One agent together with the single task it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    pub description: &'static str,
    pub expected_output: &'static str,
}

impl Stage {
    fn agent(&self) -> Arc<Agent> {
        Arc::new(Agent::new(self.role, self.goal, self.backstory))
    }
}

/// Literal definition of a two-stage crew. The producer's task runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrewBlueprint {
    pub producer: Stage,
    pub consumer: Stage,
}

const BUSINESS_ANALYTICS: CrewBlueprint = CrewBlueprint {
    producer: Stage {
        role: "Data Analyst",
        goal: "Provide actionable business insights",
        backstory: "Skilled in analyzing datasets to uncover trends.",
        description: "Analyze available business data for opportunities.",
        expected_output: "Key metrics and insights.",
    },
    consumer: Stage {
        role: "Report Writer",
        goal: "Present findings in clear reports",
        backstory: "Experienced at summarizing analytics results for stakeholders.",
        description: "Create a report summarizing the insights.",
        expected_output: "A written business analytics report.",
    },
};

const DEVELOPMENT: CrewBlueprint = CrewBlueprint {
    producer: Stage {
        role: "Planner",
        goal: "Define clear development goals and milestones",
        backstory: "Experienced project planner who outlines tasks for developers.",
        description: "Analyze project requirements and produce a development plan.",
        expected_output: "A concise list of development tasks.",
    },
    consumer: Stage {
        role: "Developer",
        goal: "Implement features following best practices",
        backstory: "Software developer focused on delivering high quality code.",
        description: "Write code according to the plan.",
        expected_output: "Source code implementing the planned features.",
    },
};

const SOFTWARE_ENGINEERING: CrewBlueprint = CrewBlueprint {
    producer: Stage {
        role: "Architect",
        goal: "Design scalable software architecture",
        backstory: "Seasoned engineer designing reliable systems.",
        description: "Plan the software architecture for the project.",
        expected_output: "High level design document.",
    },
    consumer: Stage {
        role: "Engineer",
        goal: "Implement architecture effectively",
        backstory: "Writes maintainable and tested code.",
        description: "Develop code based on the design.",
        expected_output: "Implementation of the architecture.",
    },
};

const WEBSITE: CrewBlueprint = CrewBlueprint {
    producer: Stage {
        role: "UI Designer",
        goal: "Create intuitive website layouts",
        backstory: "Expert at crafting user-friendly interfaces.",
        description: "Design website wireframes and user experience.",
        expected_output: "Approved wireframes and design notes.",
    },
    consumer: Stage {
        role: "Web Developer",
        goal: "Build responsive and accessible sites",
        // U+2011 non-breaking hyphen.
        backstory: "Experienced full\u{2011}stack developer.",
        description: "Implement the website based on approved designs.",
        expected_output: "Deployed website implementation.",
    },
};

/// Build the crew for `kind`: two agents, two tasks, sequential process.
pub fn build_pipeline(kind: CrewKind) -> Crew {
    let blueprint = kind.blueprint();
    let producer = blueprint.producer.agent();
    let consumer = blueprint.consumer.agent();

    let tasks = vec![
        Task::new(
            blueprint.producer.description,
            blueprint.producer.expected_output,
            Arc::clone(&producer),
        ),
        Task::new(
            blueprint.consumer.description,
            blueprint.consumer.expected_output,
            Arc::clone(&consumer),
        ),
    ];

    log::debug!("Assembled crew '{}'", kind);
    Crew::from_parts(kind.name(), vec![producer, consumer], tasks, Process::Sequential)
}

/// Data Analyst feeding a Report Writer.
pub fn business_analytics() -> Crew {
    build_pipeline(CrewKind::BusinessAnalytics)
}

/// Planner feeding a Developer.
pub fn development() -> Crew {
    build_pipeline(CrewKind::Development)
}

/// Architect feeding an Engineer.
pub fn software_engineering() -> Crew {
    build_pipeline(CrewKind::SoftwareEngineering)
}

/// UI Designer feeding a Web Developer.
pub fn website() -> Crew {
    build_pipeline(CrewKind::Website)
}
