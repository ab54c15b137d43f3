//! Placeholder agent pipeline.
//!
//! Four stages run in a fixed order (research, plan, build, review). Each
//! stage receives the previous stage's output and returns a templated string.

use super::message::ChatStep;

/// One pipeline stage: a label and a pure text transform.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub agent: &'static str,
    pub run: fn(&str) -> String,
}

/// Stages in execution order.
pub const STAGES: [Stage; 4] = [
    Stage {
        agent: "researcher",
        run: research,
    },
    Stage {
        agent: "planner",
        run: plan,
    },
    Stage {
        agent: "builder",
        run: build,
    },
    Stage {
        agent: "reviewer",
        run: review,
    },
];

pub fn research(prompt: &str) -> String {
    format!("Researching: {}", prompt)
}

pub fn plan(summary: &str) -> String {
    format!("Plan based on: {}", summary)
}

pub fn build(plan: &str) -> String {
    format!("Draft based on: {}", plan)
}

pub fn review(draft: &str) -> String {
    format!("Review of: {}", draft)
}

/// Result of running every stage over one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    pub steps: Vec<ChatStep>,
}

impl PipelineRun {
    /// Stage outputs joined by blank lines.
    pub fn reply(&self) -> String {
        self.steps
            .iter()
            .map(|step| step.output.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Run all stages, feeding each one the previous stage's output.
pub fn run_pipeline(input: &str) -> PipelineRun {
    let mut current = input.to_string();
    let mut steps = Vec::with_capacity(STAGES.len());

    for stage in STAGES {
        current = (stage.run)(&current);
        steps.push(ChatStep {
            agent: stage.agent.to_string(),
            output: current.clone(),
        });
    }

    PipelineRun { steps }
}
