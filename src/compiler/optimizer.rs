use crate::ast::{Process, StepKind};
use std::fmt;
use tracing::debug;

/// Two adjacent tasks done by the same actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    pub first: String,
    pub second: String,
    pub actor: String,
}

impl fmt::Display for MergeCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Steps '{}' and '{}' performed by '{}' could be merged",
            self.first, self.second, self.actor
        )
    }
}

/// Advisory analysis over a validated process. Never fails and never
/// touches its input.
pub struct Optimizer;

impl Optimizer {
    pub fn new() -> Self {
        Self
    }

    /// Single linear scan over consecutive pairs in declaration order.
    /// Same-actor tasks that are not adjacent are not reported.
    pub fn merge_candidates(&self, process: &Process) -> Vec<MergeCandidate> {
        let candidates: Vec<MergeCandidate> = process
            .steps
            .windows(2)
            .filter_map(|pair| {
                let (s1, s2) = (&pair[0], &pair[1]);
                if s1.kind != StepKind::Task || s2.kind != StepKind::Task {
                    return None;
                }
                let actor = s1.performer()?;
                (s2.performer() == Some(actor)).then(|| MergeCandidate {
                    first: s1.id.clone(),
                    second: s2.id.clone(),
                    actor: actor.to_string(),
                })
            })
            .collect();

        debug!(name = %process.name, suggestions = candidates.len(), "optimizer scan finished");
        candidates
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn find_optimizations(process: &Process) -> Vec<String> {
    Optimizer::new()
        .merge_candidates(process)
        .iter()
        .map(ToString::to_string)
        .collect()
}
