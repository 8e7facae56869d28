use crate::ast::{Process, StepKind};
use crate::error::SemanticError;
use std::collections::HashSet;
use tracing::debug;

/// Checks the structural invariants of a process.
///
/// Checks run in a fixed order and the first violation wins:
/// duplicate ids and missing actors (one pass, in declaration order),
/// then dangling `next`/branch references, then the terminal-step rule.
pub fn validate(process: &Process) -> Result<(), SemanticError> {
    // 1. Pass 1: ids and actors
    let mut ids: HashSet<&str> = HashSet::with_capacity(process.steps.len());
    for step in &process.steps {
        if !ids.insert(step.id.as_str()) {
            return Err(SemanticError::DuplicateStepId(step.id.clone()));
        }
        if step.kind == StepKind::Task && step.performer().is_none() {
            return Err(SemanticError::MissingActor(step.id.clone()));
        }
    }

    // 2. Pass 2: references
    for step in &process.steps {
        if let Some(target) = step.successor() {
            if !ids.contains(target) {
                return Err(SemanticError::UnknownNextStep {
                    step: step.id.clone(),
                    target: target.to_string(),
                });
            }
        }
        for (label, target) in &step.branches {
            if !ids.contains(target.as_str()) {
                return Err(SemanticError::UnknownBranchTarget {
                    step: step.id.clone(),
                    label: label.to_string(),
                    target: target.clone(),
                });
            }
        }
    }

    // 3. Terminal step
    if let Some(last) = process.steps.last() {
        if last.kind != StepKind::End {
            return Err(SemanticError::LastStepNotEnd);
        }
    }

    debug!(name = %process.name, steps = process.steps.len(), "process validated");
    Ok(())
}
