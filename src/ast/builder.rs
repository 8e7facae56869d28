use crate::ast::{BranchLabel, Process, Step, StepKind};

/// Fluent construction of a `Process` without going through source text.
///
/// Modifiers (`next`, `then`, `otherwise`, `condition`) apply to the most
/// recently added step.
pub struct ProcessBuilder {
    name: String,
    pub steps: Vec<Step>, // public so tests can tamper with the list directly
}

impl ProcessBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            steps: Vec::new(),
        }
    }

    pub fn task(mut self, id: &str, actor: &str) -> Self {
        let mut step = Step::new(id, StepKind::Task);
        step.actor = Some(actor.to_string());
        self.steps.push(step);
        self
    }

    pub fn decision(mut self, id: &str, condition: &str) -> Self {
        let mut step = Step::new(id, StepKind::Decision);
        step.condition = Some(condition.to_string());
        self.steps.push(step);
        self
    }

    pub fn end(mut self, id: &str) -> Self {
        self.steps.push(Step::new(id, StepKind::End));
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn next(self, target: &str) -> Self {
        self.modify(|s| s.next = Some(target.to_string()))
    }

    pub fn condition(self, condition: &str) -> Self {
        self.modify(|s| s.condition = Some(condition.to_string()))
    }

    pub fn then(self, target: &str) -> Self {
        self.modify(|s| {
            s.branches.insert(BranchLabel::Then, target.to_string());
        })
    }

    pub fn otherwise(self, target: &str) -> Self {
        self.modify(|s| {
            s.branches.insert(BranchLabel::Else, target.to_string());
        })
    }

    fn modify(mut self, f: impl FnOnce(&mut Step)) -> Self {
        if let Some(last) = self.steps.last_mut() {
            f(last);
        }
        self
    }

    pub fn build(self) -> Process {
        Process {
            name: self.name,
            steps: self.steps,
        }
    }
}
