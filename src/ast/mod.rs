pub mod builder;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A whole process document: a name plus its steps in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Process {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Process {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    /// Id -> step lookup, computed on demand. On duplicate ids the last one wins.
    pub fn step_map(&self) -> HashMap<&str, &Step> {
        self.steps.iter().map(|s| (s.id.as_str(), s)).collect()
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Task,
    Decision,
    End,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Task => "task",
            StepKind::Decision => "decision",
            StepKind::End => "end",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "task" => Some(StepKind::Task),
            "decision" => Some(StepKind::Decision),
            "end" => Some(StepKind::End),
            _ => None,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels of the conditional edges leaving a decision. Only `then` and `else`
/// exist; the derived ordering is the iteration order of `Step::branches`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum BranchLabel {
    Then,
    Else,
}

impl BranchLabel {
    pub const ALL: [BranchLabel; 2] = [BranchLabel::Then, BranchLabel::Else];

    pub fn as_str(&self) -> &'static str {
        match self {
            BranchLabel::Then => "then",
            BranchLabel::Else => "else",
        }
    }
}

impl fmt::Display for BranchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the process graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub branches: BTreeMap<BranchLabel, String>,
}

impl Step {
    pub fn new(id: impl Into<String>, kind: StepKind) -> Self {
        Self {
            id: id.into(),
            kind,
            actor: None,
            next: None,
            condition: None,
            branches: BTreeMap::new(),
        }
    }

    /// The unconditional successor. An empty `next` counts as absent.
    pub fn successor(&self) -> Option<&str> {
        self.next.as_deref().filter(|n| !n.is_empty())
    }

    pub fn branch(&self, label: BranchLabel) -> Option<&str> {
        self.branches.get(&label).map(String::as_str)
    }

    /// Non-empty actor, if any.
    pub fn performer(&self) -> Option<&str> {
        self.actor.as_deref().filter(|a| !a.is_empty())
    }
}
