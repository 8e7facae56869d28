use crate::ast::{Process, StepKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Empty when the step has no actor.
    pub actor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    /// Empty for unconditional edges, the branch label otherwise.
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flowchart {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

/// One node per step and one edge per `next`/branch, in declaration order.
pub fn to_flowchart(process: &Process) -> Flowchart {
    let nodes = process
        .steps
        .iter()
        .map(|s| FlowNode {
            id: s.id.clone(),
            kind: s.kind,
            actor: s.actor.clone().unwrap_or_default(),
        })
        .collect();

    let mut edges = Vec::new();
    for s in &process.steps {
        if let Some(next) = s.successor() {
            edges.push(FlowEdge {
                from: s.id.clone(),
                to: next.to_string(),
                label: String::new(),
            });
        }
        for (label, dest) in &s.branches {
            edges.push(FlowEdge {
                from: s.id.clone(),
                to: dest.clone(),
                label: label.to_string(),
            });
        }
    }

    Flowchart { nodes, edges }
}
