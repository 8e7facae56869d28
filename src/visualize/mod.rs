//! Projections of a validated process for display: a node/edge graph and
//! diagram markup text.

pub mod flowchart;
pub mod mermaid;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use flowchart::{to_flowchart, FlowEdge, FlowNode, Flowchart};
pub use mermaid::{to_diagram_text, to_diagram_text_with};

/// Layout direction written into the diagram header.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    #[default]
    TD,
    LR,
    BT,
    RL,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::TD => "TD",
            Direction::LR => "LR",
            Direction::BT => "BT",
            Direction::RL => "RL",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TD" | "TB" => Ok(Direction::TD),
            "LR" => Ok(Direction::LR),
            "BT" => Ok(Direction::BT),
            "RL" => Ok(Direction::RL),
            other => Err(format!("unknown diagram direction '{}'", other)),
        }
    }
}
