use crate::compiler::Reader;
use crate::visualize::Direction;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// An output the pipeline can produce from a validated process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Optimizations,
    Python,
    Javascript,
    Flowchart,
    Mermaid,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Optimizations,
        ArtifactKind::Python,
        ArtifactKind::Javascript,
        ArtifactKind::Flowchart,
        ArtifactKind::Mermaid,
    ];

    /// File name used when artifacts are written to a directory.
    pub fn file_name(&self, stem: &str) -> String {
        match self {
            ArtifactKind::Optimizations => format!("{}.optimizations.txt", stem),
            ArtifactKind::Python => format!("{}.py", stem),
            ArtifactKind::Javascript => format!("{}.js", stem),
            ArtifactKind::Flowchart => format!("{}.flowchart.json", stem),
            ArtifactKind::Mermaid => format!("{}.mmd", stem),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactKind::Optimizations => "optimizations",
            ArtifactKind::Python => "python",
            ArtifactKind::Javascript => "javascript",
            ArtifactKind::Flowchart => "flowchart",
            ArtifactKind::Mermaid => "mermaid",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArtifactKind::ALL
            .into_iter()
            .find(|k| k.to_string() == s)
            .ok_or_else(|| format!("unknown artifact '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub reader: Reader,
    pub emit: Vec<ArtifactKind>,
    pub diagram_direction: Direction,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reader: Reader::default(),
            emit: ArtifactKind::ALL.to_vec(),
            diagram_direction: Direction::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Failed to deserialize pipeline config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file from {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn wants(&self, kind: ArtifactKind) -> bool {
        self.emit.contains(&kind)
    }
}
