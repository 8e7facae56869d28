use crate::ast::Process;
use crate::compiler::{minimal, parser};
use crate::error::ParseError;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Which structured-text reader turns source text into a value tree.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Reader {
    /// Full YAML reader (`serde_yaml`).
    #[default]
    Yaml,
    /// The in-crate subset reader.
    Minimal,
}

impl std::str::FromStr for Reader {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "yaml" => Ok(Reader::Yaml),
            "minimal" => Ok(Reader::Minimal),
            other => Err(format!("unknown reader '{}', expected 'yaml' or 'minimal'", other)),
        }
    }
}

pub fn load_str(text: &str, reader: Reader) -> Result<Value, ParseError> {
    debug!(?reader, lines = text.lines().count(), "loading source text");
    minimal::require_mapping_header(text)?;
    match reader {
        Reader::Yaml => serde_yaml::from_str(text).map_err(|e| ParseError::Yaml(e.to_string())),
        Reader::Minimal => minimal::read(text),
    }
}

pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read process file from {}", path.display()))
}

pub fn load_process_from_file(path: &Path, reader: Reader) -> Result<Process> {
    let text = read_source(path)?;
    let process = parser::parse_with(&text, reader)
        .with_context(|| format!("Failed to parse process from {}", path.display()))?;
    Ok(process)
}
