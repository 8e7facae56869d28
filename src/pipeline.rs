use crate::ast::Process;
use crate::codegen::{generate_javascript, generate_python};
use crate::compiler::{find_optimizations, parse_with, validate, Reader};
use crate::config::{ArtifactKind, PipelineConfig};
use crate::error::PdlError;
use crate::visualize::{to_diagram_text_with, to_flowchart, Direction, Flowchart};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Everything one invocation produced. Only requested artifacts are `Some`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Artifacts {
    pub process: Process,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimizations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flowchart: Option<Flowchart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mermaid: Option<String>,
}

impl Artifacts {
    fn empty(process: Process) -> Self {
        Self {
            process,
            optimizations: None,
            python: None,
            javascript: None,
            flowchart: None,
            mermaid: None,
        }
    }

    fn apply(&mut self, output: StageOutput) {
        match output {
            StageOutput::Optimizations(v) => self.optimizations = Some(v),
            StageOutput::Python(v) => self.python = Some(v),
            StageOutput::Javascript(v) => self.javascript = Some(v),
            StageOutput::Flowchart(v) => self.flowchart = Some(v),
            StageOutput::Mermaid(v) => self.mermaid = Some(v),
        }
    }

    /// Text form of one artifact, as written to disk by the CLI.
    pub fn render(&self, kind: ArtifactKind) -> Option<String> {
        match kind {
            ArtifactKind::Optimizations => self.optimizations.as_ref().map(|v| v.join("\n")),
            ArtifactKind::Python => self.python.clone(),
            ArtifactKind::Javascript => self.javascript.clone(),
            ArtifactKind::Flowchart => self
                .flowchart
                .as_ref()
                .and_then(|f| serde_json::to_string_pretty(f).ok()),
            ArtifactKind::Mermaid => self.mermaid.clone(),
        }
    }
}

enum StageOutput {
    Optimizations(Vec<String>),
    Python(String),
    Javascript(String),
    Flowchart(Flowchart),
    Mermaid(String),
}

fn run_stage(kind: ArtifactKind, process: &Process, direction: Direction) -> StageOutput {
    match kind {
        ArtifactKind::Optimizations => StageOutput::Optimizations(find_optimizations(process)),
        ArtifactKind::Python => StageOutput::Python(generate_python(process)),
        ArtifactKind::Javascript => StageOutput::Javascript(generate_javascript(process)),
        ArtifactKind::Flowchart => StageOutput::Flowchart(to_flowchart(process)),
        ArtifactKind::Mermaid => StageOutput::Mermaid(to_diagram_text_with(process, direction)),
    }
}

/// Parse and validate. The result is the only input the fan-out stages accept.
pub fn front_end(text: &str, reader: Reader) -> Result<Process, PdlError> {
    let process = parse_with(text, reader)?;
    validate(&process)?;
    Ok(process)
}

pub fn compile(text: &str, config: &PipelineConfig) -> Result<Artifacts, PdlError> {
    let process = front_end(text, config.reader)?;
    let mut artifacts = Artifacts::empty(process);
    for &kind in &config.emit {
        let output = run_stage(kind, &artifacts.process, config.diagram_direction);
        artifacts.apply(output);
    }
    info!(name = %artifacts.process.name, artifacts = config.emit.len(), "pipeline finished");
    Ok(artifacts)
}

/// Same result as `compile`; the fan-out stages run as independent blocking
/// tasks sharing one immutable process.
pub async fn compile_concurrent(text: &str, config: &PipelineConfig) -> Result<Artifacts, PdlError> {
    let process = Arc::new(front_end(text, config.reader)?);
    let direction = config.diagram_direction;

    let mut stages = JoinSet::new();
    for &kind in &config.emit {
        let process = process.clone();
        stages.spawn_blocking(move || run_stage(kind, &process, direction));
    }

    let mut artifacts = Artifacts::empty((*process).clone());
    while let Some(joined) = stages.join_next().await {
        match joined {
            Ok(output) => artifacts.apply(output),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => warn!(error = %e, "pipeline stage cancelled"),
        }
    }

    info!(name = %artifacts.process.name, artifacts = config.emit.len(), "concurrent pipeline finished");
    Ok(artifacts)
}
