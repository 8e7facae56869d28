use crate::ast::{BranchLabel, Process, Step, StepKind};
use crate::compiler::loader::{self, Reader};
use crate::error::ParseError;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Parses process source text with the default reader.
pub fn parse(text: &str) -> Result<Process, ParseError> {
    parse_with(text, Reader::default())
}

pub fn parse_with(text: &str, reader: Reader) -> Result<Process, ParseError> {
    let value = loader::load_str(text, reader)?;
    parse_value(&value)
}

/// Builds a `Process` from an already-loaded value tree. No cross-step checks
/// happen here; see `semantic::validate`.
pub fn parse_value(value: &Value) -> Result<Process, ParseError> {
    let root = value.as_mapping().ok_or(ParseError::RootNotMapping)?;
    let pdata = root.get("process").ok_or(ParseError::MissingProcess)?;
    let pdata = pdata.as_mapping().ok_or(ParseError::ProcessNotMapping)?;

    let name = scalar(pdata, "name")?.unwrap_or_default();

    let steps = match pdata.get("steps") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(raw_steps)) => raw_steps
            .iter()
            .map(parse_step)
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(ParseError::StepsNotSequence),
    };

    debug!(name = %name, steps = steps.len(), "parsed process");
    Ok(Process { name, steps })
}

fn parse_step(raw: &Value) -> Result<Step, ParseError> {
    let raw = raw.as_mapping().ok_or(ParseError::MissingIdOrType)?;

    let id = scalar(raw, "id")?;
    let kind = scalar(raw, "type")?;
    let (id, kind) = match (id, kind) {
        (Some(id), Some(kind)) => (id, kind),
        _ => return Err(ParseError::MissingIdOrType),
    };

    let kind = StepKind::from_name(&kind).ok_or_else(|| ParseError::UnknownStepType {
        step: id.clone(),
        kind,
    })?;

    // Labels other than then/else are not part of the model and are ignored.
    let mut branches = BTreeMap::new();
    for label in BranchLabel::ALL {
        if let Some(target) = scalar(raw, label.as_str())? {
            branches.insert(label, target);
        }
    }

    Ok(Step {
        id,
        kind,
        actor: scalar(raw, "actor")?,
        next: scalar(raw, "next")?,
        condition: scalar(raw, "condition")?,
        branches,
    })
}

/// Reads a scalar field as text. Absent and `null` both yield `None`.
fn scalar(map: &Mapping, field: &str) -> Result<Option<String>, ParseError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(ParseError::NonScalarField {
            field: field.to_string(),
        }),
    }
}
