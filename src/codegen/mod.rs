//! Pseudocode backends. Every backend renders the same transition list, so
//! two dialects only ever differ in surface syntax.

pub mod javascript;
pub mod python;

use crate::ast::{BranchLabel, Process, StepKind};

pub use javascript::JavaScript;
pub use python::Python;

const INDENT: &str = "    ";

/// How a step picks its successor, independent of any dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Successor {
    /// Unconditional; `None` means the step has no next step.
    Fixed(Option<String>),
    Branch {
        condition: Option<String>,
        then: Option<String>,
        otherwise: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub step_id: String,
    pub kind: StepKind,
    pub actor: Option<String>,
    pub successor: Successor,
}

/// One transition per step, in declaration order.
pub fn transitions(process: &Process) -> Vec<Transition> {
    process
        .steps
        .iter()
        .map(|step| {
            let successor = match step.kind {
                StepKind::Task => Successor::Fixed(step.successor().map(str::to_string)),
                StepKind::Decision => Successor::Branch {
                    condition: step.condition.clone().filter(|c| !c.trim().is_empty()),
                    then: step.branch(BranchLabel::Then).map(str::to_string),
                    otherwise: step.branch(BranchLabel::Else).map(str::to_string),
                },
                StepKind::End => Successor::Fixed(None),
            };
            Transition {
                step_id: step.id.clone(),
                kind: step.kind,
                actor: step.actor.clone(),
                successor,
            }
        })
        .collect()
}

/// Surface syntax of one output dialect.
pub trait Dialect: Send + Sync {
    fn name(&self) -> &str;

    /// Lines emitted before the generator function.
    fn prelude(&self) -> Vec<String> {
        Vec::new()
    }
    fn function_open(&self) -> String;
    fn function_close(&self) -> Option<String>;
    /// Body emitted when there are no steps, so the function stays a generator.
    fn empty_body(&self) -> Vec<String> {
        Vec::new()
    }

    fn comment(&self, text: &str) -> String;
    fn null(&self) -> &'static str;
    fn boolean(&self, value: bool) -> &'static str;
    fn declare(&self, var: &str, value: &str) -> String;
    fn assign(&self, var: &str, value: &str) -> String;
    /// Boolean test of a source-level condition against `context`.
    fn evaluate(&self, condition: &str) -> String;
    fn if_open(&self, test: &str) -> String;
    fn else_open(&self) -> String;
    fn if_close(&self) -> Option<String>;
    fn yield_pair(&self, step_literal: &str, var: &str) -> String;
}

const NEXT_VAR: &str = "next_step";

/// Renders `process` as a generator that yields `(step_id, next_step)` for
/// each step in declaration order. Assumes a validated process.
pub fn generate(process: &Process, dialect: &dyn Dialect) -> String {
    let mut lines = dialect.prelude();
    lines.push(dialect.function_open());
    lines.push(indented(1, &dialect.declare(NEXT_VAR, dialect.null())));

    let transitions = transitions(process);
    if transitions.is_empty() {
        lines.extend(dialect.empty_body().iter().map(|l| indented(1, l)));
    }

    for t in &transitions {
        lines.push(indented(1, &dialect.comment(&single_line(&format!("{} ({})", t.step_id, t.kind)))));
        match &t.successor {
            Successor::Fixed(target) => {
                if t.kind == StepKind::Task {
                    let actor = t.actor.as_deref().unwrap_or_default();
                    lines.push(indented(1, &dialect.comment(&single_line(&format!("actor: {}", actor)))));
                }
                lines.push(indented(1, &dialect.assign(NEXT_VAR, &target_literal(dialect, target))));
            }
            Successor::Branch {
                condition,
                then,
                otherwise,
            } => {
                let test = match condition {
                    Some(c) => dialect.evaluate(c),
                    None => dialect.boolean(false).to_string(),
                };
                lines.push(indented(1, &dialect.if_open(&test)));
                lines.push(indented(2, &dialect.assign(NEXT_VAR, &target_literal(dialect, then))));
                lines.push(indented(1, &dialect.else_open()));
                lines.push(indented(2, &dialect.assign(NEXT_VAR, &target_literal(dialect, otherwise))));
                if let Some(close) = dialect.if_close() {
                    lines.push(indented(1, &close));
                }
            }
        }
        lines.push(indented(1, &dialect.yield_pair(&quote(&t.step_id), NEXT_VAR)));
    }

    if let Some(close) = dialect.function_close() {
        lines.push(close);
    }
    lines.join("\n")
}

/// Dialect A.
pub fn generate_python(process: &Process) -> String {
    generate(process, &Python)
}

/// Dialect B.
pub fn generate_javascript(process: &Process) -> String {
    generate(process, &JavaScript)
}

pub fn dialect_by_name(name: &str) -> Option<Box<dyn Dialect>> {
    match name {
        "python" => Some(Box::new(Python)),
        "javascript" => Some(Box::new(JavaScript)),
        _ => None,
    }
}

fn target_literal(dialect: &dyn Dialect, target: &Option<String>) -> String {
    match target {
        Some(id) => quote(id),
        None => dialect.null().to_string(),
    }
}

fn indented(depth: usize, line: &str) -> String {
    format!("{}{}", INDENT.repeat(depth), line)
}

/// Comment text with control characters and line separators escaped, so it
/// cannot end the comment early in either dialect.
fn single_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

/// Single-quoted string literal; valid in both dialects.
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Double-quoted string literal; valid in both dialects.
pub(crate) fn double_quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_escapes_delimiters() {
        assert_eq!(quote("o'brien"), r"'o\'brien'");
        assert_eq!(double_quote(r#"a == "b""#), r#""a == \"b\"""#);
        assert_eq!(quote("a\r\nb"), r"'a\r\nb'");
    }

    #[test]
    fn comment_text_stays_on_one_line() {
        assert_eq!(single_line("bob\nraise SystemExit"), r"bob\nraise SystemExit");
        assert_eq!(single_line("a\r\u{2028}b"), r"a\r\u{2028}b");
        assert_eq!(single_line("plain (task)"), "plain (task)");
    }
}
