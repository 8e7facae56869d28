use crate::ast::Process;
use crate::visualize::flowchart::to_flowchart;
use crate::visualize::Direction;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

/// Mermaid flowchart markup with the default top-down layout.
pub fn to_diagram_text(process: &Process) -> String {
    to_diagram_text_with(process, Direction::default())
}

/// Header line, then one `id[kind]` line per step, then one line per edge
/// in the same order as `to_flowchart`. Ids Mermaid cannot take verbatim are
/// replaced by a positional key and shown through a quoted label.
pub fn to_diagram_text_with(process: &Process, direction: Direction) -> String {
    let chart = to_flowchart(process);
    let taken: HashSet<&str> = chart.nodes.iter().map(|n| n.id.as_str()).filter(|id| is_plain_id(id)).collect();
    let mut keys: HashMap<&str, String> = HashMap::new();
    for (i, node) in chart.nodes.iter().enumerate() {
        let key = if is_plain_id(&node.id) {
            node.id.clone()
        } else {
            let mut key = format!("step_{}", i);
            while taken.contains(key.as_str()) {
                key.push('_');
            }
            key
        };
        keys.entry(node.id.as_str()).or_insert(key);
    }
    let key = |id: &str| keys.get(id).cloned().unwrap_or_else(|| id.to_string());

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write!(out, "flowchart {}", direction);
    for node in &chart.nodes {
        if is_plain_id(&node.id) {
            let _ = write!(out, "\n{}[{}]", node.id, node.kind);
        } else {
            let _ = write!(out, "\n{}[\"{} ({})\"]", key(&node.id), escape_label(&node.id), node.kind);
        }
    }
    for edge in &chart.edges {
        if edge.label.is_empty() {
            let _ = write!(out, "\n{} --> {}", key(&edge.from), key(&edge.to));
        } else {
            let _ = write!(out, "\n{} --{}--> {}", key(&edge.from), edge.label, key(&edge.to));
        }
    }
    out
}

fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Mermaid entity codes for characters that end a quoted label.
fn escape_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("#quot;"),
            '#' => out.push_str("#35;"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}
