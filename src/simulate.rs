use crate::ast::Process;
use crate::codegen::{transitions, Successor};
use crate::error::SimulationError;
use evalexpr::{eval_boolean_with_context, ContextWithMutableVariables, DefaultNumericTypes, HashMapContext};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A `(step_id, next_step)` pair as the generated generators yield it.
pub type Yielded = (String, Option<String>);

/// Walks a validated process the way the generated code does: every step in
/// declaration order, resolving decisions against `vars`.
///
/// Conditions use `evalexpr` syntax. A decision without a condition takes its
/// `else` branch.
pub fn simulate(process: &Process, vars: &HashMap<String, Value>) -> Result<Vec<Yielded>, SimulationError> {
    let eval_ctx = build_context(vars);

    let mut yielded = Vec::with_capacity(process.steps.len());
    for t in transitions(process) {
        let next = match t.successor {
            Successor::Fixed(target) => target,
            Successor::Branch {
                condition,
                then,
                otherwise,
            } => {
                let taken = match condition {
                    Some(cond) => eval_boolean_with_context(&cond, &eval_ctx).map_err(|e| {
                        SimulationError::Condition {
                            step: t.step_id.clone(),
                            message: e.to_string(),
                        }
                    })?,
                    None => false,
                };
                debug!(step = %t.step_id, taken, "decision evaluated");
                if taken { then } else { otherwise }
            }
        };
        yielded.push((t.step_id, next));
    }
    Ok(yielded)
}

fn build_context(vars: &HashMap<String, Value>) -> HashMapContext<DefaultNumericTypes> {
    let mut eval_ctx = HashMapContext::<DefaultNumericTypes>::new();
    for (k, v) in vars {
        let eval_val = match v {
            Value::String(s) => Some(evalexpr::Value::String(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(evalexpr::Value::Int(i))
                } else {
                    n.as_f64().map(evalexpr::Value::Float)
                }
            }
            Value::Bool(b) => Some(evalexpr::Value::Boolean(*b)),
            _ => None,
        };
        match eval_val {
            Some(ev) => {
                if let Err(e) = eval_ctx.set_value(k.clone(), ev) {
                    warn!(var = %k, error = %e, "could not bind variable");
                }
            }
            None => warn!(var = %k, "only scalar variables can be used in conditions"),
        }
    }
    eval_ctx
}
