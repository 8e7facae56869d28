use crate::codegen::{double_quote, Dialect};

/// JavaScript generator function. A small `evaluate` helper binds the keys of
/// `context` as parameters so conditions can name them directly.
#[derive(Debug, Clone, Copy)]
pub struct JavaScript;

impl Dialect for JavaScript {
    fn name(&self) -> &str {
        "javascript"
    }

    fn prelude(&self) -> Vec<String> {
        vec![
            "function evaluate(expression, context) {".to_string(),
            "    return Function(...Object.keys(context), \"return (\" + expression + \");\")(...Object.values(context));".to_string(),
            "}".to_string(),
            String::new(),
        ]
    }

    fn function_open(&self) -> String {
        "function* run(context) {".to_string()
    }

    fn function_close(&self) -> Option<String> {
        Some("}".to_string())
    }

    fn comment(&self, text: &str) -> String {
        format!("// {}", text)
    }

    fn null(&self) -> &'static str {
        "null"
    }

    fn boolean(&self, value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }

    fn declare(&self, var: &str, value: &str) -> String {
        format!("let {} = {};", var, value)
    }

    fn assign(&self, var: &str, value: &str) -> String {
        format!("{} = {};", var, value)
    }

    fn evaluate(&self, condition: &str) -> String {
        format!("evaluate({}, context)", double_quote(condition))
    }

    fn if_open(&self, test: &str) -> String {
        format!("if ({}) {{", test)
    }

    fn else_open(&self) -> String {
        "} else {".to_string()
    }

    fn if_close(&self) -> Option<String> {
        Some("}".to_string())
    }

    fn yield_pair(&self, step_literal: &str, var: &str) -> String {
        format!("yield [{}, {}];", step_literal, var)
    }
}
