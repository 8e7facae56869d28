use crate::codegen::{double_quote, Dialect};

/// Python generator function; conditions go through `eval` with `context` as locals.
#[derive(Debug, Clone, Copy)]
pub struct Python;

impl Dialect for Python {
    fn name(&self) -> &str {
        "python"
    }

    fn function_open(&self) -> String {
        "def run(context):".to_string()
    }

    fn function_close(&self) -> Option<String> {
        None
    }

    fn empty_body(&self) -> Vec<String> {
        vec!["return".to_string(), "yield".to_string()]
    }

    fn comment(&self, text: &str) -> String {
        format!("# {}", text)
    }

    fn null(&self) -> &'static str {
        "None"
    }

    fn boolean(&self, value: bool) -> &'static str {
        if value { "True" } else { "False" }
    }

    fn declare(&self, var: &str, value: &str) -> String {
        self.assign(var, value)
    }

    fn assign(&self, var: &str, value: &str) -> String {
        format!("{} = {}", var, value)
    }

    fn evaluate(&self, condition: &str) -> String {
        format!("eval({}, {{}}, context)", double_quote(condition))
    }

    fn if_open(&self, test: &str) -> String {
        format!("if {}:", test)
    }

    fn else_open(&self) -> String {
        "else:".to_string()
    }

    fn if_close(&self) -> Option<String> {
        None
    }

    fn yield_pair(&self, step_literal: &str, var: &str) -> String {
        format!("yield {}, {}", step_literal, var)
    }
}
