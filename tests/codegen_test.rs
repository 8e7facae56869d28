use pdl::ast::builder::ProcessBuilder;
use pdl::ast::Process;
use pdl::codegen::{dialect_by_name, generate, generate_javascript, generate_python, transitions, Successor};
use pdl::compiler::{parse, validate};

const SAMPLE: &str = r#"
process:
  name: Sample
  steps:
    - id: start
      type: task
      actor: user
      next: decision1
    - id: decision1
      type: decision
      condition: "x > 0"
      then: approve
      else: end
    - id: approve
      type: task
      actor: manager
    - id: end
      type: end
"#;

fn sample() -> Process {
    let process = parse(SAMPLE).unwrap();
    validate(&process).unwrap();
    process
}

fn linear() -> Process {
    ProcessBuilder::new("linear").task("start", "user").next("end").end("end").build()
}

/// (step id, successor targets assigned in that step's block), recovered from
/// generated text. Null literals become "-".
fn yielded_pairs(code: &str) -> Vec<(String, Vec<String>)> {
    let mut pairs = Vec::new();
    let mut assigned = Vec::new();
    for line in code.lines().map(str::trim) {
        let is_header = (line.starts_with("# ") || line.starts_with("// ")) && line.ends_with(')');
        if is_header {
            assigned.clear();
        } else if let Some(value) = line.strip_prefix("next_step = ") {
            let value = value.trim_end_matches(';').trim_matches('\'');
            let value = if value == "None" || value == "null" { "-" } else { value };
            assigned.push(value.to_string());
        } else if line.starts_with("yield") {
            let id = line.split('\'').nth(1).unwrap_or_default().to_string();
            pairs.push((id, std::mem::take(&mut assigned)));
        }
    }
    pairs
}

#[test]
fn test_python_output_for_linear_process() {
    let expected = "\
def run(context):
    next_step = None
    # start (task)
    # actor: user
    next_step = 'end'
    yield 'start', next_step
    # end (end)
    next_step = None
    yield 'end', next_step";
    assert_eq!(generate_python(&linear()), expected);
}

#[test]
fn test_javascript_output_for_linear_process() {
    let code = generate_javascript(&linear());
    let body = code.split_once("\n\n").map(|(_, b)| b).expect("prelude should be separated by a blank line");
    let expected = "\
function* run(context) {
    let next_step = null;
    // start (task)
    // actor: user
    next_step = 'end';
    yield ['start', next_step];
    // end (end)
    next_step = null;
    yield ['end', next_step];
}";
    assert_eq!(body, expected);
    assert!(code.starts_with("function evaluate(expression, context) {"));
}

#[test]
fn test_decision_renders_if_else_in_both_dialects() {
    let process = sample();

    let py = generate_python(&process);
    assert!(py.contains("    if eval(\"x > 0\", {}, context):\n        next_step = 'approve'\n    else:\n        next_step = 'end'"));

    let js = generate_javascript(&process);
    assert!(js.contains("    if (evaluate(\"x > 0\", context)) {\n        next_step = 'approve';\n    } else {\n        next_step = 'end';\n    }"));
}

#[test]
fn test_missing_condition_uses_false_literal() {
    let mut process = ProcessBuilder::new("no-cond")
        .decision("check", "")
        .then("done")
        .otherwise("done")
        .end("done")
        .build();
    process.steps[0].condition = None;

    assert!(generate_python(&process).contains("    if False:"));
    assert!(generate_javascript(&process).contains("    if (false) {"));
}

#[test]
fn test_task_without_next_yields_null() {
    let process = sample();
    let pairs = yielded_pairs(&generate_python(&process));
    assert_eq!(pairs[2], ("approve".to_string(), vec!["-".to_string()]));
}

#[test]
fn test_dialects_yield_identical_pairs() {
    for process in [sample(), linear()] {
        let py = yielded_pairs(&generate_python(&process));
        let js = yielded_pairs(&generate_javascript(&process));
        assert_eq!(py, js);
        assert_eq!(py.len(), process.steps.len());
    }

    let py = yielded_pairs(&generate_python(&sample()));
    assert_eq!(py[0], ("start".to_string(), vec!["decision1".to_string()]));
    assert_eq!(py[1], ("decision1".to_string(), vec!["approve".to_string(), "end".to_string()]));
    assert_eq!(py[3], ("end".to_string(), vec!["-".to_string()]));
}

#[test]
fn test_transitions_follow_declaration_order() {
    let ts = transitions(&sample());
    let ids: Vec<_> = ts.iter().map(|t| t.step_id.as_str()).collect();
    assert_eq!(ids, vec!["start", "decision1", "approve", "end"]);
    assert_eq!(
        ts[1].successor,
        Successor::Branch {
            condition: Some("x > 0".to_string()),
            then: Some("approve".to_string()),
            otherwise: Some("end".to_string()),
        }
    );
    assert_eq!(ts[3].successor, Successor::Fixed(None));
}

#[test]
fn test_ids_are_escaped_in_literals() {
    let process = ProcessBuilder::new("quotes").task("o'neil", "bob").next("end").end("end").build();
    assert!(generate_python(&process).contains(r"yield 'o\'neil', next_step"));
}

#[test]
fn test_empty_process_is_still_a_generator() {
    let process = Process::new("empty", Vec::new());
    assert_eq!(generate_python(&process), "def run(context):\n    next_step = None\n    return\n    yield");
    assert!(generate_javascript(&process).ends_with("function* run(context) {\n    let next_step = null;\n}"));
}

#[test]
fn test_dialect_lookup_by_name() {
    let process = linear();
    let py = dialect_by_name("python").expect("python dialect");
    assert_eq!(py.name(), "python");
    assert_eq!(generate(&process, py.as_ref()), generate_python(&process));
    assert!(dialect_by_name("cobol").is_none());
}

#[test]
fn test_multiline_values_stay_inside_comments() {
    let text = r#"
process:
  name: Escapes
  steps:
    - id: "first\nstep"
      type: task
      actor: "bob\nraise SystemExit"
      next: end
    - id: end
      type: end
"#;
    let process = parse(text).unwrap();
    validate(&process).unwrap();

    let python = generate_python(&process);
    assert!(python.contains(r"    # actor: bob\nraise SystemExit"));
    assert!(python.contains(r"    yield 'first\nstep', next_step"));
    assert!(!python.lines().any(|l| l.trim_start().starts_with("raise")));
    assert!(python.lines().skip(1).all(|l| l.starts_with("    ")));

    let javascript = generate_javascript(&process);
    assert!(javascript.contains(r"    // actor: bob\nraise SystemExit"));
    assert!(!javascript.lines().any(|l| l.trim_start().starts_with("raise")));
}
