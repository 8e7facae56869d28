use pdl::ast::builder::ProcessBuilder;
use pdl::ast::{Process, Step, StepKind};
use pdl::compiler::{parse, validate};
use pdl::error::SemanticError;

#[test]
fn test_valid_linear_process() {
    // Start(task, user) -> end
    let process = ProcessBuilder::new("linear")
        .task("start", "user")
        .next("end")
        .end("end")
        .build();
    assert_eq!(validate(&process), Ok(()));
}

#[test]
fn test_empty_process_is_valid() {
    assert_eq!(validate(&Process::new("empty", Vec::new())), Ok(()));
}

#[test]
fn test_unknown_next_step() {
    let text = r#"
process:
  name: Bad
  steps:
    - id: a
      type: task
      actor: user
      next: missing
    - id: end
      type: end
"#;
    let process = parse(text).expect("parse should succeed");
    let err = validate(&process).unwrap_err();
    assert!(err.to_string().contains("unknown next step"));
    assert_eq!(
        err,
        SemanticError::UnknownNextStep { step: "a".to_string(), target: "missing".to_string() }
    );
}

#[test]
fn test_unknown_branch_target() {
    let process = ProcessBuilder::new("branchy")
        .decision("check", "x > 1")
        .then("done")
        .otherwise("nowhere")
        .end("done")
        .build();
    let err = validate(&process).unwrap_err();
    assert_eq!(err.to_string(), "step 'check' branch 'else' references unknown step 'nowhere'");
}

#[test]
fn test_task_requires_actor() {
    let mut process = ProcessBuilder::new("no-actor").task("a", "").next("end").end("end").build();
    assert_eq!(validate(&process), Err(SemanticError::MissingActor("a".to_string())));

    process.steps[0].actor = None;
    let err = validate(&process).unwrap_err();
    assert_eq!(err.to_string(), "task 'a' requires an actor");
}

#[test]
fn test_last_step_must_be_end() {
    let process = ProcessBuilder::new("open").task("a", "bob").next("b").task("b", "bob").build();
    let err = validate(&process).unwrap_err();
    assert_eq!(err, SemanticError::LastStepNotEnd);
    assert_eq!(err.to_string(), "last step must be of type 'end'");
}

#[test]
fn test_duplicate_id_reported_before_missing_actor() {
    // `dup` is declared twice and the second copy has no actor.
    let process = ProcessBuilder::new("dups")
        .task("dup", "bob")
        .step(Step::new("dup", StepKind::Task))
        .end("end")
        .build();
    assert_eq!(validate(&process), Err(SemanticError::DuplicateStepId("dup".to_string())));
}

#[test]
fn test_missing_actor_reported_before_dangling_reference() {
    let process = ProcessBuilder::new("order")
        .task("a", "bob")
        .next("ghost")
        .task("b", "")
        .end("end")
        .build();
    assert_eq!(validate(&process), Err(SemanticError::MissingActor("b".to_string())));
}

#[test]
fn test_dangling_reference_reported_before_terminal_rule() {
    let process = ProcessBuilder::new("order").task("a", "bob").next("ghost").build();
    assert!(matches!(validate(&process), Err(SemanticError::UnknownNextStep { .. })));
}

#[test]
fn test_empty_next_is_treated_as_absent() {
    let process = ProcessBuilder::new("empty-next").task("a", "bob").next("").end("end").build();
    assert_eq!(validate(&process), Ok(()));
}
