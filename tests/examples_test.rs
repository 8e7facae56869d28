use pdl::compiler::loader::{load_process_from_file, Reader};
use pdl::compiler::{find_optimizations, validate};
use pdl::codegen::{generate_javascript, generate_python};
use pdl::visualize::{to_diagram_text, to_flowchart};
use std::path::Path;

fn run_example(file_name: &str) -> pdl::ast::Process {
    let path = Path::new("pdl_examples").join(file_name);
    println!("Compiling example: {:?}", path);

    let process = load_process_from_file(&path, Reader::Yaml).expect("Failed to load process");
    let minimal = load_process_from_file(&path, Reader::Minimal).expect("Minimal reader failed");
    assert_eq!(process, minimal);

    validate(&process).expect("Validation failed");

    let chart = to_flowchart(&process);
    assert_eq!(chart.nodes.len(), process.steps.len());
    assert!(generate_python(&process).starts_with("def run(context):"));
    assert!(generate_javascript(&process).contains("function* run(context) {"));
    assert!(to_diagram_text(&process).starts_with("flowchart TD"));
    process
}

#[test]
fn test_example_expense_approval() {
    let process = run_example("expense_approval.yaml");
    assert_eq!(process.name, "Expense approval");
    // manager_approval -> reimburse are different actors
    assert!(find_optimizations(&process).is_empty());
}

#[test]
fn test_example_onboarding() {
    let process = run_example("onboarding.yaml");
    assert_eq!(
        find_optimizations(&process),
        vec!["Steps 'create_account' and 'assign_laptop' performed by 'it' could be merged".to_string()]
    );
}

#[test]
fn test_example_support_ticket() {
    let process = run_example("support_ticket.yaml");
    assert_eq!(process.steps[1].condition.as_deref(), Some("priority == \"high\""));
}
