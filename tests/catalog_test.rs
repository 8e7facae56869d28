use pdl::catalog::Catalog;
use pdl::config::PipelineConfig;
use std::fs;
use std::path::PathBuf;

const GOOD: &str = r#"
process:
  name: Good
  steps:
    - id: a
      type: task
      actor: bob
      next: done
    - id: done
      type: end
"#;

const BAD: &str = r#"
process:
  name: Bad
  steps:
    - id: a
      type: task
      actor: bob
      next: nowhere
    - id: done
      type: end
"#;

#[tokio::test]
async fn test_compile_dir_collects_successes_and_failures() {
    let temp_dir = tempfile::tempdir().unwrap();
    let good = temp_dir.path().join("good.yaml");
    let bad = temp_dir.path().join("bad.yml");
    fs::write(&good, GOOD).unwrap();
    fs::write(&bad, BAD).unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not a process").unwrap();

    let catalog = Catalog::new(PipelineConfig::default());
    let summary = catalog.compile_dir(temp_dir.path()).await.expect("batch failed");

    assert_eq!(summary.compiled, vec![good.clone()]);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, bad);
    assert!(summary.failed[0].1.contains("unknown next step"));

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(&good).unwrap().process.name, "Good");
    assert!(catalog.get(&bad).is_none());
    assert!(catalog.failure(&bad).is_some());
}

#[tokio::test]
async fn test_register_replaces_previous_failure() {
    let catalog = Catalog::new(PipelineConfig::default());
    let path = PathBuf::from("memory/process.yaml");

    assert!(catalog.register(path.clone(), BAD).await.is_err());
    assert!(catalog.failure(&path).is_some());
    assert!(catalog.is_empty());

    let artifacts = catalog.register(path.clone(), GOOD).await.unwrap();
    assert_eq!(artifacts.process.steps.len(), 2);
    assert!(catalog.failure(&path).is_none());
    assert_eq!(catalog.len(), 1);
}

#[tokio::test]
async fn test_compile_dir_missing_directory_errors() {
    let catalog = Catalog::new(PipelineConfig::default());
    assert!(catalog.compile_dir(&PathBuf::from("/definitely/not/here")).await.is_err());
}
