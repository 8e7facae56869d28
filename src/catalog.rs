use crate::config::PipelineConfig;
use crate::pipeline::{compile_concurrent, Artifacts};
use anyhow::{Context as AnyhowContext, Result};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

const SOURCE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "pdl"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub compiled: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Compiled artifacts keyed by source path. Safe to share between tasks.
pub struct Catalog {
    config: PipelineConfig,
    entries: DashMap<PathBuf, Arc<Artifacts>>,
    failures: DashMap<PathBuf, String>,
}

impl Catalog {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            entries: DashMap::new(),
            failures: DashMap::new(),
        }
    }

    pub fn get(&self, path: &Path) -> Option<Arc<Artifacts>> {
        self.entries.get(path).map(|e| e.value().clone())
    }

    pub fn failure(&self, path: &Path) -> Option<String> {
        self.failures.get(path).map(|e| e.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compiles `text` and stores the result under `path`, replacing any
    /// previous entry or failure for it.
    pub async fn register(&self, path: PathBuf, text: &str) -> Result<Arc<Artifacts>, String> {
        match compile_concurrent(text, &self.config).await {
            Ok(artifacts) => Ok(self.store(path, artifacts)),
            Err(e) => {
                let message = e.to_string();
                self.store_failure(path, message.clone());
                Err(message)
            }
        }
    }

    /// Compiles every process document directly inside `dir`. One bad file
    /// does not stop the batch.
    pub async fn compile_dir(&self, dir: &Path) -> Result<BatchSummary> {
        let mut sources = Vec::new();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to list process directory {}", dir.display()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            let is_source = path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
            if path.is_file() && is_source {
                sources.push(path);
            }
        }
        sources.sort();
        info!(dir = %dir.display(), files = sources.len(), "compiling process directory");

        let mut jobs = JoinSet::new();
        for path in sources {
            let config = self.config.clone();
            jobs.spawn(async move {
                let result = match tokio::fs::read_to_string(&path).await {
                    Ok(text) => compile_concurrent(&text, &config).await.map_err(|e| e.to_string()),
                    Err(e) => Err(format!("Failed to read {}: {}", path.display(), e)),
                };
                (path, result)
            });
        }

        let mut summary = BatchSummary::default();
        while let Some(joined) = jobs.join_next().await {
            let (path, result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    error!(error = %e, "compile job aborted");
                    continue;
                }
            };
            match result {
                Ok(artifacts) => {
                    info!(path = %path.display(), "compiled");
                    self.store(path.clone(), artifacts);
                    summary.compiled.push(path);
                }
                Err(message) => {
                    warn!(path = %path.display(), error = %message, "failed to compile");
                    self.store_failure(path.clone(), message.clone());
                    summary.failed.push((path, message));
                }
            }
        }

        summary.compiled.sort();
        summary.failed.sort();
        Ok(summary)
    }

    fn store(&self, path: PathBuf, artifacts: Artifacts) -> Arc<Artifacts> {
        let artifacts = Arc::new(artifacts);
        self.failures.remove(&path);
        self.entries.insert(path, artifacts.clone());
        artifacts
    }

    fn store_failure(&self, path: PathBuf, message: String) {
        self.entries.remove(&path);
        self.failures.insert(path, message);
    }
}
