use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, Subcommand};
use pdl::catalog::Catalog;
use pdl::compiler::loader::read_source;
use pdl::compiler::Reader;
use pdl::config::{ArtifactKind, PipelineConfig};
use pdl::error::PdlError;
use pdl::pipeline::{compile_concurrent, front_end};
use pdl::simulate::simulate;
use pdl::visualize::Direction;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, Level};

const EXIT_SYNTAX: u8 = 2;
const EXIT_LOGIC: u8 = 3;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pipeline config file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Source reader: yaml or minimal
    #[arg(long, global = true)]
    reader: Option<Reader>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a process file
    Check {
        /// Path to the process YAML file
        file: PathBuf,
    },

    /// Compile a process file into its artifacts
    Compile {
        /// Path to the process YAML file
        file: PathBuf,

        /// Artifacts to produce (comma separated)
        #[arg(long, value_delimiter = ',')]
        emit: Vec<ArtifactKind>,

        /// Diagram layout direction
        #[arg(long)]
        direction: Option<Direction>,

        /// Write artifacts here instead of printing them
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Print the (step, next) pairs the generated code would yield
    Simulate {
        /// Path to the process YAML file
        file: PathBuf,

        /// Condition variables (key=value)
        #[arg(long, short = 'D', value_parser = parse_key_val)]
        vars: Vec<(String, serde_json::Value)>,
    },

    /// Compile every process file in a directory
    Batch {
        dir: PathBuf,
    },
}

fn parse_key_val(s: &str) -> Result<(String, serde_json::Value), String> {
    let pos = s.find('=').ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    let key = s[..pos].to_string();
    let val_str = &s[pos + 1..];
    // Try parsing as JSON, otherwise treat as string
    let val = serde_json::from_str(val_str).unwrap_or_else(|_| serde_json::Value::String(val_str.to_string()));
    Ok((key, val))
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(reader) = cli.reader {
        config.reader = reader;
    }
    Ok(config)
}

/// Distinct exit codes for syntax and logic errors.
fn report(e: &PdlError) -> ExitCode {
    error!("{}", e);
    match e {
        PdlError::Parse(_) => ExitCode::from(EXIT_SYNTAX),
        PdlError::Semantic(_) | PdlError::Simulation(_) => ExitCode::from(EXIT_LOGIC),
    }
}

fn write_artifacts(artifacts: &pdl::pipeline::Artifacts, config: &PipelineConfig, file: &Path, out_dir: Option<&Path>) -> Result<()> {
    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("process");

    for &kind in &config.emit {
        let Some(text) = artifacts.render(kind) else { continue };
        match out_dir {
            Some(dir) => {
                let path = dir.join(kind.file_name(stem));
                fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
                info!(artifact = %kind, path = %path.display(), "artifact written");
            }
            None => println!("=== {} ===\n{}\n", kind, text),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Check { file } => {
            let text = read_source(&file)?;
            match front_end(&text, config.reader) {
                Ok(process) => {
                    println!("{}: ok ({} steps)", file.display(), process.steps.len());
                }
                Err(e) => return Ok(report(&e)),
            }
        }

        Commands::Compile { file, emit, direction, out_dir } => {
            if !emit.is_empty() {
                config.emit = emit;
            }
            if let Some(direction) = direction {
                config.diagram_direction = direction;
            }
            if let Some(dir) = &out_dir {
                fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
            }

            let text = read_source(&file)?;
            let artifacts = match compile_concurrent(&text, &config).await {
                Ok(a) => a,
                Err(e) => return Ok(report(&e)),
            };
            write_artifacts(&artifacts, &config, &file, out_dir.as_deref())?;
        }

        Commands::Simulate { file, vars } => {
            let text = read_source(&file)?;
            let process = match front_end(&text, config.reader) {
                Ok(p) => p,
                Err(e) => return Ok(report(&e)),
            };
            let vars: HashMap<_, _> = vars.into_iter().collect();
            match simulate(&process, &vars) {
                Ok(pairs) => {
                    for (step, next) in pairs {
                        println!("{} -> {}", step, next.as_deref().unwrap_or("-"));
                    }
                }
                Err(e) => return Ok(report(&PdlError::from(e))),
            }
        }

        Commands::Batch { dir } => {
            let catalog = Catalog::new(config);
            let summary = catalog.compile_dir(&dir).await?;
            for path in &summary.compiled {
                println!("ok      {}", path.display());
            }
            for (path, message) in &summary.failed {
                println!("FAILED  {}: {}", path.display(), message);
            }
            info!(compiled = summary.compiled.len(), failed = summary.failed.len(), "batch finished");
            if !summary.failed.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
