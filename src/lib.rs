//! # pdl - process-definition-language toolchain
//!
//! Turns a textual workflow description (named `task`/`decision`/`end` steps
//! with actors, conditions and branches) into validated, optimized,
//! executable and visual artifacts:
//!
//! 1. **Load** source text into a value tree (`compiler::loader`).
//! 2. **Parse** it into a typed `Process` (`compiler::parser`).
//! 3. **Validate** the structural invariants (`compiler::semantic`).
//! 4. Fan out from the validated process: merge suggestions
//!    (`compiler::optimizer`), Python and JavaScript generators (`codegen`),
//!    a node/edge flowchart and Mermaid markup (`visualize`).
//!
//! ```rust,no_run
//! use pdl::prelude::*;
//!
//! # fn main() -> Result<(), PdlError> {
//! let source = std::fs::read_to_string("order.yaml").unwrap_or_default();
//! let process = parse(&source)?;
//! validate(&process)?;
//! println!("{}", generate_python(&process));
//! println!("{}", to_diagram_text(&process));
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod catalog;
pub mod codegen;
pub mod compiler;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod simulate;
pub mod visualize;

pub mod prelude {
    pub use crate::ast::builder::ProcessBuilder;
    pub use crate::ast::{BranchLabel, Process, Step, StepKind};
    pub use crate::codegen::{generate_javascript, generate_python};
    pub use crate::compiler::{find_optimizations, parse, parse_with, validate, Reader};
    pub use crate::config::{ArtifactKind, PipelineConfig};
    pub use crate::error::{ParseError, PdlError, SemanticError, SimulationError};
    pub use crate::pipeline::{compile, compile_concurrent, Artifacts};
    pub use crate::simulate::simulate;
    pub use crate::visualize::{to_diagram_text, to_flowchart, Direction, Flowchart};
}
