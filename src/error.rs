use thiserror::Error;

/// Malformed input: raised by the source reader or the parser, before a `Process` exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("root must be a mapping")]
    RootNotMapping,

    #[error("root must contain 'process'")]
    MissingProcess,

    #[error("'process' must be a mapping")]
    ProcessNotMapping,

    #[error("'steps' must be a list")]
    StepsNotSequence,

    #[error("each step requires 'id' and 'type'")]
    MissingIdOrType,

    #[error("step '{step}' has unknown type '{kind}'")]
    UnknownStepType { step: String, kind: String },

    #[error("field '{field}' must be a scalar")]
    NonScalarField { field: String },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("invalid YAML: {0}")]
    Yaml(String),
}

/// A well-formed process that breaks one of the structural invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("duplicate step id '{0}'")]
    DuplicateStepId(String),

    #[error("task '{0}' requires an actor")]
    MissingActor(String),

    #[error("step '{step}' references unknown next step '{target}'")]
    UnknownNextStep { step: String, target: String },

    #[error("step '{step}' branch '{label}' references unknown step '{target}'")]
    UnknownBranchTarget {
        step: String,
        label: String,
        target: String,
    },

    #[error("last step must be of type 'end'")]
    LastStepNotEnd,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("condition of decision '{step}' could not be evaluated: {message}")]
    Condition { step: String, message: String },
}

/// Any failure of a pipeline invocation. The variant tells syntax errors
/// apart from logic errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PdlError {
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("logical error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),
}
