use thiserror::Error;

/// Errors that can occur while compiling a pattern bundle into a [`crate::Machine`].
///
/// No partial machine is ever returned alongside an error: the pipeline
/// stops at the first failing pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("pattern {pattern_index}: {source}")]
    PatternSyntax {
        pattern_index: usize,
        #[source]
        source: PatternSyntaxError,
    },
    #[error("pattern {pattern_index}: reserved sentinel code unit 0 at position {position}")]
    PatternAlphabet { pattern_index: usize, position: usize },
    #[error("no patterns were supplied to compile")]
    EmptyBundle,
}

/// The specific syntax failure underlying a [`CompileError::PatternSyntax`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternSyntaxError {
    #[error("pattern is empty")]
    EmptyPattern,
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParens { position: usize },
    #[error("operator '{op}' at position {position} has no operand")]
    MissingOperand { op: char, position: usize },
    #[error("escape at position {position} has no following code unit")]
    UnterminatedEscape { position: usize },
}
