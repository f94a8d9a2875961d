// ABOUTME: Error type for the textual program parser

use thiserror::Error;

/// Failure modes for [`crate::text::parse_program`]. Domain operations
/// elsewhere (interpretation, type checking, constraint analysis) return
/// `Option` rather than a `Result` — there's no message worth attaching to
/// "this program doesn't type-check" — but the textual parser's failures
/// are genuine syntax errors with a position and a reason worth reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("{function}: expected {expected} argument(s), got {actual}")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("malformed input: {0}")]
    Malformed(String),
}
