/*!
Error types for axsim operations.

Only caller contract violations surface as errors. Recoverable reference
errors (unresolved relationship ids, invalid explicit roles, malformed
numeric values), relationship cycles, and stale ids after a rebuild all
degrade to fallback or partial results instead.
*/

use super::NodeId;

/// Errors that can occur during axsim operations.
#[derive(Debug, thiserror::Error)]
pub enum AxsimError {
  #[error("Node not found: {0}")]
  NodeNotFound(NodeId),

  #[error("Unknown navigation filter: {0:?}")]
  UnknownFilter(String),
}

/// Result type for axsim operations.
pub type AxsimResult<T> = Result<T, AxsimError>;
