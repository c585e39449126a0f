use std::fmt::Display;

use sensible_merging_common::ChunkId;

pub mod error_code;

#[derive(Debug)]
pub enum ErrorKind {
  // --- Configuration
  InvalidOptions {
    reason: String,
  },

  // --- Chunk graph
  ChunkNotFound {
    chunk: ChunkId,
  },
  IntegrationRejected {
    target: ChunkId,
    source: ChunkId,
  },

  /// This error means that the merge pass panics because unrecoverable error happens.
  ///
  /// Host chunk graphs can use this to surface their own failures through the port.
  /// For a plain error, use `ErrorKind::Panic { source: anyhow::format_err!("Errored") }`.
  Panic {
    source: anyhow::Error,
  },
}

impl Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ErrorKind::InvalidOptions { reason } => write!(f, "Invalid options: {reason}"),
      ErrorKind::ChunkNotFound { chunk } => write!(f, r#"Chunk "{chunk}" does not exist in the chunk graph."#),
      ErrorKind::IntegrationRejected { target, source } => write!(f, r#"Chunk "{source}" cannot be integrated into chunk "{target}"."#),
      ErrorKind::Panic { source } => source.fmt(f),
    }
  }
}

impl ErrorKind {
  pub fn code(&self) -> &'static str {
    match self {
      ErrorKind::InvalidOptions { .. } => error_code::INVALID_OPTIONS,
      ErrorKind::ChunkNotFound { .. } => error_code::CHUNK_NOT_FOUND,
      ErrorKind::IntegrationRejected { .. } => error_code::INTEGRATION_REJECTED,
      ErrorKind::Panic { .. } => error_code::PANIC,
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::Error;
  use sensible_merging_common::ChunkId;

  #[test]
  fn messages() {
    insta::assert_snapshot!(
      Error::invalid_options("\"minSizeReduce\" must be a positive number, received -1.").kind,
      @r###"Invalid options: "minSizeReduce" must be a positive number, received -1."###
    );
    insta::assert_snapshot!(
      Error::chunk_not_found(&ChunkId::new("vendors")).kind,
      @r###"Chunk "vendors" does not exist in the chunk graph."###
    );
  }

  #[test]
  fn codes() {
    assert_eq!(Error::invalid_options("").kind.code(), "INVALID_OPTIONS");
    assert_eq!(
      Error::integration_rejected(&ChunkId::new("a"), &ChunkId::new("b"))
        .kind
        .code(),
      "INTEGRATION_REJECTED"
    );
  }
}
