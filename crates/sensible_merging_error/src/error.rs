use std::fmt::Display;

use sensible_merging_common::ChunkId;

use crate::ErrorKind;

#[derive(Debug)]
pub struct Error {
  contexts: Vec<String>,
  pub kind: ErrorKind,
}

impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    self.kind.to_string().eq(&other.kind.to_string())
  }
}

impl Eq for Error {}

impl Error {
  fn with_kind(kind: ErrorKind) -> Self {
    Self {
      contexts: vec![],
      kind,
    }
  }

  pub fn context(mut self, context: impl Into<String>) -> Self {
    self.contexts.push(context.into());
    self
  }

  pub fn invalid_options(reason: impl Into<String>) -> Self {
    Self::with_kind(ErrorKind::InvalidOptions {
      reason: reason.into(),
    })
  }

  pub fn chunk_not_found(chunk: &ChunkId) -> Self {
    Self::with_kind(ErrorKind::ChunkNotFound {
      chunk: chunk.clone(),
    })
  }

  pub fn integration_rejected(target: &ChunkId, source: &ChunkId) -> Self {
    Self::with_kind(ErrorKind::IntegrationRejected {
      target: target.clone(),
      source: source.clone(),
    })
  }

  pub fn panic(msg: String) -> Self {
    anyhow::format_err!(msg).into()
  }
}

impl std::convert::From<anyhow::Error> for Error {
  fn from(value: anyhow::Error) -> Self {
    Self::with_kind(ErrorKind::Panic { source: value })
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match &self.kind {
      ErrorKind::Panic { source, .. } => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for ctx in self.contexts.iter().rev() {
      writeln!(f, "{}: {}", ansi_term::Color::Yellow.paint("context"), ctx)?;
    }

    self.kind.fmt(f)
  }
}
