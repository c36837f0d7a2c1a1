use serde::Serialize;

use crate::DirectiveError;

/// A directive problem together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveDiagnostic {
	/// What went wrong.
	#[serde(flatten)]
	pub kind: DirectiveError,
	/// 1-indexed line number.
	pub line: usize,
	/// 1-indexed character column of the `#:` marker.
	pub column: usize,
	/// Byte offset of the `#:` marker in the input.
	pub offset: usize,
	/// Byte length of the directive text, starting at `offset`.
	pub length: usize,
}

impl DirectiveDiagnostic {
	/// Human-readable message for this diagnostic.
	pub fn message(&self) -> String {
		self.kind.to_string()
	}
}

impl std::fmt::Display for DirectiveDiagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}: {}", self.line, self.column, self.kind)
	}
}

/// Accumulates diagnostics in the order they are found.
///
/// In collect-all mode every diagnostic is kept. Otherwise everything after
/// the first is dropped.
#[derive(Debug)]
pub struct DiagnosticCollector {
	collect_all: bool,
	diagnostics: Vec<DirectiveDiagnostic>,
}

impl DiagnosticCollector {
	pub fn new(collect_all: bool) -> Self {
		Self {
			collect_all,
			diagnostics: Vec::new(),
		}
	}

	pub fn push(&mut self, diagnostic: DirectiveDiagnostic) {
		if !self.collect_all && !self.diagnostics.is_empty() {
			tracing::trace!(%diagnostic, "dropping diagnostic in fail-fast mode");
			return;
		}

		tracing::debug!(%diagnostic, "directive diagnostic");
		self.diagnostics.push(diagnostic);
	}

	pub fn is_empty(&self) -> bool {
		self.diagnostics.is_empty()
	}

	pub fn len(&self) -> usize {
		self.diagnostics.len()
	}

	pub fn into_vec(self) -> Vec<DirectiveDiagnostic> {
		self.diagnostics
	}
}
