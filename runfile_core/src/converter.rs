use serde::Serialize;

use crate::ConfigModel;
use crate::ConvertOptions;
use crate::DiagnosticCollector;
use crate::DirectiveDiagnostic;
use crate::DirectiveError;
use crate::DirectiveRecord;
use crate::LineClassifier;
use crate::LineTag;
use crate::SourceLine;
use crate::SourceLines;
use crate::classifier::marker_position;
use crate::emit_project;
use crate::parse_directive;
use crate::rewrite_source;

/// Whether directives are still accepted. Moves from `Open` to `Terminated`
/// exactly once, at the first line of code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
	#[default]
	Open,
	Terminated,
}

/// Everything learned from one pass over the input.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
	/// One tag per physical line.
	pub tags: Vec<LineTag>,
	/// Index of the first line of code, or the line count if there is none.
	pub boundary: usize,
	/// Directives parsed inside the region, in source order.
	pub records: Vec<DirectiveRecord>,
	pub diagnostics: Vec<DirectiveDiagnostic>,
}

/// Result of converting a single-file program.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
	pub diagnostics: Vec<DirectiveDiagnostic>,
	/// The model built from the directive region.
	pub model: ConfigModel,
	/// The project file, present when there are no diagnostics or emission
	/// was forced.
	pub project: Option<String>,
	/// The source without consumed lines, present whenever `project` is.
	pub source: Option<String>,
}

impl ConversionResult {
	/// Returns true if no diagnostics were produced.
	pub fn is_ok(&self) -> bool {
		self.diagnostics.is_empty()
	}
}

/// Walk the classified lines once, parsing directives inside the region and
/// flagging every directive found after it.
pub fn scan(lines: &SourceLines<'_>, options: &ConvertOptions) -> ScanOutcome {
	let mut classifier = LineClassifier::new();
	let mut collector = DiagnosticCollector::new(options.collect_all);
	let mut state = ScanState::Open;
	let mut boundary = lines.len();
	let mut tags = Vec::with_capacity(lines.len());
	let mut records = Vec::new();

	for line in lines.iter() {
		let tag = classifier.classify(line);
		tracing::trace!(line = line.index + 1, ?tag, "classified");
		tags.push(tag);

		match (state, tag) {
			(ScanState::Open, LineTag::Code) => {
				state = ScanState::Terminated;
				boundary = line.index;
				tracing::debug!(line = line.index + 1, "directive region ends");
			}
			(ScanState::Open, LineTag::Directive) => {
				let text = line.text();
				let (offset, column) = marker_position(text);
				let offset = offset + line.content().len() - text.len();

				match parse_directive(text, line.index, column) {
					Ok(record) => {
						tracing::debug!(
							kind = %record.kind,
							name = %record.name,
							line = line.index + 1,
							"parsed directive"
						);
						records.push(record);
					}
					Err(kind) => collector.push(diagnostic_at(line, kind, offset, column)),
				}
			}
			(ScanState::Terminated, LineTag::Directive) => {
				if options.force {
					tracing::debug!(line = line.index + 1, "dropping directive after code");
				} else {
					let text = line.text();
					let (offset, column) = marker_position(text);
					let offset = offset + line.content().len() - text.len();
					collector.push(diagnostic_at(
						line,
						DirectiveError::CannotConvertDirective,
						offset,
						column,
					));
				}
			}
			_ => {}
		}
	}

	ScanOutcome {
		tags,
		boundary,
		records,
		diagnostics: collector.into_vec(),
	}
}

fn diagnostic_at(
	line: &SourceLine<'_>,
	kind: DirectiveError,
	offset: usize,
	column: usize,
) -> DirectiveDiagnostic {
	DirectiveDiagnostic {
		kind,
		line: line.index + 1,
		column,
		offset: line.offset + offset,
		length: line.content()[offset..].trim_end().len(),
	}
}

/// Convert a single-file program into a project file and the source left
/// after removing its directives.
///
/// Both outputs are withheld while diagnostics exist unless
/// [`ConvertOptions::force`] is set.
#[tracing::instrument(skip_all, fields(bytes = input.len()))]
pub fn convert(input: &str, options: &ConvertOptions) -> ConversionResult {
	let lines = SourceLines::new(input);
	let outcome = scan(&lines, options);
	let model = ConfigModel::build(&outcome.records, &options.defaults.default_sdk);

	let emit = outcome.diagnostics.is_empty() || options.force;
	let (project, source) = if emit {
		(
			Some(emit_project(&model, &options.defaults)),
			Some(rewrite_source(&lines, &outcome.tags, outcome.boundary)),
		)
	} else {
		(None, None)
	};

	tracing::debug!(
		directives = outcome.records.len(),
		diagnostics = outcome.diagnostics.len(),
		emitted = emit,
		"conversion finished"
	);

	ConversionResult {
		diagnostics: outcome.diagnostics,
		model,
		project,
		source,
	}
}
