use derive_more::Deref;
use serde::Serialize;

use crate::lexer::scan_line;

/// The prefix that marks a build directive.
pub const DIRECTIVE_MARKER: &str = "#:";
/// The prefix of an interpreter line, only recognised on the first line.
pub const INTERPRETER_MARKER: &str = "#!";

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// One physical line of the input. The raw text keeps its line terminator so
/// that lines can be concatenated back into the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
	/// 0-indexed line number.
	pub index: usize,
	/// Byte offset of the first character of the line in the input.
	pub offset: usize,
	/// The line including its terminator (`\n` or `\r\n`), if any.
	pub raw: &'a str,
}

impl<'a> SourceLine<'a> {
	/// The line without its terminator.
	pub fn content(&self) -> &'a str {
		let without_newline = self.raw.strip_suffix('\n').unwrap_or(self.raw);
		without_newline
			.strip_suffix('\r')
			.unwrap_or(without_newline)
	}

	/// The content with the byte-order mark removed when this is the first
	/// line.
	pub fn text(&self) -> &'a str {
		let content = self.content();

		if self.index == 0 {
			content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content)
		} else {
			content
		}
	}
}

/// All physical lines of an input, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct SourceLines<'a>(Vec<SourceLine<'a>>);

impl<'a> SourceLines<'a> {
	/// Split the input on `\n`. An empty input has no lines and a trailing
	/// newline does not start an extra empty line.
	pub fn new(input: &'a str) -> Self {
		let mut offset = 0;
		let lines = input
			.split_inclusive('\n')
			.enumerate()
			.map(|(index, raw)| {
				let line = SourceLine { index, offset, raw };
				offset += raw.len();
				line
			})
			.collect();

		Self(lines)
	}
}

/// The category assigned to each physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineTag {
	/// `#!` on the very first line with no leading whitespace.
	Marker,
	/// A `#:` build directive.
	Directive,
	/// Empty or whitespace only.
	Blank,
	/// Only comments and whitespace.
	Comment,
	/// Anything else.
	Code,
}

impl LineTag {
	/// Whether lines with this tag may appear inside the directive region.
	pub fn is_region_eligible(self) -> bool {
		!matches!(self, Self::Code)
	}
}

/// Classifies lines one at a time, carrying the block-comment state from one
/// line to the next.
///
/// Lines must be fed in order. The classifier never looks back.
#[derive(Debug, Default)]
pub struct LineClassifier {
	in_block_comment: bool,
}

impl LineClassifier {
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether a block comment is open after the last classified line.
	pub fn in_block_comment(&self) -> bool {
		self.in_block_comment
	}

	pub fn classify(&mut self, line: &SourceLine<'_>) -> LineTag {
		let text = line.text();

		if line.index == 0 && text.starts_with(INTERPRETER_MARKER) {
			return LineTag::Marker;
		}

		let trimmed = text.trim();
		let starts_in_block = self.in_block_comment;

		if starts_in_block || trimmed.starts_with("/*") || trimmed.starts_with("//") {
			let scan = scan_line(text, starts_in_block);
			self.in_block_comment = scan.ends_in_block_comment;

			return if scan.has_code {
				LineTag::Code
			} else {
				LineTag::Comment
			};
		}

		if trimmed.starts_with(DIRECTIVE_MARKER) {
			return LineTag::Directive;
		}

		if trimmed.is_empty() {
			return LineTag::Blank;
		}

		// Code can still open a block comment that later lines fall into.
		self.in_block_comment = scan_line(text, false).ends_in_block_comment;

		LineTag::Code
	}
}

/// Classify every line of the input in order.
pub fn classify_lines(lines: &SourceLines<'_>) -> Vec<LineTag> {
	let mut classifier = LineClassifier::new();
	lines.iter().map(|line| classifier.classify(line)).collect()
}

/// Byte offset and 1-indexed character column of the directive marker on a
/// line tagged [`LineTag::Directive`]. Both are relative to
/// [`SourceLine::text`].
pub(crate) fn marker_position(text: &str) -> (usize, usize) {
	let rest = text.trim_start();
	let byte_offset = text.len() - rest.len();
	let column = text[..byte_offset].chars().count() + 1;

	(byte_offset, column)
}
