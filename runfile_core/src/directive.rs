use serde::Serialize;

use crate::DirectiveError;
use crate::classifier::DIRECTIVE_MARKER;

/// The three kinds of build directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectiveKind {
	/// `#:sdk Name [Version]`
	Sdk,
	/// `#:property Name Value`
	Property,
	/// `#:package Name [Version]`
	Package,
}

impl DirectiveKind {
	/// Match a keyword exactly. Keywords are case-sensitive.
	pub fn from_keyword(keyword: &str) -> Option<Self> {
		match keyword {
			"sdk" => Some(Self::Sdk),
			"property" => Some(Self::Property),
			"package" => Some(Self::Package),
			_ => None,
		}
	}

	pub fn keyword(self) -> &'static str {
		match self {
			Self::Sdk => "sdk",
			Self::Property => "property",
			Self::Package => "package",
		}
	}
}

impl std::fmt::Display for DirectiveKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.keyword())
	}
}

/// A successfully parsed directive line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveRecord {
	pub kind: DirectiveKind,
	/// The validated name, e.g. `Microsoft.NET.Sdk` or `LangVersion`.
	pub name: String,
	/// Everything after the name with trailing whitespace removed. Empty when
	/// no value was given. Never interpreted.
	pub value: String,
	/// 0-indexed line the directive was found on.
	pub line_index: usize,
	/// 1-indexed character column of the `#:` marker.
	pub column: usize,
}

impl DirectiveRecord {
	/// The value, or `None` when it is empty.
	pub fn value(&self) -> Option<&str> {
		(!self.value.is_empty()).then_some(self.value.as_str())
	}
}

/// Parse the text of a line tagged as a directive.
///
/// `column` is stored on the record as-is so the caller decides how columns
/// are counted.
pub fn parse_directive(
	text: &str,
	line_index: usize,
	column: usize,
) -> Result<DirectiveRecord, DirectiveError> {
	let trimmed = text.trim();
	let Some(body) = trimmed.strip_prefix(DIRECTIVE_MARKER) else {
		return Err(DirectiveError::UnrecognizedDirective {
			keyword: split_first_word(trimmed).0.to_string(),
		});
	};
	let body = body.trim();

	let (keyword, rest) = split_first_word(body);

	let Some(kind) = DirectiveKind::from_keyword(keyword) else {
		return Err(DirectiveError::UnrecognizedDirective {
			keyword: keyword.to_string(),
		});
	};

	if rest.is_empty() {
		return Err(DirectiveError::MissingDirectiveName {
			keyword: keyword.to_string(),
		});
	}

	let (name, value) = split_first_word(rest);
	let value = value.trim_end();

	if kind == DirectiveKind::Property && value.is_empty() {
		return Err(DirectiveError::PropertyDirectiveMissingParts);
	}

	validate_name(name)?;

	Ok(DirectiveRecord {
		kind,
		name: name.to_string(),
		value: value.to_string(),
		line_index,
		column,
	})
}

/// Check that `name` can be used as an element name or attribute value in the
/// emitted project file.
pub fn validate_name(name: &str) -> Result<(), DirectiveError> {
	let mut chars = name.chars();

	if let Some(first) = chars.next() {
		if !is_name_start_char(first) {
			return Err(invalid_name(first));
		}
	}

	match chars.find(|&ch| !is_name_char(ch)) {
		Some(ch) => Err(invalid_name(ch)),
		None => Ok(()),
	}
}

fn is_name_start_char(ch: char) -> bool {
	ch == '_' || ch.is_alphabetic()
}

fn is_name_char(ch: char) -> bool {
	is_name_start_char(ch) || ch.is_numeric() || matches!(ch, '-' | '.')
}

fn invalid_name(character: char) -> DirectiveError {
	DirectiveError::PropertyDirectiveInvalidName {
		character,
		code_point: u32::from(character),
	}
}

/// Split at the first run of whitespace. The second part has its leading
/// whitespace removed.
fn split_first_word(text: &str) -> (&str, &str) {
	match text.find(char::is_whitespace) {
		Some(end) => (&text[..end], text[end..].trim_start()),
		None => (text, ""),
	}
}
