use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum RunfileError {
	#[error(transparent)]
	#[diagnostic(code(runfile::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(runfile::config_parse),
		help("check that runfile.toml is valid TOML with an optional [project] section")
	)]
	ConfigParse(String),

	#[error("invalid config value for `{key}`: `{value}`")]
	#[diagnostic(
		code(runfile::invalid_config),
		help("values must be non-empty and contain no whitespace or markup characters")
	)]
	InvalidConfig { key: String, value: String },

	#[error("output directory already exists: `{path}`")]
	#[diagnostic(
		code(runfile::output_exists),
		help("remove the directory or choose another one with `--output`")
	)]
	OutputExists { path: String },

	#[error("not a single-file program: `{path}`")]
	#[diagnostic(
		code(runfile::invalid_input_path),
		help("pass the path to a `.cs` file")
	)]
	InvalidInputPath { path: String },

	#[error("conversion failed with {count} diagnostic(s)")]
	#[diagnostic(
		code(runfile::conversion_failed),
		help("fix the reported directives or pass `--force` to emit the project anyway")
	)]
	ConversionFailed { count: usize },
}

/// A problem with a single `#:` directive line.
///
/// Every variant aborts only the contribution of the line it was found on.
/// Scanning always continues with the next line.
#[derive(Debug, Clone, PartialEq, Eq, Diagnostic, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[non_exhaustive]
pub enum DirectiveError {
	/// The keyword is empty or not one of `sdk`, `property` or `package`.
	#[error("unrecognized directive `{keyword}`")]
	#[diagnostic(
		code(runfile::unrecognized_directive),
		help("supported directives: `#:sdk`, `#:property`, `#:package`")
	)]
	UnrecognizedDirective { keyword: String },

	/// The keyword was recognised but no name follows it.
	#[error("missing name for `#:{keyword}` directive")]
	#[diagnostic(
		code(runfile::missing_directive_name),
		help("write the directive as `#:{keyword} Name [Value]`")
	)]
	MissingDirectiveName { keyword: String },

	/// A `#:property` directive without a value.
	#[error("property directive needs both a name and a value")]
	#[diagnostic(
		code(runfile::property_missing_parts),
		help("write the directive as `#:property Name Value`")
	)]
	PropertyDirectiveMissingParts,

	/// The name is not a valid element name for the project file.
	#[error("invalid character `{character}` (U+{code_point:04X}) in directive name")]
	#[diagnostic(
		code(runfile::invalid_name),
		help(
			"names must start with a letter or `_` and continue with letters, digits, `_`, `-` \
			 or `.`"
		)
	)]
	PropertyDirectiveInvalidName { character: char, code_point: u32 },

	/// A directive that appears after the first line of code.
	#[error("directive cannot be converted because it appears after the first line of code")]
	#[diagnostic(
		code(runfile::cannot_convert_directive),
		help("move the directive above all code or pass `--force` to drop it")
	)]
	CannotConvertDirective,
}

impl DirectiveError {
	/// The diagnostic code as a plain string, e.g. `runfile::invalid_name`.
	pub fn code_str(&self) -> String {
		Diagnostic::code(self).map(|code| code.to_string()).unwrap_or_default()
	}

	/// The help text, if any.
	pub fn help_str(&self) -> Option<String> {
		Diagnostic::help(self).map(|help| help.to_string())
	}
}

pub type RunfileResult<T> = Result<T, RunfileError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
