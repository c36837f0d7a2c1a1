use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::RunfileError;
use crate::RunfileResult;

/// SDK used for the project root when the script has no `#:sdk` directive.
pub const DEFAULT_SDK: &str = "Microsoft.NET.Sdk";

/// Target framework written into the fixed property group.
pub const DEFAULT_TARGET_FRAMEWORK: &str = "net10.0";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"runfile.toml",
	".runfile.toml",
	".config/runfile.toml",
];

/// Configuration loaded from a `runfile.toml` file.
///
/// ```toml
/// [project]
/// default_sdk = "Microsoft.NET.Sdk.Web"
/// target_framework = "net10.0"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunfileConfig {
	/// Values that are fixed for every emitted project.
	#[serde(default)]
	pub project: ProjectConfig,
}

/// The `[project]` section. Missing keys fall back to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
	#[serde(default)]
	pub default_sdk: Option<String>,
	#[serde(default)]
	pub target_framework: Option<String>,
}

impl RunfileConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> RunfileResult<Option<RunfileConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;

		Self::from_toml(&content).map(Some)
	}

	/// Parse a config from TOML text.
	pub fn from_toml(content: &str) -> RunfileResult<RunfileConfig> {
		toml::from_str(content).map_err(|e| RunfileError::ConfigParse(e.to_string()))
	}

	/// Resolve the fixed project values, validating anything overridden.
	pub fn defaults(&self) -> RunfileResult<ProjectDefaults> {
		let default_sdk = validated(
			"project.default_sdk",
			self.project.default_sdk.as_deref(),
			DEFAULT_SDK,
		)?;
		let target_framework = validated(
			"project.target_framework",
			self.project.target_framework.as_deref(),
			DEFAULT_TARGET_FRAMEWORK,
		)?;

		Ok(ProjectDefaults {
			default_sdk,
			target_framework,
		})
	}
}

fn validated(key: &str, value: Option<&str>, fallback: &str) -> RunfileResult<String> {
	let Some(value) = value else {
		return Ok(fallback.to_string());
	};

	let is_invalid = value.is_empty()
		|| value
			.chars()
			.any(|ch| ch.is_whitespace() || matches!(ch, '<' | '>' | '&' | '"' | '\''));

	if is_invalid {
		return Err(RunfileError::InvalidConfig {
			key: key.to_string(),
			value: value.to_string(),
		});
	}

	Ok(value.to_string())
}

/// The fixed values every emitted project shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDefaults {
	/// Root SDK when the script declares none.
	pub default_sdk: String,
	/// Value of `<TargetFramework>` in the fixed property group.
	pub target_framework: String,
}

impl Default for ProjectDefaults {
	fn default() -> Self {
		Self {
			default_sdk: DEFAULT_SDK.to_string(),
			target_framework: DEFAULT_TARGET_FRAMEWORK.to_string(),
		}
	}
}

/// Options for a single conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
	/// Keep scanning after the first problem and report all of them. When
	/// `false` only the first diagnostic is kept.
	pub collect_all: bool,
	/// Emit the project even when diagnostics exist. Directives after the
	/// first line of code are then dropped without a diagnostic.
	pub force: bool,
	pub defaults: ProjectDefaults,
}

impl Default for ConvertOptions {
	fn default() -> Self {
		Self {
			collect_all: true,
			force: false,
			defaults: ProjectDefaults::default(),
		}
	}
}

impl ConvertOptions {
	/// Construct [`ConvertOptions`] from an optional [`RunfileConfig`].
	pub fn from_config(config: Option<&RunfileConfig>) -> RunfileResult<Self> {
		let defaults = match config {
			Some(config) => config.defaults()?,
			None => ProjectDefaults::default(),
		};

		Ok(Self {
			defaults,
			..Self::default()
		})
	}
}
