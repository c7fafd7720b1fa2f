use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::EmdownError;
use crate::EmdownResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["emdown.toml", ".emdown.toml", ".config/emdown.toml"];

/// Spaces per depth level when nothing else is configured.
pub const DEFAULT_INDENT: usize = 2;

/// Configuration loaded from an `emdown.toml` file.
///
/// ```toml
/// [print]
/// indent = 4
/// tabs = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EmdownConfig {
	/// How rendered markup is laid out.
	#[serde(default)]
	pub print: PrintOptions,
}

/// Layout of the pretty printed output.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PrintOptions {
	/// Spaces per depth level. Ignored when `tabs` is set.
	#[serde(default = "default_indent")]
	pub indent: usize,
	/// Indent with one tab per depth level.
	#[serde(default)]
	pub tabs: bool,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			indent: DEFAULT_INDENT,
			tabs: false,
		}
	}
}

impl PrintOptions {
	/// The text written once per depth level.
	pub fn unit(&self) -> String {
		if self.tabs {
			"\t".to_string()
		} else {
			" ".repeat(self.indent)
		}
	}
}

fn default_indent() -> usize {
	DEFAULT_INDENT
}

impl EmdownConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> EmdownResult<Option<EmdownConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		Self::load_from(&config_path).map(Some)
	}

	/// Load the config from an explicit path, which must exist.
	pub fn load_from(path: &Path) -> EmdownResult<EmdownConfig> {
		if !path.is_file() {
			return Err(EmdownError::ConfigNotFound(path.display().to_string()));
		}

		let content = std::fs::read_to_string(path)?;
		Self::from_toml(&content)
	}

	pub fn from_toml(content: &str) -> EmdownResult<EmdownConfig> {
		toml::from_str(content).map_err(|e| EmdownError::ConfigParse(e.to_string()))
	}
}
