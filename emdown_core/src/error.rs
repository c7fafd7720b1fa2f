use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum EmdownError {
	#[error(transparent)]
	#[diagnostic(code(emdown::io_error))]
	Io(#[from] std::io::Error),

	#[error("empty tag fragment")]
	#[diagnostic(
		code(emdown::empty_fragment),
		help("a tag fragment must start with `<` and end with `>`")
	)]
	EmptyFragment,

	#[error("malformed tag fragment `{fragment}`: {reason}")]
	#[diagnostic(code(emdown::malformed_fragment))]
	MalformedFragment { fragment: String, reason: String },

	#[error("unterminated comment: `{0}`")]
	#[diagnostic(
		code(emdown::unterminated_comment),
		help("close the comment with `-->`")
	)]
	UnterminatedComment(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(emdown::config_parse),
		help("check that emdown.toml is valid TOML with an optional [print] section")
	)]
	ConfigParse(String),

	#[error("config file not found: `{0}`")]
	#[diagnostic(code(emdown::config_not_found))]
	ConfigNotFound(String),
}

pub type EmdownResult<T> = Result<T, EmdownError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
