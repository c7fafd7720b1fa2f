use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render markdown-flavoured text as indented markup.",
	long_about = "emdown reads markdown-flavoured text from a file or stdin and prints the \
	              equivalent markup, one block element per line and indented by depth.\n\nAnything \
	              that does not form a complete construct is kept as the text it was written \
	              as, so every input renders.\n\nExamples:\n  emdown notes.md\n  echo '# Hi' | \
	              emdown\n  emdown --scan --format json notes.md"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct EmdownCli {
	/// File to render. Reads stdin when omitted.
	pub file: Option<PathBuf>,

	/// Print the scanned tokens instead of the rendered markup.
	#[arg(long, default_value_t = false)]
	pub scan: bool,

	/// Output format for `--scan`. Use `text` for one token per line or
	/// `json` for programmatic consumption.
	#[arg(long, value_enum, default_value_t = DumpFormat::Text)]
	pub format: DumpFormat,

	/// Path to a config file. By default `emdown.toml`, `.emdown.toml` and
	/// `.config/emdown.toml` are looked up in the working directory.
	#[arg(long, short)]
	pub config: Option<PathBuf>,

	/// Spaces per indentation level. Overrides the config file.
	#[arg(long)]
	pub indent: Option<usize>,

	/// Indent with tabs. Overrides the config file.
	#[arg(long, default_value_t = false)]
	pub tabs: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
	#[default]
	Text,
	Json,
}
