use std::io::Read;
use std::path::Path;
use std::process;

use clap::Parser;
use emdown_cli::DumpFormat;
use emdown_cli::EmdownCli;
use emdown_core::AnyEmptyResult;
use emdown_core::AnyResult;
use emdown_core::EmdownConfig;
use emdown_core::PrintOptions;
use emdown_core::Renderer;
use emdown_core::TokenKind;
use emdown_core::TokenStream;
use emdown_core::tokenize;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

fn main() {
	let args = EmdownCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_logging(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if let Err(e) = run(&args) {
		match e.downcast::<emdown_core::EmdownError>() {
			Ok(emdown_err) => {
				let report: miette::Report = (*emdown_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				if color_enabled() {
					eprintln!("{} {e}", "error:".red());
				} else {
					eprintln!("error: {e}");
				}
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so they never mix with rendered output. `RUST_LOG`
/// takes precedence over `--verbose`.
fn init_logging(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.init();
}

fn run(args: &EmdownCli) -> AnyEmptyResult {
	let source = read_source(args.file.as_deref())?;

	if args.scan {
		let tokens = tokenize(&source);
		match args.format {
			DumpFormat::Text => print!("{}", format_tokens(&tokens)),
			DumpFormat::Json => println!("{}", serde_json::to_string_pretty(&tokens)?),
		}
		return Ok(());
	}

	let options = resolve_print_options(args)?;
	let renderer = Renderer::default().with_options(options);
	println!("{}", renderer.render(&source));

	Ok(())
}

fn read_source(file: Option<&Path>) -> AnyResult<String> {
	if let Some(path) = file {
		tracing::debug!(path = %path.display(), "reading source file");
		return Ok(std::fs::read_to_string(path)?);
	}

	let mut source = String::new();
	std::io::stdin().read_to_string(&mut source)?;
	Ok(source)
}

/// Config file values first, then command line overrides.
fn resolve_print_options(args: &EmdownCli) -> AnyResult<PrintOptions> {
	let config = match &args.config {
		Some(path) => Some(EmdownConfig::load_from(path)?),
		None => EmdownConfig::load(&std::env::current_dir()?)?,
	};

	let mut options = config.map(|config| config.print).unwrap_or_default();

	if let Some(indent) = args.indent {
		options.indent = indent;
	}

	if args.tabs {
		options.tabs = true;
	}

	Ok(options)
}

fn format_tokens(tokens: &TokenStream) -> String {
	let mut output = String::new();

	for token in tokens.iter().filter(|token| token.kind != TokenKind::Eof) {
		let kind = if color_enabled() {
			format!("{}", token.kind.cyan().bold())
		} else {
			token.kind.to_string()
		};
		output.push_str(&format!("{kind} {:?} {:?}\n", token.literal, token.raw));
	}

	output
}
