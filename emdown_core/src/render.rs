use crate::config::PrintOptions;
use crate::event::Event;
use crate::parser::parse_with;
use crate::printer::PrettyPrinter;
use crate::vocabulary::Vocabulary;

/// Convert markdown-flavoured source into indented markup text.
///
/// ```rust
/// assert_eq!(emdown_core::render("# Some header"), "<h1>Some header</h1>");
/// ```
pub fn render(source: &str) -> String {
	Renderer::default().render(source)
}

/// The parser and printer configured with one shared vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
	vocabulary: Vocabulary,
	options: PrintOptions,
}

impl Renderer {
	pub fn new(vocabulary: Vocabulary, options: PrintOptions) -> Self {
		Self {
			vocabulary,
			options,
		}
	}

	#[must_use]
	pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
		self.vocabulary = vocabulary;
		self
	}

	#[must_use]
	pub fn with_options(mut self, options: PrintOptions) -> Self {
		self.options = options;
		self
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	pub fn options(&self) -> &PrintOptions {
		&self.options
	}

	pub fn parse(&self, source: &str) -> Vec<Event> {
		parse_with(source, &self.vocabulary)
	}

	pub fn print(&self, events: &[Event]) -> String {
		PrettyPrinter::new(&self.vocabulary, &self.options).print(events)
	}

	pub fn render(&self, source: &str) -> String {
		self.print(&self.parse(source))
	}
}
