use crate::config::PrintOptions;
use crate::event::Event;
use crate::vocabulary::Vocabulary;

/// Print events with the default vocabulary and two space indentation.
pub fn pretty_print(events: &[Event]) -> String {
	PrettyPrinter::new(&Vocabulary::default(), &PrintOptions::default()).print(events)
}

/// Lays out markup events as indented text.
///
/// Block tags go on their own line, indented one unit per open block. Inline
/// tags and text stay on the line of whatever precedes them.
#[derive(Debug, Clone)]
pub struct PrettyPrinter<'v> {
	vocabulary: &'v Vocabulary,
	unit: String,
}

impl<'v> PrettyPrinter<'v> {
	pub fn new(vocabulary: &'v Vocabulary, options: &PrintOptions) -> Self {
		Self {
			vocabulary,
			unit: options.unit(),
		}
	}

	pub fn print(&self, events: &[Event]) -> String {
		let mut output = String::new();
		let mut depth = 0usize;
		let mut previous: Option<&Event> = None;

		for event in events {
			let after_inline = previous.is_some_and(|event| event.is_inline(self.vocabulary));

			// Line breaks between blocks come from the layout.
			if matches!(event, Event::Text(content) if content == "\n") && !after_inline {
				continue;
			}

			let block = event.is_block(self.vocabulary);
			let block_start = block && matches!(event, Event::Start { .. });

			if block && matches!(event, Event::End { .. }) {
				depth = depth.saturating_sub(1);
			}

			let after_block = previous.is_some_and(|event| event.is_block(self.vocabulary));
			if (block && after_block) || (block_start && previous.is_some()) {
				output.push('\n');
				output.push_str(&self.unit.repeat(depth));
			}

			output.push_str(&event.to_string());

			if block_start {
				depth += 1;
			}

			previous = Some(event);
		}

		output
	}
}
