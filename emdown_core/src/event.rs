use std::fmt::Display;

use html_escape::encode_double_quoted_attribute;
use html_escape::encode_text;

use crate::vocabulary::Vocabulary;

/// A `key="value"` pair on a tag. Attributes keep their source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
	pub key: String,
	pub value: String,
}

impl Attribute {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}
}

impl Display for Attribute {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}=\"{}\"",
			self.key,
			encode_double_quoted_attribute(&self.value)
		)
	}
}

/// One unit of the markup produced by the parser.
///
/// Events are plain values built fresh for every emission; nothing is shared
/// between two positions of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	Start {
		name: String,
		attributes: Vec<Attribute>,
	},
	End {
		name: String,
	},
	SelfClosing {
		name: String,
		attributes: Vec<Attribute>,
	},
	Text(String),
	/// An HTML comment passed through untouched. Holds the body between
	/// `<!--` and `-->`.
	Comment(String),
}

impl Event {
	pub fn start(name: impl Into<String>) -> Self {
		Self::start_with(name, vec![])
	}

	pub fn start_with(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
		Self::Start {
			name: name.into(),
			attributes,
		}
	}

	pub fn end(name: impl Into<String>) -> Self {
		Self::End { name: name.into() }
	}

	pub fn self_closing(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
		Self::SelfClosing {
			name: name.into(),
			attributes,
		}
	}

	pub fn text(content: impl Into<String>) -> Self {
		Self::Text(content.into())
	}

	/// The tag name, if this event is a tag.
	pub fn name(&self) -> Option<&str> {
		match self {
			Self::Start { name, .. } | Self::End { name } | Self::SelfClosing { name, .. } => {
				Some(name)
			}
			Self::Text(_) | Self::Comment(_) => None,
		}
	}

	pub fn is_text(&self) -> bool {
		matches!(self, Self::Text(_))
	}

	/// Whether this is a tag the vocabulary classifies as block level.
	pub fn is_block(&self, vocabulary: &Vocabulary) -> bool {
		self.name().is_some_and(|name| vocabulary.is_block(name))
	}

	/// Text, or a tag the vocabulary classifies as inline.
	pub fn is_inline(&self, vocabulary: &Vocabulary) -> bool {
		match self {
			Self::Text(_) => true,
			_ => self.name().is_some_and(|name| vocabulary.is_inline(name)),
		}
	}
}

impl Display for Event {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Start { name, attributes } => {
				write!(f, "<{name}")?;
				for attribute in attributes {
					write!(f, " {attribute}")?;
				}
				write!(f, ">")
			}
			Self::End { name } => write!(f, "</{name}>"),
			Self::SelfClosing { name, attributes } => {
				write!(f, "<{name}")?;
				for attribute in attributes {
					write!(f, " {attribute}")?;
				}
				write!(f, "/>")
			}
			Self::Text(content) => write!(f, "{}", encode_text(content)),
			Self::Comment(body) => write!(f, "<!--{body}-->"),
		}
	}
}
