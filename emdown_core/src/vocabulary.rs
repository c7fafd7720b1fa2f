//! Tag names the renderer emits and how every tag name is classified.

use std::collections::BTreeSet;

pub const A: &str = "a";
pub const CODE: &str = "code";
pub const EM: &str = "em";
pub const IMG: &str = "img";
pub const LI: &str = "li";
pub const MATH: &str = "math";
pub const OL: &str = "ol";
pub const P: &str = "p";
pub const PRE: &str = "pre";
pub const STRONG: &str = "strong";
pub const TABLE: &str = "table";
pub const TD: &str = "td";
pub const TH: &str = "th";
pub const TR: &str = "tr";
pub const UL: &str = "ul";

/// `h1` through `h6`, indexed by level minus one.
pub const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

const BLOCK_TAGS: &[&str] = &[
	"address",
	"article",
	"aside",
	"blockquote",
	"dd",
	"details",
	"div",
	"dl",
	"dt",
	"fieldset",
	"figcaption",
	"figure",
	"footer",
	"form",
	"h1",
	"h2",
	"h3",
	"h4",
	"h5",
	"h6",
	"header",
	"hr",
	"li",
	"main",
	"nav",
	"ol",
	"p",
	"pre",
	"section",
	"summary",
	"table",
	"tbody",
	"td",
	"tfoot",
	"th",
	"thead",
	"tr",
	"ul",
];

const INLINE_TAGS: &[&str] = &[
	"a", "abbr", "b", "bdo", "big", "br", "button", "cite", "code", "del", "dfn", "em", "i",
	"img", "input", "ins", "kbd", "label", "map", "mark", "math", "object", "q", "s", "samp",
	"script", "select", "small", "span", "strong", "sub", "sup", "textarea", "time", "tt", "u",
	"var",
];

/// Elements that never have content or an end tag.
const VOID_TAGS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// Whether `name` is an element that is complete without an end tag.
pub fn is_void(name: &str) -> bool {
	VOID_TAGS
		.iter()
		.any(|void| void.eq_ignore_ascii_case(name))
}

/// How a tag name participates in paragraph wrapping and indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
	Block,
	Inline,
	/// Neither list knows the name. Treated like inline content when parsing.
	Unknown,
}

/// An immutable classification of tag names.
///
/// The parser and the printer both consult the same instance so paragraph
/// wrapping and indentation always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
	block: BTreeSet<String>,
	inline: BTreeSet<String>,
}

impl Default for Vocabulary {
	fn default() -> Self {
		Self::new(BLOCK_TAGS.iter().copied(), INLINE_TAGS.iter().copied())
	}
}

impl Vocabulary {
	pub fn new<B, I>(block: B, inline: I) -> Self
	where
		B: IntoIterator,
		B::Item: AsRef<str>,
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		Self {
			block: block
				.into_iter()
				.map(|name| name.as_ref().to_ascii_lowercase())
				.collect(),
			inline: inline
				.into_iter()
				.map(|name| name.as_ref().to_ascii_lowercase())
				.collect(),
		}
	}

	/// Return a copy that additionally classifies `name` as block level.
	#[must_use]
	pub fn with_block(mut self, name: impl AsRef<str>) -> Self {
		let name = name.as_ref().to_ascii_lowercase();
		self.inline.remove(&name);
		self.block.insert(name);
		self
	}

	/// Return a copy that additionally classifies `name` as inline.
	#[must_use]
	pub fn with_inline(mut self, name: impl AsRef<str>) -> Self {
		let name = name.as_ref().to_ascii_lowercase();
		self.block.remove(&name);
		self.inline.insert(name);
		self
	}

	pub fn classify(&self, name: &str) -> TagClass {
		let name = name.to_ascii_lowercase();

		if self.block.contains(&name) {
			TagClass::Block
		} else if self.inline.contains(&name) {
			TagClass::Inline
		} else {
			TagClass::Unknown
		}
	}

	pub fn is_block(&self, name: &str) -> bool {
		self.classify(name) == TagClass::Block
	}

	pub fn is_inline(&self, name: &str) -> bool {
		self.classify(name) == TagClass::Inline
	}
}
