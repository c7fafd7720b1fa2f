use std::fmt::Display;

use derive_more::Deref;
use serde::Serialize;

/// Every lexical unit the scanner can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
	/// End of input. Always the final token of a stream.
	Eof,
	/// `# `
	H1,
	/// `## `
	H2,
	/// `### `
	H3,
	/// `#### `
	H4,
	/// `##### `
	H5,
	/// `###### `
	H6,
	/// `*` | `_`
	Emphasis,
	/// `**` | `__`
	Strong,
	/// `\n` | `\r\n`
	Newline,
	/// A run of characters no matcher claimed.
	Text,
	/// `[text]`
	LinkText,
	/// `![alt]`
	ImageAlt,
	/// `(href)`, only directly after a link text or image alt.
	Href,
	/// `` ` ``
	InlineCode,
	/// ```` ``` ````
	CodeFence,
	/// `<tag attr="value">`, `</tag>` or `<!-- comment -->`
	RawTag,
	/// `1. `
	OrderedListItem,
	/// `* ` | `- `
	UnorderedListItem,
	/// `content |`
	TableCell,
	/// `$`
	Math,
}

impl TokenKind {
	const HEADERS: [TokenKind; 6] = [
		TokenKind::H1,
		TokenKind::H2,
		TokenKind::H3,
		TokenKind::H4,
		TokenKind::H5,
		TokenKind::H6,
	];

	/// The header kind for a `#` run of the given length.
	pub fn header(level: usize) -> Option<Self> {
		level
			.checked_sub(1)
			.and_then(|index| Self::HEADERS.get(index))
			.copied()
	}

	/// The `1..=6` level of a header kind.
	pub fn header_level(self) -> Option<usize> {
		Self::HEADERS
			.iter()
			.position(|kind| *kind == self)
			.map(|index| index + 1)
	}

	pub fn is_list_item(self) -> bool {
		matches!(self, Self::OrderedListItem | Self::UnorderedListItem)
	}

	/// Tokens that open a block container when they start a line.
	pub fn is_block_opening(self) -> bool {
		self.header_level().is_some()
			|| self.is_list_item()
			|| matches!(self, Self::CodeFence | Self::TableCell)
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Eof => "EOF",
			Self::H1 => "H1",
			Self::H2 => "H2",
			Self::H3 => "H3",
			Self::H4 => "H4",
			Self::H5 => "H5",
			Self::H6 => "H6",
			Self::Emphasis => "EM",
			Self::Strong => "STRONG",
			Self::Newline => "NEWLINE",
			Self::Text => "TEXT",
			Self::LinkText => "LINK_TEXT",
			Self::ImageAlt => "IMG_ALT",
			Self::Href => "HREF",
			Self::InlineCode => "CODE",
			Self::CodeFence => "CODE_FENCE",
			Self::RawTag => "RAW_TAG",
			Self::OrderedListItem => "ORDERED_LIST",
			Self::UnorderedListItem => "UNORDERED_LIST",
			Self::TableCell => "TABLE_CELL",
			Self::Math => "MATH",
		}
	}
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// A classified slice of the source.
///
/// `literal` is the decoded value (the link text without brackets, the text
/// with escapes resolved, the trimmed cell content) while `raw` is exactly what
/// was matched in the source, delimiters and escape backslashes included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
	pub kind: TokenKind,
	pub literal: String,
	pub raw: String,
}

impl Token {
	pub fn new(kind: TokenKind, literal: impl Into<String>, raw: impl Into<String>) -> Self {
		Self {
			kind,
			literal: literal.into(),
			raw: raw.into(),
		}
	}

	pub fn eof() -> Self {
		Self::new(TokenKind::Eof, "", "")
	}

	/// Text made only of spaces and tabs.
	pub fn is_blank_text(&self) -> bool {
		self.kind == TokenKind::Text && self.literal.chars().all(|ch| ch == ' ' || ch == '\t')
	}

	/// Width of the blanks preceding the marker of a list item. A tab counts
	/// as four columns.
	pub fn indent(&self) -> usize {
		self.raw
			.chars()
			.take_while(|ch| *ch == ' ' || *ch == '\t')
			.map(|ch| if ch == '\t' { 4 } else { 1 })
			.sum()
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {:?} {:?}", self.kind, self.literal, self.raw)
	}
}

/// The fully materialized output of the scanner, terminated by
/// [`TokenKind::Eof`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, Serialize)]
#[serde(transparent)]
pub struct TokenStream(Vec<Token>);

impl TokenStream {
	/// Concatenate the raw spans. For every input this reproduces the source
	/// the stream was scanned from.
	pub fn raw_source(&self) -> String {
		self.0.iter().map(|token| token.raw.as_str()).collect()
	}

	pub fn kinds(&self) -> Vec<TokenKind> {
		self.0.iter().map(|token| token.kind).collect()
	}

	pub fn into_inner(self) -> Vec<Token> {
		self.0
	}
}

impl From<Vec<Token>> for TokenStream {
	fn from(tokens: Vec<Token>) -> Self {
		Self(tokens)
	}
}

impl FromIterator<Token> for TokenStream {
	fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl Display for TokenStream {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for token in self.0.iter().filter(|token| token.kind != TokenKind::Eof) {
			writeln!(f, "{token}")?;
		}

		Ok(())
	}
}
