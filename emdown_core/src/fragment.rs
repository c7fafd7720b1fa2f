//! Turns a raw `<...>` fragment from the source into a structured tag.

use html_escape::decode_html_entities;
use logos::Logos;

use crate::EmdownError;
use crate::EmdownResult;
use crate::event::Attribute;
use crate::event::Event;

/// Raw tokens produced by logos for flat tokenization of a tag fragment.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
	#[token("<")]
	Open,
	#[token("</")]
	EndOpen,
	#[token(">")]
	Close,
	#[token("/")]
	Slash,
	#[token("=")]
	Equals,
	#[regex(r"[ \t\r\n\f]+")]
	Whitespace,
	#[regex(r#""[^"]*""#)]
	DoubleQuoted,
	#[regex(r"'[^']*'")]
	SingleQuoted,
	#[regex(r#"[^\s"'=<>/]+"#)]
	Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
	Start,
	End,
	SelfClosing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
	pub kind: TagKind,
	/// Lowercased tag name.
	pub name: String,
	pub attributes: Vec<Attribute>,
}

impl Tag {
	pub fn into_event(self) -> Event {
		match self.kind {
			TagKind::Start => Event::start_with(self.name, self.attributes),
			TagKind::End => Event::end(self.name),
			TagKind::SelfClosing => Event::self_closing(self.name, self.attributes),
		}
	}
}

/// A parsed `<...>` fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
	Tag(Tag),
	/// The body of an `<!-- ... -->` comment.
	Comment(String),
}

impl Fragment {
	/// The attributes of a `<!--table key="value" ...-->` directive, or `None`
	/// when this fragment is anything else.
	pub fn table_directive(&self) -> Option<Vec<Attribute>> {
		let Fragment::Comment(body) = self else {
			return None;
		};

		let body = body.trim();
		let rest = body.strip_prefix("table")?;

		if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
			return None;
		}

		match parse_fragment(&format!("<{body}>")) {
			Ok(Fragment::Tag(tag)) => Some(tag.attributes),
			_ => None,
		}
	}
}

/// Parse a single start tag, end tag, self-closing tag or comment.
pub fn parse_fragment(fragment: &str) -> EmdownResult<Fragment> {
	let trimmed = fragment.trim();

	if trimmed.is_empty() {
		return Err(EmdownError::EmptyFragment);
	}

	if let Some(body) = trimmed.strip_prefix("<!--") {
		let body = body
			.strip_suffix("-->")
			.ok_or_else(|| EmdownError::UnterminatedComment(fragment.to_string()))?;
		return Ok(Fragment::Comment(body.to_string()));
	}

	TagWalker::new(trimmed)?.walk().map(Fragment::Tag)
}

/// Walks the logos token stream of one fragment.
struct TagWalker<'a> {
	fragment: &'a str,
	tokens: Vec<(RawToken, &'a str)>,
	cursor: usize,
}

impl<'a> TagWalker<'a> {
	fn new(fragment: &'a str) -> EmdownResult<Self> {
		let mut tokens = vec![];

		for (result, span) in RawToken::lexer(fragment).spanned() {
			let Ok(token) = result else {
				return Err(malformed(fragment, "unbalanced quote"));
			};
			tokens.push((token, &fragment[span]));
		}

		Ok(Self {
			fragment,
			tokens,
			cursor: 0,
		})
	}

	fn peek(&self) -> Option<RawToken> {
		self.tokens.get(self.cursor).map(|(token, _)| *token)
	}

	fn bump(&mut self) -> Option<(RawToken, &'a str)> {
		let token = self.tokens.get(self.cursor).copied();
		self.cursor += 1;
		token
	}

	fn skip_whitespace(&mut self) {
		while self.peek() == Some(RawToken::Whitespace) {
			self.cursor += 1;
		}
	}

	fn walk(mut self) -> EmdownResult<Tag> {
		let mut kind = match self.bump() {
			Some((RawToken::Open, _)) => TagKind::Start,
			Some((RawToken::EndOpen, _)) => TagKind::End,
			_ => return Err(malformed(self.fragment, "expected `<` or `</`")),
		};

		let name = match self.bump() {
			Some((RawToken::Word, word)) => word.to_ascii_lowercase(),
			_ => return Err(malformed(self.fragment, "expected a tag name")),
		};

		let mut attributes = vec![];

		loop {
			self.skip_whitespace();

			match self.bump() {
				Some((RawToken::Close, _)) => break,
				Some((RawToken::Slash, _)) if self.peek() == Some(RawToken::Close) => {
					if kind == TagKind::End {
						return Err(malformed(self.fragment, "end tags cannot self-close"));
					}
					self.cursor += 1;
					kind = TagKind::SelfClosing;
					break;
				}
				Some((RawToken::Word, key)) if kind != TagKind::End => {
					let value = self.attribute_value()?;
					attributes.push(Attribute::new(key.to_ascii_lowercase(), value));
				}
				_ => return Err(malformed(self.fragment, "unexpected content in tag")),
			}
		}

		if self.cursor < self.tokens.len() {
			return Err(malformed(self.fragment, "content after the closing `>`"));
		}

		Ok(Tag {
			kind,
			name,
			attributes,
		})
	}

	/// The value after `key`, or an empty string for a bare attribute.
	fn attribute_value(&mut self) -> EmdownResult<String> {
		let checkpoint = self.cursor;
		self.skip_whitespace();

		if self.peek() != Some(RawToken::Equals) {
			self.cursor = checkpoint;
			return Ok(String::new());
		}

		self.cursor += 1;
		self.skip_whitespace();

		let value = match self.bump() {
			Some((RawToken::DoubleQuoted | RawToken::SingleQuoted, quoted)) => {
				quoted[1..quoted.len() - 1].to_string()
			}
			Some((RawToken::Word | RawToken::Slash, first)) => {
				// Unquoted values such as `/docs/index.html` span several
				// adjacent words and slashes.
				let mut value = first.to_string();
				while let Some(RawToken::Word | RawToken::Slash) = self.peek() {
					if self.peek() == Some(RawToken::Slash)
						&& self.tokens.get(self.cursor + 1).map(|(token, _)| *token)
							== Some(RawToken::Close)
					{
						break;
					}
					if let Some((_, part)) = self.bump() {
						value.push_str(part);
					}
				}
				value
			}
			_ => return Err(malformed(self.fragment, "expected an attribute value")),
		};

		Ok(decode_html_entities(&value).into_owned())
	}
}

fn malformed(fragment: &str, reason: &str) -> EmdownError {
	EmdownError::MalformedFragment {
		fragment: fragment.to_string(),
		reason: reason.to_string(),
	}
}
