use crate::tokens::Token;
use crate::tokens::TokenKind;
use crate::tokens::TokenStream;

/// Scan the whole source into a token stream terminated by
/// [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> TokenStream {
	Scanner::new(source).collect()
}

/// Which matchers are allowed to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanContext {
	/// A complete document: every matcher is active.
	#[default]
	Document,
	/// The content of a single table cell. Headers, list items and table cells
	/// are never produced.
	Inline,
}

/// The matchers tried at each position of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Matcher {
	Header,
	OrderedList,
	UnorderedList,
	TableCell,
	Newline,
	LinkText,
	ImageAlt,
	Href,
	Strong,
	Emphasis,
	CodeFence,
	InlineCode,
	RawTag,
	Math,
}

impl Matcher {
	/// Highest priority first. The order is part of the grammar: headers and
	/// list markers must be claimed before the characters fall into text,
	/// table cells swallow whole lines before any inline matcher sees them,
	/// and `**` must be tried before `*` so strong is never split into two
	/// emphasis delimiters.
	const PRIORITY: [Matcher; 14] = [
		Matcher::Header,
		Matcher::OrderedList,
		Matcher::UnorderedList,
		Matcher::TableCell,
		Matcher::Newline,
		Matcher::LinkText,
		Matcher::ImageAlt,
		Matcher::Href,
		Matcher::Strong,
		Matcher::Emphasis,
		Matcher::CodeFence,
		Matcher::InlineCode,
		Matcher::RawTag,
		Matcher::Math,
	];

	fn is_block(self) -> bool {
		matches!(
			self,
			Matcher::Header | Matcher::OrderedList | Matcher::UnorderedList | Matcher::TableCell
		)
	}
}

/// The next offset of a needle at or after the last search start. The
/// scanner only moves forward, so each byte of the source is searched at most
/// once per needle.
#[derive(Debug, Clone, Copy, Default)]
struct Lookahead {
	searched_from: usize,
	/// `None` until the first search.
	next: Option<Option<usize>>,
}

impl Lookahead {
	fn find(&mut self, source: &str, from: usize, needle: &str) -> Option<usize> {
		match self.next {
			Some(None) if from >= self.searched_from => return None,
			Some(Some(offset)) if offset >= from && from >= self.searched_from => {
				return Some(offset);
			}
			_ => {}
		}

		let found = source
			.get(from..)
			.and_then(|rest| rest.find(needle))
			.map(|index| from + index);
		self.searched_from = from;
		self.next = Some(found);
		found
	}
}

/// Splits markdown-flavoured source into [`Token`]s.
///
/// Characters no matcher claims accumulate in a pending run which is flushed
/// as a [`TokenKind::Text`] token right before the next matched token. The
/// matched token is then held back and returned by the following call.
pub struct Scanner<'a> {
	source: &'a str,
	/// Byte offset of the next unread character.
	cursor: usize,
	context: ScanContext,
	pending_literal: String,
	pending_raw: String,
	queued: Option<Token>,
	previous: TokenKind,
	/// Number of newline tokens emitted back to back most recently.
	newline_run: usize,
	in_ordered_list: bool,
	in_unordered_list: bool,
	in_table: bool,
	finished: bool,
	line_break: Lookahead,
	closing_bracket: Lookahead,
	closing_paren: Lookahead,
	tag_close: Lookahead,
	comment_close: Lookahead,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		Self::with_context(source, ScanContext::Document)
	}

	pub fn with_context(source: &'a str, context: ScanContext) -> Self {
		Self {
			source,
			cursor: 0,
			context,
			pending_literal: String::new(),
			pending_raw: String::new(),
			queued: None,
			previous: TokenKind::Eof,
			newline_run: 0,
			in_ordered_list: false,
			in_unordered_list: false,
			in_table: false,
			finished: false,
			line_break: Lookahead::default(),
			closing_bracket: Lookahead::default(),
			closing_paren: Lookahead::default(),
			tag_close: Lookahead::default(),
			comment_close: Lookahead::default(),
		}
	}

	/// Produce the next token. Once the source is exhausted this keeps
	/// returning [`TokenKind::Eof`].
	pub fn next_token(&mut self) -> Token {
		if let Some(token) = self.queued.take() {
			return self.emit(token);
		}

		loop {
			if self.cursor >= self.source.len() {
				if let Some(text) = self.take_pending() {
					return self.emit(text);
				}

				return self.emit(Token::eof());
			}

			// A cell boundary wins over an escape so `|\|` still splits cells.
			if !self.cell_may_start() && self.consume_escape() {
				continue;
			}

			if let Some(token) = self.match_any() {
				if let Some(text) = self.take_pending() {
					self.queued = Some(token);
					return self.emit(text);
				}

				return self.emit(token);
			}

			if !self.consume_escape() {
				self.consume_char();
			}
		}
	}

	fn emit(&mut self, token: Token) -> Token {
		if token.kind == TokenKind::Newline {
			self.newline_run += 1;
		} else {
			self.newline_run = 0;
		}

		self.previous = token.kind;
		token
	}

	fn match_any(&mut self) -> Option<Token> {
		for matcher in Matcher::PRIORITY {
			if matcher.is_block() && self.context == ScanContext::Inline {
				continue;
			}

			let token = match matcher {
				Matcher::Header => self.match_header(),
				Matcher::OrderedList => self.match_ordered_list(),
				Matcher::UnorderedList => self.match_unordered_list(),
				Matcher::TableCell => self.match_table_cell(),
				Matcher::Newline => self.match_newline(),
				Matcher::LinkText => self.match_bracketed("[", Close::Bracket, TokenKind::LinkText),
				Matcher::ImageAlt => self.match_bracketed("![", Close::Bracket, TokenKind::ImageAlt),
				Matcher::Href => self.match_href(),
				Matcher::Strong => self.match_delimiter(2, TokenKind::Strong),
				Matcher::Emphasis => self.match_delimiter(1, TokenKind::Emphasis),
				Matcher::CodeFence => self.match_literal("```", TokenKind::CodeFence),
				Matcher::InlineCode => self.match_literal("`", TokenKind::InlineCode),
				Matcher::RawTag => self.match_raw_tag(),
				Matcher::Math => self.match_literal("$", TokenKind::Math),
			};

			if token.is_some() {
				return token;
			}
		}

		None
	}

	fn rest(&self) -> &'a str {
		&self.source[self.cursor..]
	}

	/// Byte offset of the end of the current line, before any `\r\n`.
	fn line_end(&mut self) -> usize {
		let end = self
			.line_break
			.find(self.source, self.cursor, "\n")
			.unwrap_or(self.source.len());

		if end > self.cursor && self.source[..end].ends_with('\r') {
			end - 1
		} else {
			end
		}
	}

	/// The rest of the current line, without its line terminator.
	fn rest_of_line(&mut self) -> &'a str {
		let end = self.line_end();
		&self.source[self.cursor..end]
	}

	fn previous_char(&self) -> Option<char> {
		self.source[..self.cursor].chars().next_back()
	}

	/// The kind of the token that will precede whatever matches next.
	fn previous_kind(&self) -> TokenKind {
		if self.pending_raw.is_empty() {
			self.previous
		} else {
			TokenKind::Text
		}
	}

	/// Whether a table cell could be matched here, either continuing a row or
	/// opening one.
	fn cell_may_start(&self) -> bool {
		self.context == ScanContext::Document
			&& (self.previous_kind() == TokenKind::TableCell || self.at_line_start())
	}

	fn at_line_start(&self) -> bool {
		self.pending_raw.is_empty()
			&& (self.cursor == 0 || self.source[..self.cursor].ends_with('\n'))
	}

	/// Either list mode lets the next line start an item, so ordered and
	/// unordered lists can nest inside each other.
	fn in_list(&self) -> bool {
		self.in_ordered_list || self.in_unordered_list
	}

	fn after_blank_line(&self) -> bool {
		self.cursor == 0 || (self.pending_raw.is_empty() && self.newline_run >= 2)
	}

	fn advance(&mut self, len: usize) -> &'a str {
		let matched = &self.source[self.cursor..self.cursor + len];
		self.cursor += len;
		matched
	}

	fn take_pending(&mut self) -> Option<Token> {
		if self.pending_raw.is_empty() {
			return None;
		}

		let literal = std::mem::take(&mut self.pending_literal);
		let raw = std::mem::take(&mut self.pending_raw);
		Some(Token::new(TokenKind::Text, literal, raw))
	}

	fn consume_char(&mut self) {
		if let Some(ch) = self.rest().chars().next() {
			self.pending_literal.push(ch);
			self.pending_raw.push(ch);
			self.cursor += ch.len_utf8();
		}
	}

	/// A backslash makes the following character literal text. The backslash
	/// stays in the raw span only.
	fn consume_escape(&mut self) -> bool {
		let mut chars = self.rest().chars();
		let (Some('\\'), Some(escaped)) = (chars.next(), chars.next()) else {
			return false;
		};

		self.pending_literal.push(escaped);
		self.pending_raw.push('\\');
		self.pending_raw.push(escaped);
		self.cursor += 1 + escaped.len_utf8();
		true
	}

	fn match_literal(&mut self, delimiter: &str, kind: TokenKind) -> Option<Token> {
		if !self.rest().starts_with(delimiter) {
			return None;
		}

		let raw = self.advance(delimiter.len());
		Some(Token::new(kind, raw, raw))
	}

	fn match_header(&mut self) -> Option<Token> {
		if !self.at_line_start() {
			return None;
		}

		let rest = self.rest();
		let level = rest.chars().take_while(|ch| *ch == '#').count();
		let kind = TokenKind::header(level)?;
		let after = &rest[level..];

		if !(after.is_empty() || after.starts_with([' ', '\t', '\n', '\r'])) {
			return None;
		}

		let blanks = leading_blanks(after);
		let raw = self.advance(level + blanks);
		Some(Token::new(kind, &raw[..level], raw))
	}

	fn match_ordered_list(&mut self) -> Option<Token> {
		if !(self.at_line_start() && (self.in_list() || self.after_blank_line())) {
			return None;
		}

		let line = self.rest_of_line();
		let indent = leading_blanks(line);
		let digits = line[indent..]
			.chars()
			.take_while(char::is_ascii_digit)
			.count();

		if digits == 0 || !line[indent + digits..].starts_with('.') {
			return None;
		}

		let marker_end = indent + digits + 1;
		let spacing = leading_blanks(&line[marker_end..]);

		if spacing == 0 {
			return None;
		}

		let raw = self.advance(marker_end + spacing);
		self.in_ordered_list = true;
		Some(Token::new(TokenKind::OrderedListItem, &raw[indent..marker_end], raw))
	}

	fn match_unordered_list(&mut self) -> Option<Token> {
		if !(self.at_line_start() && (self.in_list() || self.after_blank_line())) {
			return None;
		}

		let line = self.rest_of_line();
		let indent = leading_blanks(line);

		if !line[indent..].starts_with(['*', '-']) {
			return None;
		}

		let marker_end = indent + 1;
		let spacing = leading_blanks(&line[marker_end..]);

		if spacing == 0 {
			return None;
		}

		let raw = self.advance(marker_end + spacing);
		self.in_unordered_list = true;
		Some(Token::new(TokenKind::UnorderedListItem, &raw[indent..marker_end], raw))
	}

	fn match_table_cell(&mut self) -> Option<Token> {
		let continuing = self.previous_kind() == TokenKind::TableCell;

		if !continuing && !self.at_line_start() {
			return None;
		}

		let line = self.rest_of_line();

		if !continuing && !self.in_table && find_unescaped_pipe(line).is_none() {
			return None;
		}

		// A leading pipe belongs to the first cell of the row.
		let mut start = 0;
		if !continuing {
			let indent = leading_blanks(line);
			if line[indent..].starts_with('|') {
				start = indent + 1;
			}
		}

		let (content, len) = match find_unescaped_pipe(&line[start..]) {
			Some(pipe) => {
				self.in_table = true;
				(&line[start..start + pipe], start + pipe + 1)
			}
			None => {
				let content = &line[start..];
				if content.trim().is_empty() {
					return None;
				}

				// A row without a trailing pipe is the last one the table mode
				// carries on its own.
				self.in_table = false;
				(content, line.len())
			}
		};

		let literal = content.trim().to_string();
		let raw = self.advance(len);
		Some(Token::new(TokenKind::TableCell, literal, raw))
	}

	fn match_newline(&mut self) -> Option<Token> {
		let rest = self.rest();
		let len = if rest.starts_with("\r\n") {
			2
		} else if rest.starts_with('\n') {
			1
		} else {
			return None;
		};

		if self.previous_kind() == TokenKind::Newline {
			tracing::trace!(offset = self.cursor, "blank line resets list and table modes");
			self.in_ordered_list = false;
			self.in_unordered_list = false;
			self.in_table = false;
		}

		let raw = self.advance(len);
		Some(Token::new(TokenKind::Newline, "\n", raw))
	}

	/// `[text]`, `![alt]` and `(href)`: the closing character must be on the
	/// same line.
	fn match_bracketed(&mut self, open: &str, close: Close, kind: TokenKind) -> Option<Token> {
		if !self.rest().starts_with(open) {
			return None;
		}

		let from = self.cursor + open.len();
		let lookahead = match close {
			Close::Bracket => &mut self.closing_bracket,
			Close::Paren => &mut self.closing_paren,
		};
		let end = lookahead.find(self.source, from, close.as_str())?;

		if end >= self.line_end() {
			return None;
		}

		let literal = self.source[from..end].to_string();
		let raw = self.advance(end + 1 - self.cursor);
		Some(Token::new(kind, literal, raw))
	}

	fn match_href(&mut self) -> Option<Token> {
		if !matches!(
			self.previous_kind(),
			TokenKind::LinkText | TokenKind::ImageAlt
		) {
			return None;
		}

		self.match_bracketed("(", Close::Paren, TokenKind::Href)
	}

	/// `*`/`_` runs of exactly `width` characters. Underscores between two
	/// alphanumerics (`snake_case`) stay text.
	fn match_delimiter(&mut self, width: usize, kind: TokenKind) -> Option<Token> {
		let rest = self.rest();
		let delimiter = rest.chars().next().filter(|ch| matches!(ch, '*' | '_'))?;

		if rest.chars().take(width).filter(|ch| *ch == delimiter).count() != width {
			return None;
		}

		if delimiter == '_' {
			let before = self.previous_char().is_some_and(char::is_alphanumeric);
			let after = rest[width..].chars().next().is_some_and(char::is_alphanumeric);
			if before && after {
				return None;
			}
		}

		let raw = self.advance(width);
		Some(Token::new(kind, raw, raw))
	}

	/// `<tag ...>`, `</tag>` or `<!-- ... -->`. Quoted attribute values may
	/// contain `>`.
	fn match_raw_tag(&mut self) -> Option<Token> {
		let rest = self.rest();

		if !rest.starts_with('<') {
			return None;
		}

		let len = if rest.starts_with("<!--") {
			let end = self
				.comment_close
				.find(self.source, self.cursor + 4, "-->")?;
			end + 3 - self.cursor
		} else {
			let mut chars = rest.chars().skip(1);
			let first = match chars.next()? {
				'/' => chars.next()?,
				ch => ch,
			};

			if !first.is_ascii_alphabetic() {
				return None;
			}

			// Nothing can close a tag once no `>` is left in the source.
			self.tag_close.find(self.source, self.cursor, ">")?;
			tag_end(rest)?
		};

		let raw = self.advance(len);
		Some(Token::new(TokenKind::RawTag, raw, raw))
	}
}

impl Iterator for Scanner<'_> {
	type Item = Token;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();
		self.finished = token.kind == TokenKind::Eof;
		Some(token)
	}
}

/// The character closing a bracketed span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Close {
	Bracket,
	Paren,
}

impl Close {
	fn as_str(self) -> &'static str {
		match self {
			Self::Bracket => "]",
			Self::Paren => ")",
		}
	}
}

fn leading_blanks(text: &str) -> usize {
	text.len() - text.trim_start_matches([' ', '\t']).len()
}

/// Byte offset of the first `|` not preceded by a backslash.
fn find_unescaped_pipe(text: &str) -> Option<usize> {
	let mut escaped = false;

	for (index, ch) in text.char_indices() {
		match ch {
			_ if escaped => escaped = false,
			'\\' => escaped = true,
			'|' => return Some(index),
			_ => {}
		}
	}

	None
}

/// Byte length of a tag up to and including its closing `>`. An unquoted
/// `<` means the tag was never closed.
fn tag_end(text: &str) -> Option<usize> {
	let mut quote: Option<char> = None;

	for (index, ch) in text.char_indices().skip(1) {
		match (quote, ch) {
			(Some(open), _) if ch == open => quote = None,
			(Some(_), _) => {}
			(None, '"' | '\'') => quote = Some(ch),
			(None, '>') => return Some(index + 1),
			(None, '<') => return None,
			(None, _) => {}
		}
	}

	None
}
