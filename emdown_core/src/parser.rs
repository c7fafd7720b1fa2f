use std::borrow::Cow;

use crate::event::Attribute;
use crate::event::Event;
use crate::fragment::Fragment;
use crate::fragment::TagKind;
use crate::fragment::parse_fragment;
use crate::scanner::ScanContext;
use crate::scanner::Scanner;
use crate::scanner::tokenize;
use crate::tokens::Token;
use crate::tokens::TokenKind;
use crate::tokens::TokenStream;
use crate::vocabulary;
use crate::vocabulary::Vocabulary;

/// Parse markdown-flavoured source into markup events using the default
/// vocabulary.
pub fn parse(source: &str) -> Vec<Event> {
	parse_with(source, &Vocabulary::default())
}

/// Parse source into markup events, classifying raw tags with `vocabulary`.
pub fn parse_with(source: &str, vocabulary: &Vocabulary) -> Vec<Event> {
	Parser::new(tokenize(source), vocabulary).parse()
}

/// What kind of container the parser is currently filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
	/// Between blocks. Inline content opens an implicit paragraph.
	Block,
	/// Inside the implicit paragraph.
	Paragraph,
	/// Inside an explicit inline container: a header, a list item, a table
	/// cell or a raw block tag.
	Container,
}

/// A tag from the source whose end tag has not been seen yet.
#[derive(Debug, Clone)]
struct RawOpen {
	name: String,
	block: bool,
	/// Mode to return to once the tag closes.
	restore: Mode,
}

/// An emphasis or strong delimiter waiting for its closing counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Delimiter {
	kind: TokenKind,
	marker: char,
}

impl Delimiter {
	fn of(token: &Token) -> Option<Self> {
		if !matches!(token.kind, TokenKind::Emphasis | TokenKind::Strong) {
			return None;
		}

		Some(Self {
			kind: token.kind,
			marker: token.literal.chars().next()?,
		})
	}
}

/// Everything needed to undo a speculative production.
#[derive(Debug)]
struct Checkpoint {
	cursor: usize,
	output: usize,
	mode: Mode,
	/// Failing productions only push raw tags, so truncating to this depth
	/// restores the stack.
	raw_depth: usize,
	raw_floor: usize,
	paragraph_floor: usize,
}

/// Parser state saved when an explicit inline container opens.
#[derive(Debug, Clone, Copy)]
struct Enclosing {
	mode: Mode,
	raw_floor: usize,
}

/// A speculative production met a token it cannot continue with. The
/// offending token is left unconsumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unexpected {
	expected: &'static str,
	found: TokenKind,
}

type ParseResult<T = ()> = Result<T, Unexpected>;

/// Column alignment declared by a table delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
	None,
	Left,
	Right,
	Center,
}

impl Alignment {
	/// `-`, `:-`, `-:` and `:-:` with any number of dashes.
	fn parse(delimiter: &str) -> Option<Self> {
		let left = delimiter.starts_with(':');
		let right = delimiter.len() > 1 && delimiter.ends_with(':');
		let dashes = &delimiter[usize::from(left)..delimiter.len() - usize::from(right)];

		if dashes.is_empty() || !dashes.chars().all(|ch| ch == '-') {
			return None;
		}

		Some(match (left, right) {
			(false, false) => Self::None,
			(true, false) => Self::Left,
			(false, true) => Self::Right,
			(true, true) => Self::Center,
		})
	}

	fn attributes(self) -> Vec<Attribute> {
		let style = match self {
			Self::None => return vec![],
			Self::Left => "text-align: left",
			Self::Right => "text-align: right",
			Self::Center => "text-align: center",
		};

		vec![Attribute::new("style", style)]
	}
}

#[derive(Debug)]
struct ListLevel {
	indent: usize,
	name: &'static str,
}

/// Consumes a fully materialized token stream and produces markup events.
///
/// Productions that need a closing token (emphasis, links, code, fences,
/// tables) run as speculative attempts. When one cannot finish, the output is
/// rolled back to its checkpoint and the raw source of every token it consumed
/// is emitted as text instead, so parsing never fails.
pub struct Parser<'v> {
	tokens: Vec<Token>,
	cursor: usize,
	output: Vec<Event>,
	mode: Mode,
	raw_open: Vec<RawOpen>,
	/// Raw tags below this index belong to an enclosing container and cannot
	/// be closed from inside the current one.
	raw_floor: usize,
	/// Raw tags from this index on were opened inside the current paragraph.
	paragraph_floor: usize,
	/// Emphasis and strong delimiters still waiting to close, innermost last.
	delimiters: Vec<Delimiter>,
	vocabulary: &'v Vocabulary,
}

impl<'v> Parser<'v> {
	pub fn new(tokens: TokenStream, vocabulary: &'v Vocabulary) -> Self {
		let mut tokens = tokens.into_inner();

		if tokens.last().is_none_or(|token| token.kind != TokenKind::Eof) {
			tokens.push(Token::eof());
		}

		Self {
			tokens,
			cursor: 0,
			output: vec![],
			mode: Mode::Block,
			raw_open: vec![],
			raw_floor: 0,
			paragraph_floor: 0,
			delimiters: vec![],
			vocabulary,
		}
	}

	pub fn parse(mut self) -> Vec<Event> {
		while !self.at_eof() {
			self.attempt(Self::parse_block);
		}

		self.close_paragraph();
		self.close_raw_tags_from(0);
		self.output
	}

	fn peek(&self) -> &Token {
		&self.tokens[self.cursor.min(self.tokens.len() - 1)]
	}

	fn peek_kind(&self) -> TokenKind {
		self.peek().kind
	}

	fn peek_nth_kind(&self, offset: usize) -> TokenKind {
		self.tokens
			.get(self.cursor + offset)
			.map_or(TokenKind::Eof, |token| token.kind)
	}

	fn at_eof(&self) -> bool {
		self.peek_kind() == TokenKind::Eof
	}

	fn at_line_start(&self) -> bool {
		self.cursor == 0 || self.tokens[self.cursor - 1].kind == TokenKind::Newline
	}

	/// Consume the current token. The cursor never moves past the final
	/// [`TokenKind::Eof`].
	fn bump(&mut self) -> Token {
		let token = self.peek().clone();

		if token.kind != TokenKind::Eof {
			self.cursor += 1;
		}

		token
	}

	fn expect(&mut self, kind: TokenKind, expected: &'static str) -> ParseResult<Token> {
		if self.peek_kind() == kind {
			Ok(self.bump())
		} else {
			Err(Unexpected {
				expected,
				found: self.peek_kind(),
			})
		}
	}

	fn emit(&mut self, event: Event) {
		self.output.push(event);
	}

	fn emit_text(&mut self, content: impl Into<String>) {
		let content = content.into();

		if content.is_empty() {
			return;
		}

		self.open_paragraph();
		self.emit(Event::Text(content));
	}

	fn open_paragraph(&mut self) {
		if self.mode == Mode::Block {
			self.emit(Event::start(vocabulary::P));
			self.mode = Mode::Paragraph;
			self.paragraph_floor = self.raw_open.len();
		}
	}

	/// End the implicit paragraph along with the raw tags opened inside it.
	fn close_paragraph(&mut self) {
		if self.mode == Mode::Paragraph {
			self.close_raw_tags_from(self.paragraph_floor.max(self.raw_floor));
			self.emit(Event::end(vocabulary::P));
			self.mode = Mode::Block;
		}
	}

	fn checkpoint(&self) -> Checkpoint {
		Checkpoint {
			cursor: self.cursor,
			output: self.output.len(),
			mode: self.mode,
			raw_depth: self.raw_open.len(),
			raw_floor: self.raw_floor,
			paragraph_floor: self.paragraph_floor,
		}
	}

	/// Undo everything since `checkpoint` and replace it with the source of
	/// the consumed tokens. Escaped characters keep only their literal form.
	fn rollback(&mut self, checkpoint: Checkpoint, unexpected: Unexpected) {
		if self.cursor == checkpoint.cursor {
			self.bump();
		}

		tracing::debug!(
			from = checkpoint.cursor,
			to = self.cursor,
			expected = unexpected.expected,
			found = %unexpected.found,
			"rolled back to text"
		);

		let literal: String = self.tokens[checkpoint.cursor..self.cursor]
			.iter()
			.map(|token| {
				match token.kind {
					TokenKind::Text => Cow::Borrowed(token.literal.as_str()),
					TokenKind::TableCell => Cow::Owned(unescape(&token.raw)),
					_ => Cow::Borrowed(token.raw.as_str()),
				}
			})
			.collect();

		self.output.truncate(checkpoint.output);
		self.mode = checkpoint.mode;
		self.raw_open.truncate(checkpoint.raw_depth);
		self.raw_floor = checkpoint.raw_floor;
		self.paragraph_floor = checkpoint.paragraph_floor;
		self.emit_text(literal);
	}

	fn enter_container(&mut self) -> Enclosing {
		let enclosing = Enclosing {
			mode: self.mode,
			raw_floor: self.raw_floor,
		};

		self.mode = Mode::Container;
		self.raw_floor = self.raw_open.len();
		enclosing
	}

	fn leave_container(&mut self, enclosing: Enclosing) {
		self.close_raw_tags();
		self.mode = enclosing.mode;
		self.raw_floor = enclosing.raw_floor;
	}

	/// Emit end tags for every raw tag the current container opened.
	fn close_raw_tags(&mut self) {
		self.close_raw_tags_from(self.raw_floor);
	}

	fn close_raw_tags_from(&mut self, floor: usize) {
		if floor >= self.raw_open.len() {
			return;
		}

		let unclosed = self.raw_open.split_off(floor);
		for open in unclosed.into_iter().rev() {
			self.emit(Event::end(open.name));
		}
	}

	/// Run a production, rolling back to text when it fails.
	fn attempt(&mut self, production: fn(&mut Self) -> ParseResult) {
		let checkpoint = self.checkpoint();

		if let Err(unexpected) = production(self) {
			self.rollback(checkpoint, unexpected);
		}
	}

	fn parse_block(&mut self) -> ParseResult {
		let kind = self.peek_kind();

		if let Some(level) = kind.header_level() {
			self.close_paragraph();
			self.parse_header(level);
			return Ok(());
		}

		match kind {
			TokenKind::CodeFence if self.at_line_start() => self.parse_code_fence(),
			TokenKind::OrderedListItem | TokenKind::UnorderedListItem => {
				self.close_paragraph();
				self.parse_list();
				Ok(())
			}
			TokenKind::TableCell => self.parse_table(vec![]),
			TokenKind::Newline => {
				self.parse_newline();
				Ok(())
			}
			TokenKind::RawTag => {
				let Some((attributes, skip)) = self.table_directive() else {
					return self.parse_inline();
				};

				tracing::trace!(?attributes, "table directive");
				self.cursor += skip;
				self.parse_table(attributes)
			}
			_ => self.parse_inline(),
		}
	}

	/// A `<!--table ...-->` comment directly above a table row, with the
	/// number of tokens to skip to reach that row.
	fn table_directive(&self) -> Option<(Vec<Attribute>, usize)> {
		let attributes = parse_fragment(&self.peek().literal)
			.ok()?
			.table_directive()?;

		match (self.peek_nth_kind(1), self.peek_nth_kind(2)) {
			(TokenKind::TableCell, _) => Some((attributes, 1)),
			(TokenKind::Newline, TokenKind::TableCell) => Some((attributes, 2)),
			_ => None,
		}
	}

	/// A newline between blocks. Two in a row end the paragraph; a single
	/// one inside a paragraph is kept as text unless a block starts next.
	fn parse_newline(&mut self) {
		self.bump();

		match self.mode {
			Mode::Block => {}
			Mode::Container => self.emit(Event::text("\n")),
			Mode::Paragraph => {
				if self.peek_kind() == TokenKind::Newline {
					self.bump();
					self.close_paragraph();
				} else if self.at_block_boundary() {
					self.close_paragraph();
				} else {
					self.emit(Event::text("\n"));
				}
			}
		}
	}

	fn at_block_boundary(&self) -> bool {
		let token = self.peek();

		match token.kind {
			TokenKind::Eof => true,
			TokenKind::RawTag => {
				match parse_fragment(&token.literal) {
					Ok(Fragment::Tag(tag)) => self.vocabulary.is_block(&tag.name),
					Ok(fragment @ Fragment::Comment(_)) => fragment.table_directive().is_some(),
					Err(_) => false,
				}
			}
			kind => kind.is_block_opening(),
		}
	}

	fn parse_header(&mut self, level: usize) {
		self.bump();
		let name = vocabulary::HEADINGS[level - 1];

		self.emit(Event::start(name));
		let enclosing = self.enter_container();

		while !matches!(self.peek_kind(), TokenKind::Newline | TokenKind::Eof) {
			self.attempt(Self::parse_inline);
		}

		self.leave_container(enclosing);
		self.emit(Event::end(name));
		self.mode = Mode::Block;
	}

	/// ```` ```lang ```` then everything up to the closing fence, verbatim.
	fn parse_code_fence(&mut self) -> ParseResult {
		self.bump();

		let mut info = String::new();
		while !matches!(self.peek_kind(), TokenKind::Newline | TokenKind::Eof) {
			info.push_str(&self.bump().raw);
		}

		self.expect(TokenKind::Newline, "a newline after the code fence")?;

		let mut body = String::new();
		loop {
			match self.peek_kind() {
				TokenKind::CodeFence => {
					self.bump();
					break;
				}
				TokenKind::Eof => {
					return Err(Unexpected {
						expected: "a closing code fence",
						found: TokenKind::Eof,
					});
				}
				_ => body.push_str(&self.bump().raw),
			}
		}

		let info = info.trim();
		let attributes = if info.is_empty() {
			vec![]
		} else {
			vec![Attribute::new("class", info)]
		};

		self.close_paragraph();
		self.emit(Event::start(vocabulary::PRE));
		self.emit(Event::start_with(vocabulary::CODE, attributes));
		self.emit(Event::text(format!(
			"\n{}\n",
			body.trim_matches(|ch| ch == '\n' || ch == '\r')
		)));
		self.emit(Event::end(vocabulary::CODE));
		self.emit(Event::end(vocabulary::PRE));
		self.mode = Mode::Block;

		Ok(())
	}

	fn parse_list(&mut self) {
		let first = self.bump();
		let mut levels = vec![];

		self.open_list_level(&mut levels, &first);
		let enclosing = self.enter_container();

		loop {
			match self.peek_kind() {
				TokenKind::Eof => break,
				TokenKind::Newline => {
					self.bump();
					let next = self.peek_kind();

					if next.is_list_item() {
						let item = self.bump();
						self.list_item(&mut levels, &item);
					} else if matches!(next, TokenKind::Newline | TokenKind::Eof)
						|| next.is_block_opening()
					{
						break;
					} else {
						self.emit(Event::text("\n"));
					}
				}
				kind if kind.is_list_item() => {
					let item = self.bump();
					self.list_item(&mut levels, &item);
				}
				_ => self.attempt(Self::parse_inline),
			}
		}

		self.leave_container(enclosing);
		while let Some(level) = levels.pop() {
			self.emit(Event::end(vocabulary::LI));
			self.emit(Event::end(level.name));
		}

		self.mode = Mode::Block;
	}

	fn open_list_level(&mut self, levels: &mut Vec<ListLevel>, item: &Token) {
		let name = if item.kind == TokenKind::OrderedListItem {
			vocabulary::OL
		} else {
			vocabulary::UL
		};

		self.emit(Event::start(name));
		self.emit(Event::start(vocabulary::LI));
		levels.push(ListLevel {
			indent: item.indent(),
			name,
		});
	}

	/// Deeper items open a nested list inside the current item, shallower
	/// ones close levels until the indentation fits.
	fn list_item(&mut self, levels: &mut Vec<ListLevel>, item: &Token) {
		let indent = item.indent();
		self.close_raw_tags();

		if levels.last().is_none_or(|level| indent > level.indent) {
			tracing::trace!(indent, depth = levels.len(), "nested list");
			self.open_list_level(levels, item);
			return;
		}

		while levels.len() > 1 && levels.last().is_some_and(|level| indent < level.indent) {
			if let Some(level) = levels.pop() {
				self.emit(Event::end(vocabulary::LI));
				self.emit(Event::end(level.name));
			}
		}

		self.emit(Event::end(vocabulary::LI));
		self.emit(Event::start(vocabulary::LI));
	}

	/// Every row is read before anything is emitted, so a table that fails
	/// leaves the surrounding paragraph untouched.
	fn parse_table(&mut self, attributes: Vec<Attribute>) -> ParseResult {
		let header = self.table_row()?;
		self.expect(TokenKind::Newline, "the table delimiter row")?;

		let alignments = self
			.table_row()?
			.iter()
			.map(|cell| {
				Alignment::parse(&cell.literal).ok_or(Unexpected {
					expected: "a delimiter cell such as `:-`",
					found: TokenKind::TableCell,
				})
			})
			.collect::<ParseResult<Vec<_>>>()?;

		let mut rows = vec![];
		while self.peek_kind() == TokenKind::Newline
			&& self.peek_nth_kind(1) == TokenKind::TableCell
		{
			self.bump();
			rows.push(self.table_row()?);
		}

		self.close_paragraph();
		self.emit(Event::start_with(vocabulary::TABLE, attributes));
		self.emit(Event::start(vocabulary::TR));
		for cell in &header {
			self.table_cell(vocabulary::TH, cell, Alignment::None);
		}
		self.emit(Event::end(vocabulary::TR));

		for row in rows {
			self.emit(Event::start(vocabulary::TR));
			for (column, cell) in row.iter().enumerate() {
				// Rows wider than the delimiter row reuse its alignments from
				// the first column on.
				let alignment = alignments[column % alignments.len()];
				self.table_cell(vocabulary::TD, cell, alignment);
			}
			self.emit(Event::end(vocabulary::TR));
		}

		self.emit(Event::end(vocabulary::TABLE));
		self.mode = Mode::Block;

		Ok(())
	}

	/// The cells of one row, up to but excluding the line break.
	fn table_row(&mut self) -> ParseResult<Vec<Token>> {
		let mut cells = vec![self.expect(TokenKind::TableCell, "a table cell")?];

		loop {
			let token = self.peek();

			match token.kind {
				TokenKind::TableCell => cells.push(self.bump()),
				TokenKind::Newline | TokenKind::Eof => return Ok(cells),
				_ if token.is_blank_text() => {
					self.bump();
				}
				found => {
					return Err(Unexpected {
						expected: "a table cell",
						found,
					});
				}
			}
		}
	}

	fn table_cell(&mut self, name: &'static str, cell: &Token, alignment: Alignment) {
		self.emit(Event::start_with(name, alignment.attributes()));
		let content = self.parse_cell_content(&cell.literal);
		self.output.extend(content);
		self.emit(Event::end(name));
	}

	/// Re-scan a cell's content and parse it as inline markup. The child
	/// parser starts inside a container so no paragraph is opened.
	fn parse_cell_content(&self, content: &str) -> Vec<Event> {
		let tokens = Scanner::with_context(content, ScanContext::Inline).collect();
		let mut parser = Parser::new(tokens, self.vocabulary);
		parser.mode = Mode::Container;

		while !parser.at_eof() {
			parser.attempt(Self::parse_inline);
		}

		parser.close_raw_tags();
		parser.output
	}

	/// One inline production. Always consumes at least one token.
	fn parse_inline(&mut self) -> ParseResult {
		match self.peek_kind() {
			TokenKind::Emphasis => self.parse_delimited(vocabulary::EM),
			TokenKind::Strong => self.parse_delimited(vocabulary::STRONG),
			TokenKind::LinkText => self.parse_link(),
			TokenKind::ImageAlt => self.parse_image(),
			TokenKind::InlineCode => self.parse_verbatim(vocabulary::CODE),
			TokenKind::Math => self.parse_verbatim(vocabulary::MATH),
			TokenKind::RawTag => {
				self.parse_raw_tag();
				Ok(())
			}
			TokenKind::Text => {
				let text = self.bump();
				self.emit_text(text.literal);
				Ok(())
			}
			_ => {
				let token = self.bump();
				self.emit_text(token.raw);
				Ok(())
			}
		}
	}

	/// Emphasis and strong: inline content up to the same delimiter on the
	/// same line. A delimiter that closes an enclosing span ends this one
	/// unsuccessfully, so spans never nest more than one level per delimiter
	/// kind.
	fn parse_delimited(&mut self, name: &'static str) -> ParseResult {
		let opening = self.bump();
		let Some(delimiter) = Delimiter::of(&opening) else {
			self.emit_text(opening.raw);
			return Ok(());
		};

		self.delimiters.push(delimiter);
		let result = self.parse_delimited_content(name, delimiter);
		self.delimiters.pop();

		result
	}

	fn parse_delimited_content(&mut self, name: &'static str, delimiter: Delimiter) -> ParseResult {
		self.open_paragraph();
		self.emit(Event::start(name));
		let enclosing = self.enter_container();

		loop {
			let token = self.peek();
			let found = token.kind;

			match Delimiter::of(token) {
				Some(closing) if closing == delimiter => {
					self.bump();
					break;
				}
				Some(outer) if self.delimiters.contains(&outer) => {
					return Err(Unexpected {
						expected: "a closing delimiter",
						found,
					});
				}
				_ => {}
			}

			match found {
				TokenKind::Newline | TokenKind::Eof => {
					return Err(Unexpected {
						expected: "a closing delimiter",
						found,
					});
				}
				_ => self.attempt(Self::parse_inline),
			}
		}

		self.leave_container(enclosing);
		self.emit(Event::end(name));
		Ok(())
	}

	fn parse_link(&mut self) -> ParseResult {
		let text = self.bump();
		let href = self.expect(TokenKind::Href, "a link href")?;

		self.open_paragraph();
		self.emit(Event::start_with(vocabulary::A, vec![Attribute::new(
			"href",
			href.literal,
		)]));
		self.emit(Event::text(text.literal));
		self.emit(Event::end(vocabulary::A));

		Ok(())
	}

	fn parse_image(&mut self) -> ParseResult {
		let alt = self.bump();
		let src = self.expect(TokenKind::Href, "an image source")?;

		self.open_paragraph();
		self.emit(Event::self_closing(vocabulary::IMG, vec![
			Attribute::new("alt", alt.literal),
			Attribute::new("src", src.literal),
		]));

		Ok(())
	}

	/// Inline code and math: the raw source up to the matching delimiter on
	/// the same line, without any further interpretation.
	fn parse_verbatim(&mut self, name: &'static str) -> ParseResult {
		let opening = self.bump();
		let mut content = String::new();

		loop {
			match self.peek_kind() {
				kind if kind == opening.kind => {
					self.bump();
					break;
				}
				found @ (TokenKind::Newline | TokenKind::Eof) => {
					return Err(Unexpected {
						expected: "a closing delimiter",
						found,
					});
				}
				_ => content.push_str(&self.bump().raw),
			}
		}

		self.open_paragraph();
		self.emit(Event::start(name));
		self.emit(Event::text(content));
		self.emit(Event::end(name));

		Ok(())
	}

	/// Embedded markup. Block tags end an open paragraph and hold inline
	/// content until they close; other tags sit inside a paragraph. An end tag
	/// with no open counterpart stays text so the output remains well nested.
	fn parse_raw_tag(&mut self) {
		let token = self.bump();

		let tag = match parse_fragment(&token.literal) {
			Ok(Fragment::Tag(tag)) => tag,
			Ok(Fragment::Comment(body)) => {
				self.emit(Event::Comment(body));
				return;
			}
			Err(error) => {
				tracing::debug!(%error, "raw tag kept as text");
				self.emit_text(token.raw);
				return;
			}
		};

		let block = self.vocabulary.is_block(&tag.name);
		let void = vocabulary::is_void(&tag.name);

		match tag.kind {
			TagKind::Start if block && !void => {
				self.close_paragraph();
				self.raw_open.push(RawOpen {
					name: tag.name.clone(),
					block,
					restore: self.mode,
				});
				self.emit(tag.into_event());
				self.mode = Mode::Container;
			}
			TagKind::Start if !void => {
				self.open_paragraph();
				self.raw_open.push(RawOpen {
					name: tag.name.clone(),
					block,
					restore: self.mode,
				});
				self.emit(tag.into_event());
			}
			TagKind::Start | TagKind::SelfClosing => {
				if block {
					self.close_paragraph();
				} else {
					self.open_paragraph();
				}
				self.emit(tag.into_event());
			}
			TagKind::End => {
				if self.open_position(&tag.name).is_none() {
					self.emit_text(token.raw);
					return;
				}

				if block {
					self.close_paragraph();
				} else {
					self.open_paragraph();
				}

				// Closing the paragraph may already have closed the tag.
				let Some(position) = self.open_position(&tag.name) else {
					return;
				};

				let unclosed = self.raw_open.split_off(position);
				let restore = unclosed
					.iter()
					.find(|open| open.block)
					.map(|open| open.restore);

				for open in unclosed.into_iter().skip(1).rev() {
					self.emit(Event::end(open.name));
				}

				self.emit(tag.into_event());
				if let Some(mode) = restore {
					self.mode = mode;
				}
			}
		}
	}

	/// Index of the innermost open raw tag named `name` that the current
	/// container may close.
	fn open_position(&self, name: &str) -> Option<usize> {
		self.raw_open[self.raw_floor..]
			.iter()
			.rposition(|open| open.name == name)
			.map(|position| position + self.raw_floor)
	}
}

/// Drop escape backslashes and keep the characters they escape.
fn unescape(raw: &str) -> String {
	let mut output = String::with_capacity(raw.len());
	let mut chars = raw.chars();

	while let Some(ch) = chars.next() {
		match (ch, chars.clone().next()) {
			('\\', Some(escaped)) => {
				output.push(escaped);
				chars.next();
			}
			_ => output.push(ch),
		}
	}

	output
}
