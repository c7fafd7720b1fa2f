use rstest::rstest;
use similar_asserts::assert_eq;
use tracing_test::traced_test;

use super::*;
use crate::fragment::Fragment;
use crate::fragment::Tag;
use crate::fragment::TagKind;
use crate::fragment::parse_fragment;

/// Every end tag must close a start tag of the same name that is still open,
/// and nothing but void elements may be left open at the end.
fn assert_well_nested(events: &[Event]) {
	let mut open: Vec<&str> = vec![];

	for event in events {
		match event {
			Event::Start { name, .. } if !vocabulary::is_void(name) => open.push(name),
			Event::End { name } => {
				let position = open.iter().rposition(|candidate| candidate == name);
				assert!(position.is_some(), "unmatched `</{name}>` in {events:?}");
				if let Some(position) = position {
					open.remove(position);
				}
			}
			_ => {}
		}
	}

	assert!(open.is_empty(), "unclosed {open:?} in {events:?}");
}

#[rstest]
#[case::header("# Some header", vec![TokenKind::H1, TokenKind::Text, TokenKind::Eof])]
#[case::header_six("###### Six", vec![TokenKind::H6, TokenKind::Text, TokenKind::Eof])]
#[case::hash_without_space("#hashtag", vec![TokenKind::Text, TokenKind::Eof])]
#[case::link("[a link](www.example.com)", vec![TokenKind::LinkText, TokenKind::Href, TokenKind::Eof])]
#[case::image("![alt](src)", vec![TokenKind::ImageAlt, TokenKind::Href, TokenKind::Eof])]
#[case::parenthesis_without_link("text (paren)", vec![TokenKind::Text, TokenKind::Eof])]
#[case::code_fence("```js\ncode line\n```", vec![
	TokenKind::CodeFence,
	TokenKind::Text,
	TokenKind::Newline,
	TokenKind::Text,
	TokenKind::Newline,
	TokenKind::CodeFence,
	TokenKind::Eof,
])]
#[case::unordered_list("* foo\n* bar\n", vec![
	TokenKind::UnorderedListItem,
	TokenKind::Text,
	TokenKind::Newline,
	TokenKind::UnorderedListItem,
	TokenKind::Text,
	TokenKind::Newline,
	TokenKind::Eof,
])]
#[case::ordered_list("1. one\n2. two", vec![
	TokenKind::OrderedListItem,
	TokenKind::Text,
	TokenKind::Newline,
	TokenKind::OrderedListItem,
	TokenKind::Text,
	TokenKind::Eof,
])]
#[case::dash_inside_line("a - b", vec![TokenKind::Text, TokenKind::Eof])]
#[case::table("Col1 | Col2\n:- | -:\nA | B", vec![
	TokenKind::TableCell,
	TokenKind::TableCell,
	TokenKind::Newline,
	TokenKind::TableCell,
	TokenKind::TableCell,
	TokenKind::Newline,
	TokenKind::TableCell,
	TokenKind::TableCell,
	TokenKind::Eof,
])]
#[case::unterminated_code("`abc", vec![TokenKind::InlineCode, TokenKind::Text, TokenKind::Eof])]
#[case::strong_and_emphasis("**bold** *em*", vec![
	TokenKind::Strong,
	TokenKind::Text,
	TokenKind::Strong,
	TokenKind::Text,
	TokenKind::Emphasis,
	TokenKind::Text,
	TokenKind::Emphasis,
	TokenKind::Eof,
])]
#[case::intraword_underscore("snake_case_name", vec![TokenKind::Text, TokenKind::Eof])]
#[case::escaped_delimiters(r"\*not em\*", vec![TokenKind::Text, TokenKind::Eof])]
#[case::math("$x$", vec![TokenKind::Math, TokenKind::Text, TokenKind::Math, TokenKind::Eof])]
#[case::raw_tags(r#"<span class="a>b">hi</span>"#, vec![
	TokenKind::RawTag,
	TokenKind::Text,
	TokenKind::RawTag,
	TokenKind::Eof,
])]
#[case::less_than("a < b", vec![TokenKind::Text, TokenKind::Eof])]
#[case::greater_than("hello> world", vec![TokenKind::Text, TokenKind::Eof])]
#[case::tag_after_word("hi<b>", vec![TokenKind::Text, TokenKind::RawTag, TokenKind::Eof])]
#[case::escaped_pipe_opens_cell(r"a |\| b|", vec![TokenKind::TableCell, TokenKind::TableCell, TokenKind::Eof])]
#[case::empty("", vec![TokenKind::Eof])]
fn scans_kinds(#[case] source: &str, #[case] expected: Vec<TokenKind>) {
	assert_eq!(tokenize(source).kinds(), expected);
}

#[rstest]
#[case::header("# Some header", 0, "#", "# ")]
#[case::link_text("[a link](www.example.com)", 0, "a link", "[a link]")]
#[case::href("[a link](www.example.com)", 1, "www.example.com", "(www.example.com)")]
#[case::escape(r"\*not em\*", 0, "*not em*", r"\*not em\*")]
#[case::trimmed_cell("| Col1 | Col2 |", 0, "Col1", "| Col1 |")]
#[case::ordered_marker("  12. twelve", 0, "12.", "  12. ")]
fn scans_literal_and_raw(
	#[case] source: &str,
	#[case] index: usize,
	#[case] literal: &str,
	#[case] raw: &str,
) {
	let tokens = tokenize(source);
	assert_eq!(tokens[index].literal, literal);
	assert_eq!(tokens[index].raw, raw);
}

#[rstest]
#[case::plain("plain words")]
#[case::crlf("# Title\r\n\r\ntext\r\n")]
#[case::escapes(r"\\ \* \| trailing \")]
#[case::unicode("é | ü\n:-: | -\n日本 | *語*")]
#[case::everything(
	"# h\n\n* a\n  1. b\n\n```rs\nlet x = 1;\n```\n<div class='x'>[l](u) ![i](s) `c` $m$</div>\n<!-- c -->"
)]
#[case::unterminated("**a *b [c](d `e $f <g")]
fn raw_spans_reproduce_the_source(#[case] source: &str) {
	assert_eq!(tokenize(source).raw_source(), source);
}

#[test]
fn token_stream_display_lists_tokens() {
	assert_eq!(
		tokenize("# Hi").to_string(),
		"H1 \"#\" \"# \"\nTEXT \"Hi\" \"Hi\"\n"
	);
}

#[test]
fn inline_context_never_produces_block_tokens() {
	let tokens: TokenStream = Scanner::with_context("# a | * b", ScanContext::Inline).collect();
	assert_eq!(tokens.kinds(), vec![
		TokenKind::Text,
		TokenKind::Emphasis,
		TokenKind::Text,
		TokenKind::Eof,
	]);
}

#[test]
fn scanner_keeps_returning_eof() {
	let mut scanner = Scanner::new("x");
	assert_eq!(scanner.next_token().kind, TokenKind::Text);
	assert_eq!(scanner.next_token().kind, TokenKind::Eof);
	assert_eq!(scanner.next_token().kind, TokenKind::Eof);
}

#[rstest]
#[case::header("# Some header", "<h1>Some header</h1>")]
#[case::header_six("###### Six", "<h6>Six</h6>")]
#[case::header_with_emphasis("# *Hi*", "<h1><em>Hi</em></h1>")]
#[case::header_with_link(
	"# [A link in a header](www.example.com)",
	r#"<h1><a href="www.example.com">A link in a header</a></h1>"#
)]
#[case::link(
	"[a link](www.example.com)",
	r#"<p><a href="www.example.com">a link</a></p>"#
)]
#[case::image(
	"![An img](www.example.com)",
	r#"<p><img alt="An img" src="www.example.com"/></p>"#
)]
#[case::emphasis("*em*", "<p><em>em</em></p>")]
#[case::underscore_emphasis("_em_", "<p><em>em</em></p>")]
#[case::strong("**strong**", "<p><strong>strong</strong></p>")]
#[case::strong_with_emphasis(
	"**bold *and* bold**",
	"<p><strong>bold <em>and</em> bold</strong></p>"
)]
#[case::inline_code("`some code`", "<p><code>some code</code></p>")]
#[case::inline_code_is_verbatim("`*a*`", "<p><code>*a*</code></p>")]
#[case::math("$x^2$", "<p><math>x^2</math></p>")]
#[case::code_fence(
	"```js\ncode line\n```",
	"<pre><code class=\"js\">\ncode line\n</code></pre>"
)]
#[case::code_fence_without_info("```\nx\n```", "<pre><code>\nx\n</code></pre>")]
#[case::code_fence_crlf("```\r\nx\r\n```", "<pre><code>\nx\n</code></pre>")]
#[case::paragraph_lines(
	"A paragraph of text\npossibly on multiple\nlines.",
	"<p>A paragraph of text\npossibly on multiple\nlines.</p>"
)]
#[case::paragraphs("one\n\ntwo", "<p>one</p>\n<p>two</p>")]
#[case::list("* foo\n* bar\n", "<ul>\n  <li>foo</li>\n  <li>bar</li>\n</ul>")]
#[case::ordered_list("1. one\n2. two", "<ol>\n  <li>one</li>\n  <li>two</li>\n</ol>")]
#[case::list_then_paragraph("* a\n\ntext", "<ul>\n  <li>a</li>\n</ul>\n<p>text</p>")]
#[case::escapes(r"\*literal\*", "<p>*literal*</p>")]
#[case::text_is_encoded("a < b & c", "<p>a &lt; b &amp; c</p>")]
#[case::attribute_is_encoded(r#"[x](a"b)"#, r#"<p><a href="a&quot;b">x</a></p>"#)]
#[case::raw_markup(
	r#"<p><a href="www.example.com" rel="nofollow">Some HTML</a></p>"#,
	r#"<p><a href="www.example.com" rel="nofollow">Some HTML</a></p>"#
)]
#[case::raw_inline_tag("<em>hi</em>", "<p><em>hi</em></p>")]
#[case::comment("<!-- note -->", "<!-- note -->")]
#[case::empty("", "")]
#[case::blank_lines("\n\n\n", "")]
fn renders(#[case] source: &str, #[case] expected: &str) {
	assert_eq!(render(source), expected);
}

#[rstest]
#[case::unterminated_code("`abc", "<p>`abc</p>")]
#[case::unterminated_emphasis("*abc", "<p>*abc</p>")]
#[case::strong_across_lines("**a\nb**", "<p>**a\nb**</p>")]
#[case::link_without_href("[text] no href", "<p>[text] no href</p>")]
#[case::unterminated_fence("```js\ncode", "<p>```js\ncode</p>")]
#[case::table_without_delimiter_row("a | b\nc", "<p>a | b\nc</p>")]
#[case::unmatched_block_end_tag("</div> text", "<p>&lt;/div&gt; text</p>")]
#[case::unmatched_inline_end_tag("a </span>", "<p>a &lt;/span&gt;</p>")]
#[case::hash_without_space("#NoSpace", "<p>#NoSpace</p>")]
#[case::escape_inside_unterminated_emphasis(r"*a \_ b", "<p>*a _ b</p>")]
#[case::escape_inside_failed_table(r"a \* | b", "<p>a * | b</p>")]
fn degrades_to_text(#[case] source: &str, #[case] expected: &str) {
	assert_eq!(render(source), expected);
}

#[test]
fn renders_mixed_document() {
	let source = "# A more complicated\nExample with elements [mixed](www.example.com)\nin \
	              **together**.\n\nAnd multiple paragraphs.";

	assert_eq!(
		render(source),
		"<h1>A more complicated</h1>\n<p>Example with elements <a \
		 href=\"www.example.com\">mixed</a>\nin <strong>together</strong>.</p>\n<p>And multiple \
		 paragraphs.</p>"
	);
}

#[test]
fn parses_link_events() {
	assert_eq!(parse("[a link](www.example.com)"), vec![
		Event::start("p"),
		Event::start_with("a", vec![Attribute::new("href", "www.example.com")]),
		Event::text("a link"),
		Event::end("a"),
		Event::end("p"),
	]);
}

#[test]
fn parses_code_fence_events() {
	assert_eq!(parse("```js\ncode line\n```"), vec![
		Event::start("pre"),
		Event::start_with("code", vec![Attribute::new("class", "js")]),
		Event::text("\ncode line\n"),
		Event::end("code"),
		Event::end("pre"),
	]);
}

#[test]
fn parses_hand_built_tokens() {
	let tokens = TokenStream::from(vec![
		Token::new(TokenKind::Emphasis, "*", "*"),
		Token::new(TokenKind::Text, "a", "a"),
	]);
	let vocabulary = Vocabulary::default();

	assert_eq!(Parser::new(tokens, &vocabulary).parse(), vec![
		Event::start("p"),
		Event::text("*a"),
		Event::end("p"),
	]);
}

#[test]
fn renders_nested_lists() {
	insta::assert_snapshot!(render("* a\n  * b\n* c"), @r"
	<ul>
	  <li>a
	    <ul>
	      <li>b</li>
	    </ul>
	  </li>
	  <li>c</li>
	</ul>
	");
}

#[test]
fn renders_ordered_list_inside_unordered_list() {
	assert_eq!(
		render("1. a\n   * b"),
		"<ol>\n  <li>a\n    <ul>\n      <li>b</li>\n    </ul>\n  </li>\n</ol>"
	);
}

#[test]
fn other_marker_kind_at_same_indent_continues_the_list() {
	assert_eq!(render("1. a\n* b"), "<ol>\n  <li>a</li>\n  <li>b</li>\n</ol>");
}

#[test]
fn renders_aligned_table() {
	insta::assert_snapshot!(render("Col1 | Col2\n:- | -:\nA | B"), @r#"
	<table>
	  <tr>
	    <th>Col1</th>
	    <th>Col2</th>
	  </tr>
	  <tr>
	    <td style="text-align: left">A</td>
	    <td style="text-align: right">B</td>
	  </tr>
	</table>
	"#);
}

#[test]
fn parses_table_cell_content_as_inline_markup() {
	assert_eq!(
		render("**a** | b\n- | -\n`x` | [l](u)"),
		"<table>\n  <tr>\n    <th><strong>a</strong></th>\n    <th>b</th>\n  </tr>\n  <tr>\n    \
		 <td><code>x</code></td>\n    <td><a href=\"u\">l</a></td>\n  </tr>\n</table>"
	);
}

#[test]
fn table_rows_wider_than_the_delimiter_row_cycle_alignments() {
	assert_eq!(
		render("a | b\n- | :-:\n1 | 2 | 3"),
		"<table>\n  <tr>\n    <th>a</th>\n    <th>b</th>\n  </tr>\n  <tr>\n    <td>1</td>\n    <td \
		 style=\"text-align: center\">2</td>\n    <td>3</td>\n  </tr>\n</table>"
	);
}

#[test]
fn table_directive_adds_table_attributes() {
	let source = "<!--table class=\"data\"-->\n| a | b |\n| - | - |\n| 1 | 2 |";

	assert_eq!(
		render(source),
		"<table class=\"data\">\n  <tr>\n    <th>a</th>\n    <th>b</th>\n  </tr>\n  <tr>\n    \
		 <td>1</td>\n    <td>2</td>\n  </tr>\n</table>"
	);
}

#[test]
fn table_ends_at_blank_line() {
	assert_eq!(
		render("a | b\n- | -\n1 | 2\n\ntext"),
		"<table>\n  <tr>\n    <th>a</th>\n    <th>b</th>\n  </tr>\n  <tr>\n    <td>1</td>\n    \
		 <td>2</td>\n  </tr>\n</table>\n<p>text</p>"
	);
}

#[test]
fn paragraph_closes_before_table() {
	assert!(render("intro\na | b\n- | -").starts_with("<p>intro</p>\n<table>"));
}

#[test]
fn raw_block_tags_close_inside_their_container() {
	let events = parse("*a <div>b*");

	assert_eq!(events, vec![
		Event::start("p"),
		Event::start("em"),
		Event::text("a "),
		Event::start("div"),
		Event::text("b"),
		Event::end("div"),
		Event::end("em"),
		Event::end("p"),
	]);
}

#[test]
fn raw_block_end_tag_closes_inner_raw_tags() {
	assert_eq!(parse("<div><section>x</div>"), vec![
		Event::start("div"),
		Event::start("section"),
		Event::text("x"),
		Event::end("section"),
		Event::end("div"),
	]);
}

#[test]
fn void_raw_tags_are_never_closed() {
	assert_eq!(render("a<br>b"), "<p>a<br>b</p>");
}

#[test]
fn custom_vocabulary_changes_paragraph_wrapping() {
	let default = Renderer::default();
	let custom = Renderer::default().with_vocabulary(Vocabulary::default().with_block("widget"));

	assert_eq!(default.render("<widget>hi</widget>"), "<p><widget>hi</widget></p>");
	assert_eq!(custom.render("<widget>hi</widget>"), "<widget>hi</widget>");
}

#[rstest]
#[case::spaces(PrintOptions { indent: 4, tabs: false }, "<ul>\n    <li>a</li>\n</ul>")]
#[case::tabs(PrintOptions { indent: 2, tabs: true }, "<ul>\n\t<li>a</li>\n</ul>")]
#[case::flat(PrintOptions { indent: 0, tabs: false }, "<ul>\n<li>a</li>\n</ul>")]
fn print_options_set_the_indent_unit(#[case] options: PrintOptions, #[case] expected: &str) {
	let renderer = Renderer::default().with_options(options);
	assert_eq!(renderer.render("* a"), expected);
}

#[test]
fn printer_drops_line_breaks_after_blocks() {
	let events = vec![Event::start("div"), Event::text("\n"), Event::end("div")];
	assert_eq!(pretty_print(&events), "<div>\n</div>");
}

#[test]
fn printer_keeps_line_breaks_after_inline_content() {
	let events = vec![
		Event::start("p"),
		Event::text("a"),
		Event::text("\n"),
		Event::text("b"),
		Event::end("p"),
	];
	assert_eq!(pretty_print(&events), "<p>a\nb</p>");
}

#[rstest]
#[case::lone_delimiters("** * _ __ ` ``` $")]
#[case::brackets("[ [a]( ![ ![b] (c)")]
#[case::pipes("| |\n||\n| - |")]
#[case::delimiter_row_only("- | -")]
#[case::raw_tags("<div><p>x</div></p></span><span>\n\n</span>")]
#[case::raw_tag_in_list_item("* <div>a\n* b</div>")]
#[case::raw_tag_in_header("<div>\n# a </div> b\n</div>")]
#[case::raw_tag_in_cell("<b>a | </b>\n- | -")]
#[case::malformed_tags("<a href=\"x> <b c=> <!-- x")]
#[case::directive_without_table("<!--table class=\"x\"-->\n\ntext")]
#[case::deep_lists("* a\n    * b\n  * c\n* d\n        1. e\n- f")]
#[case::emphasis_mix("*a **b* c** _d_e_")]
#[case::fence_in_paragraph("text ```x``` more\n```")]
#[case::trailing_backslash("text\\")]
#[case::unicode("é|ü\n:-:|-\n日本|語 *強*")]
#[case::unclosed_block_tag("<div>hello")]
#[case::unclosed_nested_tags("<div><section><b>x")]
#[case::inline_tag_across_paragraphs("<b>x\n\ny</b>")]
#[case::inline_end_tag_after_block("<span>a\n\n<div>b</span>\n\nc")]
#[case::void_block_tag("a\n<hr>\nb")]
#[case::inline_tag_before_table("<b>x\na | b\n- | -")]
#[case::alternating_delimiters("*_*_*_ __**__** *a _b* c_")]
fn adversarial_input_renders_well_nested(#[case] source: &str) {
	let events = parse(source);
	assert_well_nested(&events);
	assert_eq!(render(source), render(source));
}

#[test]
fn alternating_delimiters_render_without_deep_nesting() {
	let source = "*_".repeat(20_000);
	let events = parse(&source);
	let html = render(&source);

	assert_well_nested(&events);
	assert!(html.starts_with("<p><em>_</em><em>*</em>"), "{}", &html[..40]);
	assert!(html.ends_with("<em>_</em>_</p>"), "{}", &html[html.len() - 40..]);
}

#[test]
fn inner_span_closed_by_outer_delimiter_becomes_text() {
	assert_eq!(render("*a _b* c_"), "<p><em>a _b</em> c_</p>");
}

#[rstest]
#[case::plain_text("a".repeat(100_000))]
#[case::open_brackets("[".repeat(50_000))]
#[case::open_images("![a".repeat(30_000))]
#[case::open_tags("<a ".repeat(30_000))]
#[case::open_comments("<!--".repeat(30_000))]
#[case::pipes_without_table("a|".repeat(50_000))]
fn long_lines_render(#[case] source: String) {
	let events = parse(&source);

	assert_well_nested(&events);
	assert!(render(&source).starts_with("<"));
}

#[test]
fn unclosed_raw_tags_close_at_end_of_input() {
	assert_eq!(parse("<div>hello"), vec![
		Event::start("div"),
		Event::text("hello"),
		Event::end("div"),
	]);
}

#[test]
fn paragraph_end_closes_its_inline_tags() {
	assert_eq!(render("<b>x\n\ny</b>"), "<p><b>x</b></p>\n<p>y&lt;/b&gt;</p>");
}

#[test]
fn void_block_tags_hold_no_content() {
	assert_eq!(parse("<hr>\ntext"), vec![
		Event::start("hr"),
		Event::start("p"),
		Event::text("text"),
		Event::end("p"),
	]);
}

#[test]
fn inline_end_tag_restores_mode_of_closed_block() {
	let events = parse("<div><span>\n# h\n<section>x</span>\n\nc</div>");

	assert_eq!(events, vec![
		Event::start("div"),
		Event::start("span"),
		Event::text("\n"),
		Event::start("h1"),
		Event::text("h"),
		Event::end("h1"),
		Event::start("section"),
		Event::text("x"),
		Event::end("section"),
		Event::end("span"),
		Event::start("p"),
		Event::text("c"),
		Event::end("p"),
		Event::end("div"),
	]);
}

#[rstest]
#[case::continuing_cell(
	"a |\\| b|\n-|-|\n1|2|",
	"<table>\n  <tr>\n    <th>a</th>\n    <th>| b</th>\n  </tr>\n  <tr>\n    <td>1</td>\n    \
	 <td>2</td>\n  </tr>\n</table>"
)]
#[case::row_start(
	"\\|a | b\n- | -",
	"<table>\n  <tr>\n    <th>|a</th>\n    <th>b</th>\n  </tr>\n</table>"
)]
fn escaped_pipes_stay_inside_cells(#[case] source: &str, #[case] expected: &str) {
	assert_eq!(render(source), expected);
}

#[test]
#[traced_test]
fn logs_rollback() {
	render("*abc");
	assert!(logs_contain("rolled back to text"));
}

#[rstest]
#[case::start(
	r#"<a href="x" rel=nofollow>"#,
	Tag { kind: TagKind::Start, name: "a".into(), attributes: vec![Attribute::new("href", "x"), Attribute::new("rel", "nofollow")] }
)]
#[case::end("</DIV>", Tag { kind: TagKind::End, name: "div".into(), attributes: vec![] })]
#[case::self_closing("<br/>", Tag { kind: TagKind::SelfClosing, name: "br".into(), attributes: vec![] })]
#[case::unquoted_path(
	"<img src=/a/b.png />",
	Tag { kind: TagKind::SelfClosing, name: "img".into(), attributes: vec![Attribute::new("src", "/a/b.png")] }
)]
#[case::bare_attribute(
	"<input disabled>",
	Tag { kind: TagKind::Start, name: "input".into(), attributes: vec![Attribute::new("disabled", "")] }
)]
#[case::entities(
	"<a title='it&amp;s'>",
	Tag { kind: TagKind::Start, name: "a".into(), attributes: vec![Attribute::new("title", "it&s")] }
)]
fn parses_tag_fragments(#[case] fragment: &str, #[case] expected: Tag) -> EmdownResult<()> {
	assert_eq!(parse_fragment(fragment)?, Fragment::Tag(expected));

	Ok(())
}

#[test]
fn parses_comment_fragment() -> EmdownResult<()> {
	assert_eq!(parse_fragment("<!-- hi -->")?, Fragment::Comment(" hi ".into()));

	Ok(())
}

#[test]
fn rejects_malformed_fragments() {
	assert!(matches!(parse_fragment(""), Err(EmdownError::EmptyFragment)));
	assert!(matches!(
		parse_fragment("<!-- x"),
		Err(EmdownError::UnterminatedComment(_))
	));
	assert!(matches!(
		parse_fragment(r#"<a href="x>"#),
		Err(EmdownError::MalformedFragment { .. })
	));
	assert!(matches!(
		parse_fragment("<a> extra"),
		Err(EmdownError::MalformedFragment { .. })
	));
	assert!(matches!(
		parse_fragment("</a/>"),
		Err(EmdownError::MalformedFragment { .. })
	));
}

#[rstest]
#[case::attributes(
	"table class=\"x\" id=\"t\"",
	Some(vec![Attribute::new("class", "x"), Attribute::new("id", "t")])
)]
#[case::bare(" table ", Some(vec![]))]
#[case::other_word("tablet", None)]
#[case::plain_comment(" note ", None)]
fn reads_table_directives(#[case] body: &str, #[case] expected: Option<Vec<Attribute>>) {
	assert_eq!(Fragment::Comment(body.into()).table_directive(), expected);
}

#[rstest]
#[case::block("DIV", TagClass::Block)]
#[case::inline("span", TagClass::Inline)]
#[case::unknown("widget", TagClass::Unknown)]
fn classifies_tags(#[case] name: &str, #[case] expected: TagClass) {
	assert_eq!(Vocabulary::default().classify(name), expected);
}

#[test]
fn vocabulary_reclassifies_tags() {
	let vocabulary = Vocabulary::default().with_inline("div").with_block("span");

	assert!(vocabulary.is_inline("div"));
	assert!(vocabulary.is_block("span"));
}

#[test]
fn reads_print_config() -> EmdownResult<()> {
	let config = EmdownConfig::from_toml("[print]\nindent = 4\n")?;
	assert_eq!(config.print, PrintOptions {
		indent: 4,
		tabs: false,
	});

	let config = EmdownConfig::from_toml("")?;
	assert_eq!(config, EmdownConfig::default());
	assert_eq!(config.print.unit(), "  ");

	Ok(())
}

#[test]
fn rejects_unknown_config_keys() {
	let result = EmdownConfig::from_toml("[print]\nwidth = 3\n");
	assert!(matches!(result, Err(EmdownError::ConfigParse(_))));
}

#[test]
fn discovers_config_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	assert_eq!(EmdownConfig::load(tmp.path())?, None);

	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(tmp.path().join(".config/emdown.toml"), "[print]\ntabs = true\n")?;
	let config = EmdownConfig::load(tmp.path())?;
	assert_eq!(config.map(|config| config.print.unit()), Some("\t".to_string()));

	std::fs::write(tmp.path().join("emdown.toml"), "[print]\nindent = 3\n")?;
	let config = EmdownConfig::load(tmp.path())?;
	assert_eq!(config.map(|config| config.print.indent), Some(3));

	Ok(())
}

#[test]
fn missing_explicit_config_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let result = EmdownConfig::load_from(&tmp.path().join("nope.toml"));
	assert!(matches!(result, Err(EmdownError::ConfigNotFound(_))));

	Ok(())
}
