//! `emdown_core` turns markdown-flavoured text into indented markup. It scans
//! the source into tokens, parses the tokens into a flat stream of markup
//! events and pretty prints those events with one block tag per line.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source text
//!   → Scanner (fixed-priority matchers, escapes, list/table line modes)
//!   → Parser (paragraph wrapping, speculative constructs with rollback to text)
//!   → Pretty printer (block tags indented by depth, inline content kept inline)
//! ```
//!
//! Every input renders. A construct that never closes (an emphasis without its
//! second `*`, a fence without its closing backticks, a table without its
//! delimiter row) comes out as the literal source text it was written as.
//!
//! ## Modules
//!
//! - [`scanner`]: Splits source into [`Token`]s. Backslash escapes make the
//!   next character literal.
//! - [`parser`]: Builds [`Event`]s from tokens.
//! - [`printer`]: Lays events out as text.
//! - [`fragment`]: Parses embedded `<tag attr="value">` and `<!-- -->`
//!   fragments.
//! - [`vocabulary`]: Which tag names are block level and which are inline.
//! - [`config`]: Loading `emdown.toml`.
//!
//! ## Syntax
//!
//! | Source                      | Markup                                  |
//! | --------------------------- | --------------------------------------- |
//! | `# Title` … `###### Title`  | `<h1>` … `<h6>`                         |
//! | `*em*`, `_em_`              | `<em>`                                  |
//! | `**strong**`                | `<strong>`                              |
//! | `[text](href)`              | `<a href="href">`                       |
//! | `![alt](src)`               | `<img alt="alt" src="src"/>`            |
//! | `` `code` ``                | `<code>`                                |
//! | `$x^2$`                     | `<math>`                                |
//! | `* item`, `- item`, `1. item` | `<ul>`/`<ol>` with `<li>`, nested by indentation |
//! | ```` ```lang ````           | `<pre><code class="lang">`              |
//! | `a \| b` rows               | `<table>` with a `:-`/`-:`/`:-:` delimiter row |
//! | `<!--table class="x"-->`    | attributes for the table below it       |
//!
//! ## Quick Start
//!
//! ```rust
//! use emdown_core::PrintOptions;
//! use emdown_core::Renderer;
//! use emdown_core::Vocabulary;
//!
//! let html = emdown_core::render("[a link](www.example.com)");
//! assert_eq!(html, r#"<p><a href="www.example.com">a link</a></p>"#);
//!
//! let renderer = Renderer::new(Vocabulary::default(), PrintOptions {
//! 	indent: 4,
//! 	tabs: false,
//! });
//! assert_eq!(renderer.render("* one"), "<ul>\n    <li>one</li>\n</ul>");
//! ```

pub use config::*;
pub use error::*;
pub use event::*;
pub use parser::*;
pub use printer::*;
pub use render::*;
pub use scanner::*;
pub use tokens::*;
pub use vocabulary::TagClass;
pub use vocabulary::Vocabulary;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod event;
pub mod fragment;
pub mod parser;
pub mod printer;
mod render;
pub mod scanner;
mod tokens;
pub mod vocabulary;

#[cfg(test)]
mod __tests;
