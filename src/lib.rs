// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # blitzlight
//!
//! A stateful regex tokenizer for the blitzbasic.com language family
//! (BlitzMax, BlitzBasic and Monkey), built as a front-end for syntax
//! highlighting.
//!
//! ## Overview
//!
//! The crate has two halves:
//! - A generic matching engine: per-language rule tables drive a state
//!   stack, and source text comes back out as a lazy stream of classified
//!   tokens that tile the input exactly.
//! - Three language definitions expressed purely as rule-table data, with
//!   registration metadata (aliases, filename patterns, MIME types).
//!
//! There is no parser and no output formatting here: tokens are
//! `(offset, kind, text)` triples for a renderer elsewhere to style, and
//! anything the grammar does not recognize is passed through as
//! [`TokenKind::Error`] rather than failing the lex.
//!
//! ## Quick Start
//!
//! ```rust
//! use blitzlight::{languages, TokenKind};
//!
//! let lang = languages::find_by_filename("player.bmx").unwrap();
//! let tokens: Vec<_> = lang.tokenize("Local x:Int = 5").collect();
//!
//! assert_eq!(tokens[0].kind, TokenKind::KeywordDeclaration);
//! assert_eq!(tokens[0].text, "Local");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod languages;
pub mod lexer;
mod token;

// Re-exports for convenience
pub use languages::Language;
pub use lexer::{StateOp, StateTable, TableError, TokenStream};
pub use token::{Token, TokenKind};
