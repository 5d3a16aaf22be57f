//! The stateful pattern-matching engine behind every language table.
//!
//! The lexer runs a compiled rule table over source text and produces a
//! lazy stream of classified tokens for a renderer to consume.
//!
//! ## Structure
//!
//! - `rules.rs` - `StateTable`, `Rule`, transitions, and the validating builder
//! - `stream.rs` - `TokenStream`, the matching engine itself
//!
//! ## Documentation Submodules
//!
//! - `grammar` - How rule tables are written and how transitions behave
//!
//! ## Usage
//!
//! ```rust
//! use blitzlight::lexer::StateTable;
//! use blitzlight::TokenKind;
//!
//! let table = StateTable::builder("root")
//!     .state("root", |s| {
//!         s.rule(r"[0-9]+", TokenKind::NumberInteger);
//!         s.rule(r"\s+", TokenKind::Text);
//!     })
//!     .build()?;
//!
//! for token in table.tokenize("12 34") {
//!     println!("{}: {:?}", token.kind, token.text);
//! }
//! # Ok::<(), blitzlight::lexer::TableError>(())
//! ```

mod rules;
mod stream;

// Documentation submodule
pub mod grammar;

pub use rules::{Action, Rule, StateOp, StateRules, StateTable, TableBuilder, TableError};
pub use stream::TokenStream;
