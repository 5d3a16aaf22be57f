//! Rule table authoring notes.
//!
//! This module documents the conventions the language tables in
//! [`crate::languages`] are written against. It contains no code.
//!
//! ## Matching model
//!
//! Each state holds an ordered rule list. At every offset the engine tries
//! the current state's rules top to bottom and takes the **first** one whose
//! pattern matches exactly at that offset. Declaration order is the only
//! tie-break; a later rule matching more text never wins. Tables therefore
//! list specific patterns (keywords, literals) before catch-alls
//! (identifiers).
//!
//! Patterns always compile in multi-line mode, so `^` matches after every
//! newline, not just at offset zero. Whole-table case folding is a build
//! flag; individual rules can opt in with an inline `(?i)` group instead.
//! Lookahead is available and used where a literal must not extend
//! (`[0-9]+\.[0-9]*(?!\.)` keeps `1..` from lexing as a float).
//!
//! ## Transitions
//!
//! | Transition | Effect on the stack |
//! |------------|---------------------|
//! | `Stay` | none |
//! | `Push(state)` | enter a nested context (string body, generics) |
//! | `Pop(n)` | leave up to `n` contexts; the root entry always survives |
//! | `PopAll` | back to the root context |
//! | `Goto(state)` | replace the current context |
//!
//! A state may re-push itself to model nesting: the Monkey block-comment
//! state pushes `comment` again on every inner `#rem` so that each `#end`
//! closes exactly one level.
//!
//! ## Default transitions
//!
//! A state's *default* fires only when no rule matched: it consumes
//! nothing, emits nothing, and applies its transition. The Monkey
//! `classname` state uses `default(Pop(1))` to fall back out of a generic
//! type annotation on the first character that cannot extend it.
//!
//! ## Progress guarantees
//!
//! Anything no rule matches is emitted as a one-character
//! [`Error`](crate::TokenKind::Error) token, so lexing always reaches the
//! end of input. A rule that consumes nothing must change the stack; the
//! builder rejects the statically detectable cases and the engine treats
//! the rest as a table bug rather than looping.
