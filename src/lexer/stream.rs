//! The matching engine that turns a table plus source text into tokens.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::rules::{Action, StateOp, StateTable, TableError};
use crate::token::{Token, TokenKind};

impl StateTable {
    /// Tokenizes `source`, starting from the table's initial state.
    ///
    /// The returned iterator yields tokens lazily, in strictly increasing
    /// offset order, and tiles the input completely: unmatched characters
    /// come out as one-character [`TokenKind::Error`] tokens rather than
    /// failing the lex.
    ///
    /// # Panics
    ///
    /// Panics if a rule matches zero characters without changing the state
    /// stack. That is a table-authoring bug (largely ruled out by
    /// construction-time validation), not an input condition.
    pub fn tokenize<'t, 's>(&'t self, source: &'s str) -> TokenStream<'t, 's> {
        TokenStream {
            table: self,
            source,
            pos: 0,
            stack: vec![self.initial()],
            queue: VecDeque::new(),
        }
    }

    /// Tokenizes `source` with an explicit starting state stack, bottom
    /// first. An empty slice behaves like [`tokenize`](StateTable::tokenize).
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownState`] if any name in `stack` is not a
    /// state of this table.
    pub fn tokenize_from<'t, 's>(
        &'t self,
        source: &'s str,
        stack: &[&str],
    ) -> Result<TokenStream<'t, 's>, TableError> {
        let mut resolved = Vec::with_capacity(stack.len().max(1));
        for name in stack {
            let canonical = self.canonical(name).ok_or_else(|| TableError::UnknownState {
                from: "starting stack".to_string(),
                target: (*name).to_string(),
            })?;
            resolved.push(canonical);
        }
        if resolved.is_empty() {
            resolved.push(self.initial());
        }
        Ok(TokenStream {
            table: self,
            source,
            pos: 0,
            stack: resolved,
            queue: VecDeque::new(),
        })
    }
}

/// A lazy stream of tokens over one source text.
///
/// Created by [`StateTable::tokenize`]. Each stream owns its offset and
/// state stack, so any number of streams may run over the same shared
/// table concurrently.
#[derive(Debug)]
pub struct TokenStream<'t, 's> {
    table: &'t StateTable,
    source: &'s str,
    pos: usize,
    stack: Vec<&'static str>,
    queue: VecDeque<Token<'s>>,
}

impl<'t, 's> TokenStream<'t, 's> {
    /// The states currently on the stack, bottom first.
    pub fn stack(&self) -> &[&'static str] {
        &self.stack
    }

    fn apply(&mut self, op: StateOp) {
        match op {
            StateOp::Stay => {}
            StateOp::Push(state) => self.stack.push(state),
            StateOp::Pop(count) => {
                // The root entry survives any number of pops.
                for _ in 0..count {
                    if self.stack.len() > 1 {
                        self.stack.pop();
                    }
                }
            }
            StateOp::PopAll => self.stack.truncate(1),
            StateOp::Goto(state) => {
                if let Some(top) = self.stack.last_mut() {
                    *top = state;
                }
            }
        }
    }

    /// Applies a transition that consumed no input, enforcing the
    /// forward-progress contract.
    fn apply_zero_width(&mut self, op: StateOp, state: &str, what: &str) {
        let before = self.stack.clone();
        self.apply(op);
        assert!(
            self.stack != before,
            "lexer table bug: {what} in state `{state}` consumed no input \
             and left the stack unchanged"
        );
    }

    /// Runs one engine step: matches rules of the current state at the
    /// current offset and queues whatever tokens result. Guarantees that
    /// either the offset advances or the stack changes.
    fn step(&mut self) {
        let table = self.table;
        let source = self.source;
        let pos = self.pos;

        let state_name = self.stack.last().copied().unwrap_or(table.initial());
        let Some(state) = table.state(state_name) else {
            // Unreachable for validated tables; degrade to the error path.
            self.emit_error_char();
            return;
        };

        for (index, rule) in state.rules.iter().enumerate() {
            let captures = match rule.pattern.captures_from_pos(source, pos) {
                Ok(Some(captures)) => captures,
                Ok(None) => continue,
                Err(err) => {
                    debug!(state = state_name, index, %err, "pattern match aborted");
                    continue;
                }
            };
            let Some(whole) = captures.get(0) else {
                continue;
            };
            // captures_from_pos searches; only a hit exactly at the
            // current offset counts as a match.
            if whole.start() != pos {
                continue;
            }
            let end = whole.end();

            match &rule.action {
                Action::Emit(kind) => {
                    if end > pos {
                        self.queue.push_back(Token::new(pos, *kind, &source[pos..end]));
                    }
                }
                Action::ByGroups(kinds) => {
                    for (slot, kind) in kinds.iter().enumerate() {
                        if let Some(group) = captures.get(slot + 1) {
                            if !group.as_str().is_empty() {
                                self.queue
                                    .push_back(Token::new(group.start(), *kind, group.as_str()));
                            }
                        }
                    }
                }
                Action::Using(sub) => {
                    let child = TokenStream {
                        table,
                        source: &source[pos..end],
                        pos: 0,
                        stack: vec![*sub],
                        queue: VecDeque::new(),
                    };
                    for token in child {
                        self.queue
                            .push_back(Token::new(pos + token.offset, token.kind, token.text));
                    }
                }
            }

            if end == pos {
                self.apply_zero_width(rule.op, state_name, &format!("rule `{}`", rule.raw));
            } else {
                trace!(state = state_name, index, start = pos, end, "rule matched");
                self.apply(rule.op);
                self.pos = end;
            }
            return;
        }

        if let Some(op) = state.default_op {
            trace!(state = state_name, "default transition taken");
            self.apply_zero_width(op, state_name, "default transition");
            return;
        }

        self.emit_error_char();
    }

    /// Fallback when nothing matched: one character of `Error`, so every
    /// input lexes to completion.
    fn emit_error_char(&mut self) {
        let source = self.source;
        let pos = self.pos;
        let width = source[pos..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
        let end = pos + width;
        debug!(offset = pos, "no rule matched; emitting error token");
        self.queue
            .push_back(Token::new(pos, TokenKind::Error, &source[pos..end]));
        self.pos = end;
    }
}

impl<'t, 's> Iterator for TokenStream<'t, 's> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.pos >= self.source.len() {
                return None;
            }
            self.step();
        }
    }
}
