// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule tables: the data the tokenizer engine runs on.
//!
//! A [`StateTable`] maps state names to ordered rule lists. Each [`Rule`]
//! pairs a compiled pattern with a classification and a stack transition.
//! Tables are built once through [`TableBuilder`], validated eagerly, and
//! are immutable (and freely shareable across threads) afterwards.

use fancy_regex::Regex;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::token::TokenKind;

/// Result type for table construction.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors detected while building or validating a state table.
///
/// All of these are table-authoring bugs: they surface at construction
/// time, never while lexing input.
#[derive(Debug, Error)]
pub enum TableError {
    /// A pattern failed to compile.
    #[error("state `{state}` rule {index}: invalid pattern `{pattern}`: {source}")]
    BadPattern {
        /// State the rule belongs to
        state: &'static str,
        /// Zero-based rule position within the state
        index: usize,
        /// The offending pattern text
        pattern: String,
        /// Underlying regex error
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// A by-groups kind list does not line up with the pattern's groups.
    #[error(
        "state `{state}` rule {index}: pattern has {groups} capture groups \
         but {kinds} token kinds were given"
    )]
    GroupCountMismatch {
        /// State the rule belongs to
        state: &'static str,
        /// Zero-based rule position within the state
        index: usize,
        /// Capture group count of the compiled pattern
        groups: usize,
        /// Length of the kind list
        kinds: usize,
    },

    /// A transition or delegation names a state the table does not define.
    #[error("`{from}` references unknown state `{target}`")]
    UnknownState {
        /// Where the reference appears
        from: String,
        /// The missing state name
        target: String,
    },

    /// A rule could match zero characters without changing the stack,
    /// which would stall the engine.
    #[error(
        "state `{state}` rule {index}: pattern `{pattern}` can match empty \
         input without a state transition"
    )]
    EmptyMatchNoTransition {
        /// State the rule belongs to
        state: &'static str,
        /// Zero-based rule position within the state
        index: usize,
        /// The offending pattern text
        pattern: String,
    },

    /// The same state name was defined twice.
    #[error("state `{state}` is defined twice")]
    DuplicateState {
        /// The repeated name
        state: &'static str,
    },
}

/// A transition applied to the state stack when a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOp {
    /// Leave the stack alone
    Stay,
    /// Push the named state
    Push(&'static str),
    /// Pop up to `n` states; the root entry is never popped away
    Pop(usize),
    /// Pop everything back down to the root entry
    PopAll,
    /// Replace the top of the stack with the named state
    Goto(&'static str),
}

/// What a rule emits when its pattern matches.
#[derive(Debug, Clone)]
pub enum Action {
    /// One token of the given kind spanning the whole match
    Emit(TokenKind),
    /// One token per non-empty capture group, kinds aligned by position
    ByGroups(Vec<TokenKind>),
    /// Re-tokenize the matched text starting from the named state and
    /// splice the resulting tokens in
    Using(&'static str),
}

/// A single pattern-to-classification-and-transition mapping.
#[derive(Debug)]
pub struct Rule {
    pub(crate) pattern: Regex,
    pub(crate) raw: String,
    pub(crate) action: Action,
    pub(crate) op: StateOp,
}

/// The rules of one state, plus an optional fallthrough transition taken
/// when none of them match.
#[derive(Debug)]
pub(crate) struct State {
    pub(crate) rules: Vec<Rule>,
    pub(crate) default_op: Option<StateOp>,
}

/// A validated, immutable state machine for one language.
#[derive(Debug)]
pub struct StateTable {
    states: FxHashMap<&'static str, State>,
    initial: &'static str,
}

impl StateTable {
    /// Starts building a table whose lex begins in `initial`.
    pub fn builder(initial: &'static str) -> TableBuilder {
        TableBuilder {
            initial,
            case_insensitive: false,
            states: Vec::new(),
        }
    }

    /// The state a fresh lex starts in.
    pub fn initial(&self) -> &'static str {
        self.initial
    }

    pub(crate) fn state(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    /// Maps a caller-supplied name onto the table's own interned name.
    pub(crate) fn canonical(&self, name: &str) -> Option<&'static str> {
        self.states.get_key_value(name).map(|(key, _)| *key)
    }
}

struct RuleSpec {
    pattern: String,
    action: Action,
    op: StateOp,
}

/// Collects the rules of a single state. Obtained through
/// [`TableBuilder::state`].
pub struct StateRules {
    rules: Vec<RuleSpec>,
    default_op: Option<StateOp>,
}

impl StateRules {
    /// Adds a rule emitting one token and leaving the stack alone.
    pub fn rule(&mut self, pattern: impl Into<String>, kind: TokenKind) -> &mut Self {
        self.rule_to(pattern, kind, StateOp::Stay)
    }

    /// Adds a rule emitting one token and applying `op`.
    pub fn rule_to(
        &mut self,
        pattern: impl Into<String>,
        kind: TokenKind,
        op: StateOp,
    ) -> &mut Self {
        self.rules.push(RuleSpec {
            pattern: pattern.into(),
            action: Action::Emit(kind),
            op,
        });
        self
    }

    /// Adds a rule emitting one token per capture group.
    ///
    /// The kind list must be exactly as long as the pattern has capture
    /// groups; [`TableBuilder::build`] rejects a mismatch.
    pub fn groups(&mut self, pattern: impl Into<String>, kinds: &[TokenKind]) -> &mut Self {
        self.groups_to(pattern, kinds, StateOp::Stay)
    }

    /// Adds a capture-group rule that also applies `op`.
    pub fn groups_to(
        &mut self,
        pattern: impl Into<String>,
        kinds: &[TokenKind],
        op: StateOp,
    ) -> &mut Self {
        self.rules.push(RuleSpec {
            pattern: pattern.into(),
            action: Action::ByGroups(kinds.to_vec()),
            op,
        });
        self
    }

    /// Adds a rule that re-tokenizes its match starting from `sub`.
    pub fn using(&mut self, pattern: impl Into<String>, sub: &'static str) -> &mut Self {
        self.rules.push(RuleSpec {
            pattern: pattern.into(),
            action: Action::Using(sub),
            op: StateOp::Stay,
        });
        self
    }

    /// Sets the fallthrough transition: zero-width, emits nothing, taken
    /// only when no rule matched.
    pub fn default_to(&mut self, op: StateOp) -> &mut Self {
        self.default_op = Some(op);
        self
    }
}

/// Builds and validates a [`StateTable`].
pub struct TableBuilder {
    initial: &'static str,
    case_insensitive: bool,
    states: Vec<(&'static str, StateRules)>,
}

impl TableBuilder {
    /// Makes every pattern in the table match case-insensitively.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Defines a state and its rules, in declaration order.
    pub fn state(mut self, name: &'static str, configure: impl FnOnce(&mut StateRules)) -> Self {
        let mut rules = StateRules {
            rules: Vec::new(),
            default_op: None,
        };
        configure(&mut rules);
        self.states.push((name, rules));
        self
    }

    /// Compiles every pattern and checks the table invariants.
    ///
    /// Patterns always match in multi-line mode (`^` and `$` bind to line
    /// boundaries); case folding is controlled per table via
    /// [`case_insensitive`](TableBuilder::case_insensitive).
    pub fn build(self) -> Result<StateTable> {
        let flags = if self.case_insensitive { "(?mi)" } else { "(?m)" };

        let known: Vec<&'static str> = self.states.iter().map(|(name, _)| *name).collect();
        let check_target = |from: String, target: &str| -> Result<()> {
            if known.contains(&target) {
                Ok(())
            } else {
                Err(TableError::UnknownState {
                    from,
                    target: target.to_string(),
                })
            }
        };
        let check_op = |from: &'static str, op: StateOp| -> Result<()> {
            match op {
                StateOp::Push(target) | StateOp::Goto(target) => {
                    check_target(format!("state `{from}`"), target)
                }
                StateOp::Stay | StateOp::Pop(_) | StateOp::PopAll => Ok(()),
            }
        };

        let mut states = FxHashMap::default();
        for (name, spec) in self.states {
            let mut rules = Vec::with_capacity(spec.rules.len());
            for (index, rule) in spec.rules.into_iter().enumerate() {
                let pattern = Regex::new(&format!("{flags}{}", rule.pattern)).map_err(|err| {
                    TableError::BadPattern {
                        state: name,
                        index,
                        pattern: rule.pattern.clone(),
                        source: Box::new(err),
                    }
                })?;

                if let Action::ByGroups(kinds) = &rule.action {
                    let groups = pattern.captures_len() - 1;
                    if groups != kinds.len() {
                        return Err(TableError::GroupCountMismatch {
                            state: name,
                            index,
                            groups,
                            kinds: kinds.len(),
                        });
                    }
                }
                if let Action::Using(sub) = &rule.action {
                    check_target(format!("state `{name}` rule {index}"), sub)?;
                }
                check_op(name, rule.op)?;

                // A rule that can consume nothing must move the stack,
                // otherwise the engine could never make progress on it.
                if rule.op == StateOp::Stay && pattern.is_match("").unwrap_or(false) {
                    return Err(TableError::EmptyMatchNoTransition {
                        state: name,
                        index,
                        pattern: rule.pattern,
                    });
                }

                rules.push(Rule {
                    pattern,
                    raw: rule.pattern,
                    action: rule.action,
                    op: rule.op,
                });
            }

            if let Some(op) = spec.default_op {
                check_op(name, op)?;
            }

            let state = State {
                rules,
                default_op: spec.default_op,
            };
            if states.insert(name, state).is_some() {
                return Err(TableError::DuplicateState { state: name });
            }
        }

        check_target("initial state".to_string(), self.initial)?;

        Ok(StateTable {
            states,
            initial: self.initial,
        })
    }
}
