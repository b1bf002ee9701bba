//! Stateful rule tables.
//!
//! A [`RuleTable`] is a set of named lexical states, each an ordered list of
//! `(token type, regex, next state)` rules. At a given cursor the first rule
//! whose pattern matches *starting at the cursor* wins; there is no
//! longest-match arbitration between rules.
//!
//! Searches are anchored at the cursor, so a rule that does not match there
//! is rejected without looking at the rest of the line. The haystack is still
//! the whole line, which keeps `^` and `\b` aware of what precedes the cursor.

use crate::error::RuleTableError;
use crate::lexer::{TokenLabel, TokenType};
use compact_str::CompactString;
use hashbrown::HashMap;
use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};
use smallvec::SmallVec;
use std::ops::Range;

/// Name of the state every scan begins in.
pub const START: &str = "start";

/// Index of a state inside its [`RuleTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) u32);

impl StateId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

enum RuleDecl {
    Token {
        token: TokenType,
        pattern: CompactString,
        next: Option<CompactString>,
    },
    Include(CompactString),
}

/// Chained builder for a [`RuleTable`].
///
/// ```rust
/// use celltail_mode::lexer::{RuleTableBuilder, TokenLabel, TokenType};
///
/// let table = RuleTableBuilder::new()
///     .state("start")
///     .token(TokenLabel::Comment, "#.*$")
///     .include("words")
///     .state("words")
///     .token(TokenType::Classify, "[a-z]+")
///     .build()?;
///
/// assert_eq!(table.rules(table.start()).len(), 2);
/// # Ok::<(), celltail_mode::error::RuleTableError>(())
/// ```
#[derive(Default)]
pub struct RuleTableBuilder {
    states: Vec<(CompactString, Vec<RuleDecl>)>,
    current: Option<usize>,
    duplicate: Option<CompactString>,
}

impl RuleTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a state; following rules are appended to it.
    #[must_use]
    pub fn state(mut self, name: &str) -> Self {
        if self.states.iter().any(|(existing, _)| existing == name) && self.duplicate.is_none() {
            self.duplicate = Some(name.into());
        }
        self.states.push((name.into(), Vec::new()));
        self.current = Some(self.states.len() - 1);
        self
    }

    /// Append a rule that stays in the current state.
    #[must_use]
    pub fn token(self, token: impl Into<TokenType>, pattern: &str) -> Self {
        self.push(RuleDecl::Token {
            token: token.into(),
            pattern: pattern.into(),
            next: None,
        })
    }

    /// Append a rule that moves to `next` after matching.
    #[must_use]
    pub fn token_next(self, token: impl Into<TokenType>, pattern: &str, next: &str) -> Self {
        self.push(RuleDecl::Token {
            token: token.into(),
            pattern: pattern.into(),
            next: Some(next.into()),
        })
    }

    /// Splice every rule of `state` in at this position.
    #[must_use]
    pub fn include(self, state: &str) -> Self {
        self.push(RuleDecl::Include(state.into()))
    }

    fn push(mut self, decl: RuleDecl) -> Self {
        let idx = match self.current {
            Some(idx) => idx,
            None => {
                self.states.push((START.into(), Vec::new()));
                self.states.len() - 1
            }
        };
        self.current = Some(idx);
        self.states[idx].1.push(decl);
        self
    }

    /// Resolve includes, compile patterns and check every state reference.
    ///
    /// # Errors
    ///
    /// See [`RuleTableError`] for the conditions rejected here.
    pub fn build(self) -> Result<RuleTable, RuleTableError> {
        if let Some(state) = self.duplicate {
            return Err(RuleTableError::DuplicateState { state });
        }

        let mut by_name = HashMap::with_hasher(ahash::RandomState::new());
        for (idx, (name, _)) in self.states.iter().enumerate() {
            by_name.insert(name.clone(), StateId(u32::try_from(idx).unwrap_or(u32::MAX)));
        }
        let start = *by_name.get(START).ok_or(RuleTableError::MissingStartState)?;

        // Compile each authored rule once; includes share the compiled rule.
        let mut compiled: Vec<Vec<Option<Rule>>> = Vec::with_capacity(self.states.len());
        for (name, decls) in &self.states {
            let mut rules = Vec::with_capacity(decls.len());
            for (index, decl) in decls.iter().enumerate() {
                rules.push(match decl {
                    RuleDecl::Token {
                        token,
                        pattern,
                        next,
                    } => Some(compile_rule(name, index, token, pattern, next.as_deref(), &by_name)?),
                    RuleDecl::Include(target) => {
                        if !by_name.contains_key(target) {
                            return Err(RuleTableError::unknown_state(name, target));
                        }
                        None
                    }
                });
            }
            compiled.push(rules);
        }

        let mut states = Vec::with_capacity(self.states.len());
        for (idx, (name, _)) in self.states.iter().enumerate() {
            let mut rules = Vec::new();
            let mut stack = vec![idx];
            flatten(&self.states, &compiled, &by_name, idx, &mut stack, &mut rules)?;
            states.push(LexicalState {
                name: name.clone(),
                rules,
            });
        }

        tracing::debug!(
            states = states.len(),
            rules = states.iter().map(|s| s.rules.len()).sum::<usize>(),
            "built rule table"
        );

        Ok(RuleTable {
            states,
            by_name,
            start,
        })
    }
}

fn compile_rule(
    state: &str,
    index: usize,
    token: &TokenType,
    pattern: &str,
    next: Option<&str>,
    by_name: &HashMap<CompactString, StateId, ahash::RandomState>,
) -> Result<Rule, RuleTableError> {
    let regex =
        Regex::new(pattern).map_err(|err| RuleTableError::invalid_pattern(state, index, &err))?;

    if let TokenType::Groups(labels) = token {
        let groups = regex.captures_len() - 1;
        if groups != labels.len() {
            return Err(RuleTableError::CaptureMismatch {
                state: state.into(),
                index,
                labels: labels.len(),
                groups,
            });
        }
    }

    let next = next
        .map(|target| {
            by_name
                .get(target)
                .copied()
                .ok_or_else(|| RuleTableError::unknown_state(state, target))
        })
        .transpose()?;

    Ok(Rule {
        token: token.clone(),
        pattern: pattern.into(),
        regex,
        next,
    })
}

fn flatten(
    decls: &[(CompactString, Vec<RuleDecl>)],
    compiled: &[Vec<Option<Rule>>],
    by_name: &HashMap<CompactString, StateId, ahash::RandomState>,
    idx: usize,
    stack: &mut Vec<usize>,
    out: &mut Vec<Rule>,
) -> Result<(), RuleTableError> {
    for (decl, rule) in decls[idx].1.iter().zip(&compiled[idx]) {
        match (decl, rule) {
            (RuleDecl::Include(target), _) => {
                // Checked while compiling
                let Some(target_id) = by_name.get(target) else {
                    return Err(RuleTableError::unknown_state(&decls[idx].0, target));
                };
                let target_idx = target_id.index();
                if stack.contains(&target_idx) {
                    return Err(RuleTableError::IncludeCycle {
                        state: decls[stack[0]].0.clone(),
                        via: target.clone(),
                    });
                }
                stack.push(target_idx);
                flatten(decls, compiled, by_name, target_idx, stack, out)?;
                stack.pop();
            }
            (RuleDecl::Token { .. }, Some(rule)) => out.push(rule.clone()),
            (RuleDecl::Token { .. }, None) => {}
        }
    }
    Ok(())
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
    token: TokenType,
    pattern: CompactString,
    regex: Regex,
    next: Option<StateId>,
}

impl Rule {
    #[must_use]
    pub const fn token(&self) -> &TokenType {
        &self.token
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Declared transition, `None` when the rule stays in its state.
    #[must_use]
    pub const fn next(&self) -> Option<StateId> {
        self.next
    }
}

/// A named state and its rules with includes already spliced in.
#[derive(Debug, Clone)]
pub struct LexicalState {
    name: CompactString,
    rules: Vec<Rule>,
}

impl LexicalState {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Label part of a [`RuleMatch`], resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchedLabel {
    /// A fixed label for the whole match.
    Label(TokenLabel),
    /// One label per participating capture group, with its byte range.
    Groups(SmallVec<[(TokenLabel, Range<usize>); 3]>),
    /// The match is an identifier; ask the classifier.
    Classify,
}

/// Result of [`RuleTable::match_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub label: MatchedLabel,
    /// Consumed bytes of the line
    pub range: Range<usize>,
    /// State to continue in
    pub next: StateId,
    /// Position of the winning rule in its (flattened) state
    pub rule: usize,
}

/// Immutable, shareable rule table.
#[derive(Debug, Clone)]
pub struct RuleTable {
    states: Vec<LexicalState>,
    by_name: HashMap<CompactString, StateId, ahash::RandomState>,
    start: StateId,
}

impl RuleTable {
    /// A table whose only state is an empty `start`; every character scans as `text`.
    #[must_use]
    pub fn empty() -> Self {
        let mut by_name = HashMap::with_hasher(ahash::RandomState::new());
        by_name.insert(CompactString::from(START), StateId(0));
        Self {
            states: vec![LexicalState {
                name: START.into(),
                rules: Vec::new(),
            }],
            by_name,
            start: StateId(0),
        }
    }

    /// The `start` state.
    #[must_use]
    pub const fn start(&self) -> StateId {
        self.start
    }

    #[must_use]
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn state_name(&self, id: StateId) -> &str {
        self.states.get(id.index()).map_or("", LexicalState::name)
    }

    #[must_use]
    pub fn state(&self, id: StateId) -> Option<&LexicalState> {
        self.states.get(id.index())
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &LexicalState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(idx, state)| (StateId(u32::try_from(idx).unwrap_or(u32::MAX)), state))
    }

    #[must_use]
    pub fn rules(&self, id: StateId) -> &[Rule] {
        self.state(id).map(LexicalState::rules).unwrap_or_default()
    }

    /// First rule of `state` matching at byte `pos` of `line`.
    ///
    /// Patterns see the whole line, so `^` only holds at column 0 and `\b`
    /// looks at the character before `pos`. Empty matches are ignored.
    /// `None` means no rule applies; the caller must consume one character
    /// itself to make progress.
    #[must_use]
    pub fn match_at(&self, state: StateId, line: &str, pos: usize) -> Option<RuleMatch> {
        if pos >= line.len() || !line.is_char_boundary(pos) {
            return None;
        }

        let input = Input::new(line)
            .span(pos..line.len())
            .anchored(Anchored::Yes);

        for (idx, rule) in self.rules(state).iter().enumerate() {
            let (range, label) = match &rule.token {
                TokenType::Groups(labels) => {
                    let mut caps = rule.regex.create_captures();
                    rule.regex.search_captures(&input, &mut caps);
                    let Some(whole) = caps.get_match() else {
                        continue;
                    };
                    let groups = labels
                        .iter()
                        .enumerate()
                        .filter_map(|(i, label)| {
                            caps.get_group(i + 1).map(|span| (*label, span.start..span.end))
                        })
                        .collect();
                    (whole.range(), MatchedLabel::Groups(groups))
                }
                TokenType::Label(label) => {
                    let Some(m) = rule.regex.search(&input) else {
                        continue;
                    };
                    (m.range(), MatchedLabel::Label(*label))
                }
                TokenType::Classify => {
                    let Some(m) = rule.regex.search(&input) else {
                        continue;
                    };
                    (m.range(), MatchedLabel::Classify)
                }
            };

            if range.is_empty() {
                continue;
            }

            return Some(RuleMatch {
                label,
                range,
                next: rule.next.unwrap_or(state),
                rule: idx,
            });
        }

        None
    }
}
