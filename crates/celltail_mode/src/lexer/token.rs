use crate::syntax::TextRange;
use compact_str::CompactString;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Semantic tag attached to a highlighted span.
///
/// Each label has a dotted scope name (`keyword.operator`, `paren.lparen`,
/// ...) that themes key their colors on. Labels are presentation only; the
/// lexer attaches no meaning to them beyond bracket kinds being distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(into = "&'static str", try_from = "String"))]
pub enum TokenLabel {
    Comment,
    String,
    KeywordOperator,
    Punctuation,
    LParen,
    RParen,
    Keyword,
    Text,
    FunctionName,
    Numeric,
    LanguageConstant,
    SupportFunction,
    LanguageVariable,
    InvalidDeprecated,
    Identifier,
}

impl TokenLabel {
    pub const ALL: [Self; 15] = [
        Self::Comment,
        Self::String,
        Self::KeywordOperator,
        Self::Punctuation,
        Self::LParen,
        Self::RParen,
        Self::Keyword,
        Self::Text,
        Self::FunctionName,
        Self::Numeric,
        Self::LanguageConstant,
        Self::SupportFunction,
        Self::LanguageVariable,
        Self::InvalidDeprecated,
        Self::Identifier,
    ];

    /// Dotted scope name used by themes.
    #[must_use]
    pub const fn scope(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::String => "string",
            Self::KeywordOperator => "keyword.operator",
            Self::Punctuation => "punctuation",
            Self::LParen => "paren.lparen",
            Self::RParen => "paren.rparen",
            Self::Keyword => "keyword",
            Self::Text => "text",
            Self::FunctionName => "entity.name.function",
            Self::Numeric => "constant.numeric",
            Self::LanguageConstant => "constant.language",
            Self::SupportFunction => "support.function",
            Self::LanguageVariable => "variable.language",
            Self::InvalidDeprecated => "invalid.deprecated",
            Self::Identifier => "identifier",
        }
    }

    /// Brackets are tracked as distinct kinds so hosts can pair them.
    #[must_use]
    pub const fn is_bracket(self) -> bool {
        matches!(self, Self::LParen | Self::RParen)
    }
}

impl fmt::Display for TokenLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scope())
    }
}

/// Returned when a scope name does not belong to any [`TokenLabel`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token scope `{0}`")]
pub struct UnknownScope(pub CompactString);

impl FromStr for TokenLabel {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.scope() == s)
            .ok_or_else(|| UnknownScope(s.into()))
    }
}

impl From<TokenLabel> for &'static str {
    fn from(label: TokenLabel) -> Self {
        label.scope()
    }
}

impl TryFrom<String> for TokenLabel {
    type Error = UnknownScope;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// What a rule emits when its pattern matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenType {
    /// One token covering the whole match.
    Label(TokenLabel),
    /// One token per capture group, in group order. Empty groups emit nothing.
    Groups(SmallVec<[TokenLabel; 3]>),
    /// The label is decided by the identifier classifier from the matched text.
    Classify,
}

impl TokenType {
    #[must_use]
    pub fn groups(labels: impl IntoIterator<Item = TokenLabel>) -> Self {
        Self::Groups(labels.into_iter().collect())
    }
}

impl From<TokenLabel> for TokenType {
    fn from(label: TokenLabel) -> Self {
        Self::Label(label)
    }
}

/// A labelled span of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Token {
    pub label: TokenLabel,
    /// The source text that this token covers
    pub text: CompactString,
    /// Byte range within the line
    pub range: TextRange,
}

impl Token {
    #[must_use]
    pub fn new(label: TokenLabel, text: impl Into<CompactString>, range: TextRange) -> Self {
        Self {
            label,
            text: text.into(),
            range,
        }
    }
}
