//! The CellTail rule catalogue and word lists.
//!
//! Three states: `start` for ordinary code, `qstring` inside a double-quoted
//! string (which may run past the end of a line), and `constants`, the
//! number/identifier group that `start` falls through to.

use crate::error::RuleTableError;
use crate::lexer::{
    ClassifierConfig, IdentifierCategory, IdentifierClassifier, RuleTable, RuleTableBuilder,
    START, TokenLabel, TokenType,
};

pub const CELLTAIL_ID: &str = "celltail";

pub const QSTRING: &str = "qstring";
pub const CONSTANTS: &str = "constants";

pub const KEYWORDS: &str = "fn|I|INPUT|D|DEBUG|O|OUTPUT";
pub const BUILTIN_CONSTANTS: &str = "N|false|true";
/// No built-in functions are defined yet.
pub const BUILTIN_FUNCTIONS: &str = "";
pub const PSEUDO_VARIABLES: &str = "self|cls";
pub const DEPRECATED: &str = "debugger";

const OPERATOR: &str = r"\+|-|\*|/|\||&|%|\^|\.\.";
const PUNCTUATION: &str = r",|:|;|->|\+=|-=|\*=|/=|//=|%=|@=|&=|\|=|\^=|>>=|<<=|\*\*=";
const DEF_HEADER: &str = r"(def|class)(\s+)([\x{00BF}-\x{1FFF}\x{2C00}-\x{D7FF}\w]+)";
// ASCII word boundaries: `fné` still yields `fn`.
const INTEGER: &str = r"(?:[1-9][0-9]*|0)(?-u:\b)";
const IDENTIFIER: &str = r"[a-zA-Z_$][a-zA-Z0-9_$]*(?-u:\b)";

/// The CellTail rule table.
///
/// Rule order is significant: the operator class sits before punctuation, so
/// augmented assignments starting with an operator character (`+=`, `-=`,
/// `->`, ...) scan as that operator followed by a fallback character. Only
/// `,` `:` `;` `@=` `>>=` and `<<=` ever reach the punctuation rule.
///
/// # Errors
///
/// Never fails for the built-in catalogue; the `Result` comes from
/// [`RuleTableBuilder::build`].
pub fn celltail_rules() -> Result<RuleTable, RuleTableError> {
    RuleTableBuilder::new()
        .state(START)
        .token(TokenLabel::Comment, "#.*$")
        .token_next(TokenLabel::String, "\"", QSTRING)
        // character literal
        .token(TokenLabel::String, "'.'")
        .token(TokenLabel::KeywordOperator, OPERATOR)
        .token(TokenLabel::Punctuation, PUNCTUATION)
        .token(TokenLabel::LParen, r"[\[({]")
        .token(TokenLabel::RParen, r"[\])}]")
        .token(
            TokenType::groups([
                TokenLabel::Keyword,
                TokenLabel::Text,
                TokenLabel::FunctionName,
            ]),
            DEF_HEADER,
        )
        .token(TokenLabel::Text, r"\s+")
        .include(CONSTANTS)
        .state(QSTRING)
        .token_next(TokenLabel::String, "\"", START)
        .token(TokenLabel::String, "[^\"]")
        .state(CONSTANTS)
        .token(TokenLabel::Numeric, INTEGER)
        .token(TokenType::Classify, IDENTIFIER)
        .build()
}

#[must_use]
pub fn celltail_classifier_config() -> ClassifierConfig {
    ClassifierConfig::new()
        .words(IdentifierCategory::InvalidDeprecated, DEPRECATED)
        .words(IdentifierCategory::SupportFunction, BUILTIN_FUNCTIONS)
        .words(IdentifierCategory::PseudoVariable, PSEUDO_VARIABLES)
        .words(IdentifierCategory::Constant, BUILTIN_CONSTANTS)
        .words(IdentifierCategory::Keyword, KEYWORDS)
}

#[must_use]
pub fn celltail_classifier() -> IdentifierClassifier {
    IdentifierClassifier::new(&celltail_classifier_config())
}
