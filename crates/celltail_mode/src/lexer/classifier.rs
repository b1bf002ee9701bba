//! Identifier classification.
//!
//! Bare words are matched by one generic identifier rule; the table does not
//! know whether `fn` is a keyword or `true` a constant. Instead the rule is
//! tagged [`TokenType::Classify`](crate::lexer::TokenType::Classify) and the
//! scanner hands the matched word to an [`IdentifierClassifier`], which looks
//! it up in a fixed set of category word lists.

use crate::lexer::TokenLabel;
use compact_str::CompactString;
use hashbrown::HashSet;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Category assigned to an identifier-shaped word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "kebab-case"))]
pub enum IdentifierCategory {
    InvalidDeprecated,
    SupportFunction,
    PseudoVariable,
    Constant,
    Keyword,
    /// Fallback for every word not listed anywhere.
    Identifier,
}

impl IdentifierCategory {
    /// Lookup order. The first set containing the word decides its category.
    pub const PRECEDENCE: [Self; 5] = [
        Self::InvalidDeprecated,
        Self::SupportFunction,
        Self::PseudoVariable,
        Self::Constant,
        Self::Keyword,
    ];

    #[must_use]
    pub const fn label(self) -> TokenLabel {
        match self {
            Self::InvalidDeprecated => TokenLabel::InvalidDeprecated,
            Self::SupportFunction => TokenLabel::SupportFunction,
            Self::PseudoVariable => TokenLabel::LanguageVariable,
            Self::Constant => TokenLabel::LanguageConstant,
            Self::Keyword => TokenLabel::Keyword,
            Self::Identifier => TokenLabel::Identifier,
        }
    }
}

/// Word lists per category, the input to [`IdentifierClassifier::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default, rename_all = "kebab-case"))]
pub struct ClassifierConfig {
    pub invalid_deprecated: Vec<CompactString>,
    pub support_function: Vec<CompactString>,
    pub pseudo_variable: Vec<CompactString>,
    pub constant: Vec<CompactString>,
    pub keyword: Vec<CompactString>,
}

impl ClassifierConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `|`-separated words to a category. Empty entries are dropped,
    /// so `""` adds nothing. [`IdentifierCategory::Identifier`] has no word
    /// list and is ignored.
    #[must_use]
    pub fn words(mut self, category: IdentifierCategory, list: &str) -> Self {
        if let Some(words) = self.list_mut(category) {
            words.extend(
                list.split('|')
                    .filter(|word| !word.is_empty())
                    .map(CompactString::from),
            );
        }
        self
    }

    #[must_use]
    pub fn list(&self, category: IdentifierCategory) -> &[CompactString] {
        match category {
            IdentifierCategory::InvalidDeprecated => &self.invalid_deprecated,
            IdentifierCategory::SupportFunction => &self.support_function,
            IdentifierCategory::PseudoVariable => &self.pseudo_variable,
            IdentifierCategory::Constant => &self.constant,
            IdentifierCategory::Keyword => &self.keyword,
            IdentifierCategory::Identifier => &[],
        }
    }

    fn list_mut(&mut self, category: IdentifierCategory) -> Option<&mut Vec<CompactString>> {
        match category {
            IdentifierCategory::InvalidDeprecated => Some(&mut self.invalid_deprecated),
            IdentifierCategory::SupportFunction => Some(&mut self.support_function),
            IdentifierCategory::PseudoVariable => Some(&mut self.pseudo_variable),
            IdentifierCategory::Constant => Some(&mut self.constant),
            IdentifierCategory::Keyword => Some(&mut self.keyword),
            IdentifierCategory::Identifier => None,
        }
    }
}

type WordSet = HashSet<CompactString, ahash::RandomState>;

/// Immutable word-set lookup, safe to share between threads.
#[derive(Debug, Clone)]
pub struct IdentifierClassifier {
    /// One set per category, in [`IdentifierCategory::PRECEDENCE`] order
    sets: [WordSet; 5],
}

impl Default for IdentifierClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl IdentifierClassifier {
    #[must_use]
    pub fn new(config: &ClassifierConfig) -> Self {
        let sets = IdentifierCategory::PRECEDENCE.map(|category| {
            let mut set = WordSet::with_hasher(ahash::RandomState::new());
            set.extend(config.list(category).iter().cloned());
            set
        });
        Self { sets }
    }

    /// Category of `word`. Words outside every set are plain identifiers.
    ///
    /// The caller is expected to pass a whole identifier-shaped match; the
    /// lookup is exact, so `fnx` is never mistaken for `fn`.
    #[must_use]
    pub fn classify(&self, word: &str) -> IdentifierCategory {
        IdentifierCategory::PRECEDENCE
            .into_iter()
            .zip(&self.sets)
            .find(|(_, set)| set.contains(word))
            .map_or(IdentifierCategory::Identifier, |(category, _)| category)
    }

    /// Whether `word` is listed under `category`.
    #[must_use]
    pub fn contains(&self, category: IdentifierCategory, word: &str) -> bool {
        IdentifierCategory::PRECEDENCE
            .iter()
            .position(|c| *c == category)
            .is_some_and(|idx| self.sets[idx].contains(word))
    }

    /// Words listed under more than one category, with every category that
    /// lists them. Authored tables are expected to return nothing here.
    #[must_use]
    pub fn overlaps(&self) -> Vec<(CompactString, Vec<IdentifierCategory>)> {
        let mut seen: Vec<(CompactString, Vec<IdentifierCategory>)> = Vec::new();
        for (category, set) in IdentifierCategory::PRECEDENCE.into_iter().zip(&self.sets) {
            for word in set {
                let owners: Vec<IdentifierCategory> = IdentifierCategory::PRECEDENCE
                    .into_iter()
                    .zip(&self.sets)
                    .filter(|(_, other)| other.contains(word.as_str()))
                    .map(|(c, _)| c)
                    .collect();
                if owners.len() > 1 && owners[0] == category {
                    seen.push((word.clone(), owners));
                }
            }
        }
        seen.sort_by(|a, b| a.0.cmp(&b.0));
        seen
    }
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`, the only input shape the classifier is defined for.
#[must_use]
pub fn is_identifier_shape(word: &str) -> bool {
    let mut bytes = word.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_' || b == b'$')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IdentifierClassifier {
        IdentifierClassifier::new(
            &ClassifierConfig::new()
                .words(IdentifierCategory::Keyword, "if|else")
                .words(IdentifierCategory::Constant, "nil"),
        )
    }

    #[test]
    fn test_classify_listed_words() {
        let classifier = sample();
        assert_eq!(classifier.classify("if"), IdentifierCategory::Keyword);
        assert_eq!(classifier.classify("nil"), IdentifierCategory::Constant);
    }

    #[test]
    fn test_classify_is_exact_and_case_sensitive() {
        let classifier = sample();
        assert_eq!(classifier.classify("iff"), IdentifierCategory::Identifier);
        assert_eq!(classifier.classify("If"), IdentifierCategory::Identifier);
    }

    #[test]
    fn test_empty_list_adds_no_words() {
        let config = ClassifierConfig::new().words(IdentifierCategory::SupportFunction, "");
        assert!(config.support_function.is_empty());
        let classifier = IdentifierClassifier::new(&config);
        assert_eq!(classifier.classify(""), IdentifierCategory::Identifier);
    }

    #[test]
    fn test_identifier_category_has_no_list() {
        let config = ClassifierConfig::new().words(IdentifierCategory::Identifier, "x|y");
        assert_eq!(config, ClassifierConfig::default());
    }

    #[test]
    fn test_precedence_on_overlap() {
        let classifier = IdentifierClassifier::new(
            &ClassifierConfig::new()
                .words(IdentifierCategory::Keyword, "self|do")
                .words(IdentifierCategory::PseudoVariable, "self")
                .words(IdentifierCategory::InvalidDeprecated, "do"),
        );
        assert_eq!(classifier.classify("self"), IdentifierCategory::PseudoVariable);
        assert_eq!(classifier.classify("do"), IdentifierCategory::InvalidDeprecated);

        let overlaps = classifier.overlaps();
        assert_eq!(overlaps.len(), 2);
        assert_eq!(overlaps[0].0, "do");
        assert_eq!(
            overlaps[0].1,
            vec![IdentifierCategory::InvalidDeprecated, IdentifierCategory::Keyword]
        );
    }

    #[test]
    fn test_contains() {
        let classifier = sample();
        assert!(classifier.contains(IdentifierCategory::Keyword, "else"));
        assert!(!classifier.contains(IdentifierCategory::Constant, "else"));
        assert!(!classifier.contains(IdentifierCategory::Identifier, "else"));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(IdentifierCategory::PseudoVariable.label(), TokenLabel::LanguageVariable);
        assert_eq!(IdentifierCategory::Constant.label(), TokenLabel::LanguageConstant);
        assert_eq!(IdentifierCategory::Identifier.label(), TokenLabel::Identifier);
    }

    #[test]
    fn test_identifier_shape() {
        assert!(is_identifier_shape("$x_1"));
        assert!(is_identifier_shape("_"));
        assert!(!is_identifier_shape("1x"));
        assert!(!is_identifier_shape(""));
        assert!(!is_identifier_shape("a-b"));
    }
}
