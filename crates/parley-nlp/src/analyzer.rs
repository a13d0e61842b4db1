//! Sentence segmentation and lexical-root extraction.
//!
//! The [`TextAnalyzer`] trait is the seam the chat engine consumes;
//! [`RuleAnalyzer`] is a lexicon-and-suffix implementation of it.

use std::sync::LazyLock;

use parley_core::LexicalRoots;
use regex::Regex;

use crate::lexicon;

/// Text analysis service: sentence boundaries and part-of-speech roots.
pub trait TextAnalyzer: Send + Sync {
    /// Split text into sentences, in order, punctuation kept.
    fn sentences(&self, text: &str) -> Vec<String>;

    /// Noun, verb, and adjective roots of `text`.
    fn lexical_roots(&self, text: &str) -> LexicalRoots;

    /// Proper nouns of `text` joined by single spaces (empty when none).
    fn proper_nouns(&self, text: &str) -> String;
}

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}][\p{L}'’]*|\d+(?:[.,]\d+)?").expect("Invalid word regex"));

/// A word as it appeared in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Spelling as written.
    pub text: String,
    /// Lowercase form with typographic apostrophes normalised.
    pub lower: String,
    /// Whether the token opens a sentence.
    pub sentence_initial: bool,
}

impl Token {
    pub fn is_numeric(&self) -> bool {
        self.text.chars().next().is_some_and(|c| c.is_ascii_digit())
    }

    fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Split text into word tokens, marking sentence-initial positions.
pub fn tokenize(text: &str) -> Vec<Token> {
    WORD_RE
        .find_iter(text)
        .map(|m| {
            let before = text[..m.start()].trim_end();
            let sentence_initial = before.is_empty()
                || closes_sentence(before)
                || text[..m.start()].ends_with('\n');
            let lower = m.as_str().to_lowercase().replace('’', "'");
            let lower = lower
                .strip_suffix("'s")
                .filter(|stem| !lexicon::is_closed_class(&format!("{}'s", stem)))
                .map(str::to_string)
                .unwrap_or(lower);
            Token {
                text: m.as_str().to_string(),
                lower,
                sentence_initial,
            }
        })
        .collect()
}

/// Rule-based analyzer backed by the built-in lexicon.
#[derive(Debug, Clone, Default)]
pub struct RuleAnalyzer;

impl RuleAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn is_proper_noun(token: &Token) -> bool {
        token.is_capitalized()
            && !token.sentence_initial
            && !token.is_numeric()
            && !lexicon::is_known_word(&token.lower)
    }
}

impl TextAnalyzer for RuleAnalyzer {
    fn sentences(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c == '\n' {
                push_sentence(&mut out, &text[start..i]);
                start = i + c.len_utf8();
                continue;
            }
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }

            let mut end = i + c.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if matches!(next, '.' | '!' | '?') {
                    end = j + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }

            // "3.5", "e.g." and "Mr. Smith" stay inside the sentence.
            let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace())
                && !ends_with_abbreviation(&text[start..end]);
            if at_boundary {
                push_sentence(&mut out, &text[start..end]);
                start = end;
            }
        }
        push_sentence(&mut out, &text[start..]);
        out
    }

    fn lexical_roots(&self, text: &str) -> LexicalRoots {
        let mut roots = LexicalRoots::default();

        for token in tokenize(text) {
            if token.is_numeric() {
                continue;
            }
            if lexicon::is_personal_pronoun(&token.lower) {
                roots.nouns.push(token.lower.clone());
            } else if let Some(aux) = lexicon::auxiliary_root(&token.lower) {
                roots.verbs.push(aux.to_string());
            } else if lexicon::is_closed_class(&token.lower) {
                continue;
            } else if Self::is_proper_noun(&token) {
                roots.nouns.push(lexicon::noun_root(&token.lower));
            } else if lexicon::is_adjective(&token.lower) {
                roots.adjectives.push(token.lower.clone());
            } else if let Some(verb) = lexicon::verb_root(&token.lower) {
                roots.verbs.push(verb);
            } else {
                roots.nouns.push(lexicon::noun_root(&token.lower));
            }
        }
        roots
    }

    fn proper_nouns(&self, text: &str) -> String {
        tokenize(text)
            .into_iter()
            .filter(Self::is_proper_noun)
            .map(|t| t.text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn closes_sentence(text: &str) -> bool {
    text.ends_with(['!', '?']) || (text.ends_with('.') && !ends_with_abbreviation(text))
}

/// `text` ends with an abbreviation such as "Mr." or "e.g.".
fn ends_with_abbreviation(text: &str) -> bool {
    let Some(stem) = text.strip_suffix('.') else {
        return false;
    };
    let word = stem
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or(stem)
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    lexicon::is_abbreviation(&word.to_lowercase())
}

fn push_sentence(out: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if trimmed.chars().any(char::is_alphanumeric) {
        out.push(trimmed.to_string());
    }
}
