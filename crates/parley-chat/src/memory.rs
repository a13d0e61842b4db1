//! Memory signatures.
//!
//! A signature is the concatenation of a sentence's noun, verb, and adjective
//! roots with whitespace and `?!.` removed. Sentences with the same roots
//! share a memory slot, so "Do you like cats?" and "do you like cats!!" recall
//! the same reply. A sentence without roots has an empty signature and is
//! never remembered.

use parley_nlp::TextAnalyzer;

/// Memory key for `sentence`.
pub fn signature(analyzer: &dyn TextAnalyzer, sentence: &str) -> String {
    let roots = analyzer.lexical_roots(sentence);
    roots
        .nouns
        .iter()
        .chain(&roots.verbs)
        .chain(&roots.adjectives)
        .flat_map(|root| root.chars())
        .filter(|c| !c.is_whitespace() && !matches!(c, '?' | '!' | '.'))
        .collect()
}
