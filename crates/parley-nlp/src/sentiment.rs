//! Lexicon-based sentiment scoring.

use crate::analyzer::tokenize;
use crate::lexicon;

/// Average polarity of the scored words in `text`, in `[-1, 1]`.
///
/// A negator ("not", "never", ...) flips the polarity of the next scored
/// word. Text without any scored word is neutral.
pub fn sentiment(text: &str) -> f64 {
    let mut total = 0.0;
    let mut scored = 0usize;
    let mut negate = false;

    for token in tokenize(text) {
        if lexicon::is_negator(&token.lower) {
            negate = true;
            continue;
        }
        if let Some(p) = lexicon::polarity(&token.lower) {
            total += if negate { -p } else { p };
            scored += 1;
            negate = false;
        }
    }

    if scored == 0 {
        return 0.0;
    }
    (total / scored as f64).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text() {
        assert_eq!(sentiment("The train leaves at noon"), 0.0);
        assert_eq!(sentiment(""), 0.0);
    }

    #[test]
    fn test_positive_text() {
        assert!(sentiment("I love this, it is great") > 0.0);
    }

    #[test]
    fn test_negative_text() {
        assert!(sentiment("This is terrible and I hate it") < 0.0);
    }

    #[test]
    fn test_negator_flips_polarity() {
        assert!(sentiment("not good") < 0.0);
        assert!(sentiment("good") > 0.0);
    }

    #[test]
    fn test_sentiment_is_bounded() {
        let s = sentiment("awesome awesome awesome love love great");
        assert!((-1.0..=1.0).contains(&s));
    }
}
