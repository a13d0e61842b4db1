//! Word lists backing the rule-based analyzer and sentiment scorer.
//!
//! All entries are lowercase. Lookups go through the `is_*` helpers so the
//! sets are built once and shared.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

// Closed-class words: never proper nouns. Only personal pronouns and
// auxiliaries among them contribute lexical roots.
static CLOSED_CLASS: &[&str] = &[
    // pronouns
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him", "his",
    "she", "her", "hers", "it", "its", "itself", "we", "us", "our", "ours", "they", "them",
    "their", "theirs", "this", "that", "these", "those", "who", "whom", "whose", "which", "what",
    "where", "when", "why", "how", "something", "anything", "everything", "nothing", "someone",
    "anyone", "everyone",
    // determiners
    "a", "an", "the", "some", "any", "every", "each", "both", "either", "neither", "another",
    "other", "such",
    // auxiliaries and modals
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has",
    "had", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    // contractions
    "i'm", "you're", "he's", "she's", "it's", "we're", "they're", "i've", "you've", "we've",
    "i'd", "you'd", "i'll", "you'll", "don't", "doesn't", "didn't", "can't", "won't", "isn't",
    "aren't", "wasn't", "weren't", "haven't", "hasn't", "shouldn't", "wouldn't", "couldn't",
    "what's", "that's", "there's", "let's", "dont", "cant", "wont", "im",
    // prepositions
    "of", "in", "to", "for", "with", "on", "at", "from", "by", "about", "as", "into", "onto",
    "through", "over", "under", "after", "before", "between", "during", "without", "within",
    "up", "down", "out", "off", "around", "near",
    // conjunctions
    "and", "but", "or", "nor", "so", "if", "then", "than", "because", "while", "though",
    "although", "unless",
    // adverbs and particles
    "not", "no", "very", "too", "just", "also", "there", "here", "now", "again", "ever",
    "never", "always", "really", "quite", "more", "most", "much", "many", "only", "even",
    "yes", "yeah", "nope", "please", "ok", "okay", "well",
    // interjections
    "hello", "hi", "hey", "hiya", "howdy", "bye", "goodbye", "thanks", "cheers", "oh", "ah",
    "wow",
];

// Personal pronouns, kept as noun roots.
static PERSONAL_PRONOUNS: &[&str] = &[
    "i", "me", "myself", "you", "yourself", "he", "him", "she", "her", "it", "itself", "we",
    "us", "they", "them", "something", "anything", "everything", "nothing", "someone",
    "anyone", "everyone",
];

// Auxiliaries and modals mapped to their verb root.
static AUXILIARIES: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("be", "be"),
    ("been", "be"),
    ("being", "be"),
    ("do", "do"),
    ("does", "do"),
    ("did", "do"),
    ("have", "have"),
    ("has", "have"),
    ("had", "have"),
    ("will", "will"),
    ("would", "would"),
    ("shall", "shall"),
    ("should", "should"),
    ("can", "can"),
    ("could", "could"),
    ("may", "may"),
    ("might", "might"),
    ("must", "must"),
];

// Abbreviations whose trailing period does not end a sentence.
static ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "mt", "vs", "e.g", "i.e", "approx",
];

// Base forms of common verbs.
static VERBS: &[&str] = &[
    "like", "love", "hate", "want", "need", "know", "think", "say", "tell", "go", "come", "get",
    "make", "take", "see", "look", "eat", "drink", "play", "watch", "read", "write", "work",
    "live", "call", "feel", "prefer", "enjoy", "mean", "help", "give", "find", "use", "try",
    "ask", "buy", "sell", "run", "walk", "sleep", "speak", "talk", "learn", "teach", "believe",
    "remember", "forget", "understand", "happen", "sing", "dance", "cook", "swim", "travel",
    "meet", "explain", "describe", "exist", "listen", "hear", "keep", "let", "put", "seem",
    "leave", "bring", "begin", "show", "fly", "drive", "study", "wish", "hope", "agree",
];

// Irregular past forms mapped to their base.
static IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("said", "say"),
    ("told", "tell"),
    ("went", "go"),
    ("gone", "go"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("drank", "drink"),
    ("thought", "think"),
    ("knew", "know"),
    ("known", "know"),
    ("saw", "see"),
    ("seen", "see"),
    ("made", "make"),
    ("took", "take"),
    ("taken", "take"),
    ("got", "get"),
    ("came", "come"),
    ("gave", "give"),
    ("given", "give"),
    ("found", "find"),
    ("felt", "feel"),
    ("met", "meet"),
    ("ran", "run"),
    ("wrote", "write"),
    ("written", "write"),
    ("spoke", "speak"),
    ("sang", "sing"),
    ("swam", "swim"),
    ("slept", "sleep"),
    ("bought", "buy"),
    ("sold", "sell"),
    ("brought", "bring"),
    ("began", "begin"),
    ("flew", "fly"),
    ("drove", "drive"),
    ("left", "leave"),
    ("heard", "hear"),
    ("kept", "keep"),
    ("taught", "teach"),
    ("meant", "mean"),
];

static ADJECTIVES: &[&str] = &[
    "good", "bad", "great", "nice", "best", "worst", "better", "worse", "big", "small", "happy",
    "sad", "new", "old", "beautiful", "ugly", "hot", "cold", "fine", "awesome", "funny",
    "boring", "delicious", "favorite", "favourite", "red", "blue", "green", "black", "white",
    "real", "true", "false", "easy", "hard", "young", "long", "short", "tall", "smart", "cool",
    "fast", "slow", "strong", "weak", "rich", "poor", "high", "low", "early", "late", "right",
    "wrong", "sweet", "sour", "spicy", "terrible", "horrible", "amazing", "interesting",
];

static ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "less", "ish", "ical"];

static POSITIVE: &[(&str, f64)] = &[
    ("good", 0.6),
    ("great", 0.8),
    ("love", 0.9),
    ("like", 0.5),
    ("awesome", 0.9),
    ("amazing", 0.9),
    ("happy", 0.7),
    ("nice", 0.6),
    ("fine", 0.3),
    ("thanks", 0.5),
    ("best", 0.9),
    ("excellent", 0.9),
    ("wonderful", 0.9),
    ("beautiful", 0.7),
    ("delicious", 0.7),
    ("enjoy", 0.6),
    ("fun", 0.6),
    ("cool", 0.5),
];

static NEGATIVE: &[(&str, f64)] = &[
    ("bad", -0.6),
    ("hate", -0.9),
    ("terrible", -0.9),
    ("horrible", -0.9),
    ("awful", -0.9),
    ("sad", -0.6),
    ("worst", -0.9),
    ("boring", -0.5),
    ("ugly", -0.7),
    ("angry", -0.7),
    ("mess", -0.5),
    ("stupid", -0.7),
    ("wrong", -0.4),
];

static NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "doesn't", "didn't", "isn't", "aren't", "wasn't",
    "can't", "cant", "won't",
];

static CLOSED_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CLOSED_CLASS.iter().copied().collect());

static PRONOUN_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PERSONAL_PRONOUNS.iter().copied().collect());

static AUXILIARY_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| AUXILIARIES.iter().copied().collect());

static ABBREVIATION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ABBREVIATIONS.iter().copied().collect());

static VERB_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| VERBS.iter().copied().collect());

static IRREGULAR_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_VERBS.iter().copied().collect());

static ADJECTIVE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ADJECTIVES.iter().copied().collect());

static POLARITY: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| POSITIVE.iter().chain(NEGATIVE.iter()).copied().collect());

static NEGATOR_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEGATORS.iter().copied().collect());

pub fn is_closed_class(word: &str) -> bool {
    CLOSED_SET.contains(word)
}

pub fn is_personal_pronoun(word: &str) -> bool {
    PRONOUN_SET.contains(word)
}

/// Verb root of an auxiliary or modal: `is -> be`, `does -> do`.
pub fn auxiliary_root(word: &str) -> Option<&'static str> {
    AUXILIARY_MAP.get(word).copied()
}

/// Lowercase `word`, without its trailing period, is a known abbreviation.
pub fn is_abbreviation(word: &str) -> bool {
    ABBREVIATION_SET.contains(word)
}

/// Base form of `word` if it reads as a verb.
pub fn verb_root(word: &str) -> Option<String> {
    if VERB_SET.contains(word) {
        return Some(word.to_string());
    }
    if let Some(base) = IRREGULAR_MAP.get(word) {
        return Some((*base).to_string());
    }

    // Inflected forms of known verbs: likes, watches, liked, liking, studies.
    let candidates = inflection_candidates(word);
    if let Some(base) = candidates.iter().find(|c| VERB_SET.contains(c.as_str())) {
        return Some(base.clone());
    }

    // Unknown words with verb morphology.
    if word.len() > 5 && (word.ends_with("ing") || word.ends_with("ed")) {
        let stem = word
            .strip_suffix("ing")
            .or_else(|| word.strip_suffix("ed"))
            .unwrap_or(word);
        return Some(stem.to_string());
    }
    None
}

fn inflection_candidates(word: &str) -> Vec<String> {
    let mut out = Vec::new();
    for suffix in ["ies", "ied"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            out.push(format!("{}y", stem));
        }
    }
    for suffix in ["es", "s"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            out.push(stem.to_string());
        }
    }
    // loved -> love
    if let Some(stem) = word.strip_suffix('d').filter(|s| s.ends_with('e')) {
        out.push(stem.to_string());
    }
    for suffix in ["ed", "ing"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            out.push(stem.to_string());
            // liking -> like
            out.push(format!("{}e", stem));
            // running -> run, stopped -> stop
            let mut chars = stem.chars();
            if let (Some(last), Some(prev)) = (chars.next_back(), chars.next_back()) {
                if last == prev {
                    out.push(stem[..stem.len() - last.len_utf8()].to_string());
                }
            }
        }
    }
    out
}

pub fn is_adjective(word: &str) -> bool {
    ADJECTIVE_SET.contains(word)
        || (word.len() > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)))
}

/// Singular form of a noun.
pub fn noun_root(word: &str) -> String {
    if word.len() > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{}y", stem);
        }
        for suffix in ["ches", "shes", "xes", "sses", "zes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
    }
    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Sentiment polarity of a word, if it carries one.
pub fn polarity(word: &str) -> Option<f64> {
    POLARITY.get(word).copied()
}

pub fn is_negator(word: &str) -> bool {
    NEGATOR_SET.contains(word)
}

/// True for words the analyzer knows as common vocabulary.
pub fn is_known_word(word: &str) -> bool {
    is_closed_class(word)
        || is_abbreviation(word)
        || verb_root(word).is_some()
        || is_adjective(word)
}
