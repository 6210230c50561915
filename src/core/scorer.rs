//! Sentiment scorers
//!
//! The presenter only needs a paragraph-level score in [-1.0, 1.0] or
//! nothing. `LexiconScorer` is the built-in engine; `FixedScorer` and
//! `FnScorer` stand in for it in tests and demos.

use lazy_static::lazy_static;
use regex::Regex;
use crate::{INTENSIFIER_WEIGHT, LEXICON_DAMPING};
use crate::types::{ScoreSignals, SentimentScore};

/// Source of sentiment scores, treated as a black box by the presenter
pub trait SentimentScorer {
    /// Score the whole text as one paragraph
    fn score(&self, text: &str) -> SentimentScore;
}

/// Number of tokens a negator reaches forward
const NEGATION_SPAN: u8 = 3;

lazy_static! {
    // A word starts with a letter or digit; apostrophes only inside or after
    static ref RE_WORD: Regex = Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}'\x{2019}]*").unwrap();

    static ref RE_POSITIVE: Regex = Regex::new(
        r"(?i)^(happy|happier|happiest|glad|joy|joyful|love|loved|loving|lovely|great|good|wonderful|amazing|awesome|excellent|fantastic|nice|fun|excited|exciting|cheerful|delighted|grateful|thankful|calm|peaceful|proud|hopeful|optimistic|positive|pleased|content|best|beautiful|smile|smiling|laugh|laughing|enjoy|enjoyed|enjoying|blessed|relaxed|thrilled|brilliant|perfect)$"
    ).unwrap();

    static ref RE_NEGATIVE: Regex = Regex::new(
        r"(?i)^(sad|sadder|unhappy|depressed|angry|mad|upset|terrible|awful|horrible|bad|worse|worst|hate|hated|hating|miserable|lonely|anxious|worried|stressed|tired|exhausted|afraid|scared|fear|cry|crying|cried|hurt|pain|painful|disappointed|frustrated|annoyed|negative|gloomy|hopeless|sick|awkward|broken|lost|grief|heartbroken)$"
    ).unwrap();

    static ref RE_NEGATOR: Regex = Regex::new(
        r"(?i)^(not|no|never|none|nothing|hardly|barely|don't|doesn't|didn't|isn't|wasn't|aren't|weren't|can't|cannot|won't|wouldn't|shouldn't|couldn't|dont|doesnt|didnt|isnt|wasnt|cant|wont)$"
    ).unwrap();

    static ref RE_INTENSIFIER: Regex = Regex::new(
        r"(?i)^(so|very|really|extremely|incredibly|super|totally|absolutely|truly|deeply|quite|too)$"
    ).unwrap();
}

/// Regex lexicon scorer: polarity words, negators and intensifiers
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    damping: f64,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self { damping: LEXICON_DAMPING }
    }

    /// Scorer with a custom damping constant (>= 0)
    pub fn with_damping(damping: f64) -> Self {
        Self { damping: damping.max(0.0) }
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Score text and return the value only
    pub fn quick_score(&self, text: &str) -> Option<f64> {
        self.score(text).value
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        // Curly apostrophes (smart punctuation) match the lexicon as ASCII
        let words: Vec<String> = RE_WORD
            .find_iter(text)
            .map(|m| m.as_str().replace('\u{2019}', "'"))
            .collect();

        // Nothing to analyze: empty, whitespace or punctuation only
        if words.is_empty() {
            return SentimentScore::absent();
        }

        let mut signals = ScoreSignals::zero();
        let mut negation_left: u8 = 0;
        let mut boosted = false;

        for word in &words {
            if RE_NEGATOR.is_match(word) {
                negation_left = NEGATION_SPAN;
                continue;
            }
            if RE_INTENSIFIER.is_match(word) {
                boosted = true;
                continue;
            }

            let mut polarity = if RE_POSITIVE.is_match(word) {
                1.0
            } else if RE_NEGATIVE.is_match(word) {
                -1.0
            } else {
                negation_left = negation_left.saturating_sub(1);
                boosted = false;
                continue;
            };

            let weight = if boosted {
                signals.intensified += 1;
                INTENSIFIER_WEIGHT
            } else {
                1.0
            };

            if negation_left > 0 {
                polarity = -polarity;
                signals.negated += 1;
                negation_left = 0;
            }

            if polarity > 0.0 {
                signals.positive += weight;
            } else {
                signals.negative += weight;
            }
            boosted = false;
        }

        let denominator = signals.total() + self.damping;
        let value = if denominator > 0.0 {
            ((signals.positive - signals.negative) / denominator).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        SentimentScore::new(value, signals, words.len())
    }
}

/// Always returns the same score
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer {
    value: Option<f64>,
}

impl FixedScorer {
    pub fn new(value: f64) -> Self {
        Self { value: Some(value) }
    }

    /// Scorer that never produces a score
    pub fn absent() -> Self {
        Self { value: None }
    }
}

impl SentimentScorer for FixedScorer {
    fn score(&self, text: &str) -> SentimentScore {
        match self.value {
            Some(v) => SentimentScore::new(v, ScoreSignals::zero(), text.split_whitespace().count()),
            None => SentimentScore::absent(),
        }
    }
}

/// Scorer backed by a closure
pub struct FnScorer<F>(pub F);

impl<F> SentimentScorer for FnScorer<F>
where
    F: Fn(&str) -> Option<f64>,
{
    fn score(&self, text: &str) -> SentimentScore {
        match (self.0)(text) {
            Some(v) => SentimentScore::new(v, ScoreSignals::zero(), text.split_whitespace().count()),
            None => SentimentScore::absent(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
