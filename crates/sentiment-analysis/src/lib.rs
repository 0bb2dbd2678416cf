use analysis_core::{SentimentLabel, SentimentSummary};

/// Only the most recent headlines are scored
pub const MAX_HEADLINES: usize = 5;

const POSITIVE_WORDS: &[&str] = &[
    "up", "growth", "profit", "record", "gain", "bull", "high", "success", "buy", "strong",
];

const NEGATIVE_WORDS: &[&str] = &[
    "down", "loss", "drop", "crash", "bear", "low", "fail", "sell", "weak", "lawsuit",
];

/// Aggregate score at or beyond which the label leaves Neutral
const LABEL_THRESHOLD: i32 = 2;

/// Bag-of-words headline scorer.
///
/// Each word list entry found anywhere in a lower-cased headline counts once
/// for that headline, as a plain substring ("upgrade" matches "up"). Several
/// list words in one headline all count.
pub struct HeadlineSentimentScorer {
    positive_words: Vec<&'static str>,
    negative_words: Vec<&'static str>,
    max_headlines: usize,
}

impl HeadlineSentimentScorer {
    pub fn new() -> Self {
        Self {
            positive_words: POSITIVE_WORDS.to_vec(),
            negative_words: NEGATIVE_WORDS.to_vec(),
            max_headlines: MAX_HEADLINES,
        }
    }

    pub fn with_max_headlines(mut self, max_headlines: usize) -> Self {
        self.max_headlines = max_headlines;
        self
    }

    fn score_headline(&self, headline: &str) -> i32 {
        let title = headline.to_lowercase();
        let positive = self.positive_words.iter().filter(|w| title.contains(*w)).count() as i32;
        let negative = self.negative_words.iter().filter(|w| title.contains(*w)).count() as i32;
        positive - negative
    }

    /// Score the first headlines (up to the configured maximum).
    /// No headlines at all is Neutral with a zero score.
    pub fn score<S: AsRef<str>>(&self, headlines: &[S]) -> SentimentSummary {
        let score: i32 = headlines
            .iter()
            .take(self.max_headlines)
            .map(|h| self.score_headline(h.as_ref()))
            .sum();

        let label = if score >= LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if score <= -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        SentimentSummary { score, label }
    }

    /// Like [`score`](Self::score), but `None` (news lookup failed) maps to
    /// the "No data" label rather than Neutral.
    pub fn score_optional<S: AsRef<str>>(&self, headlines: Option<&[S]>) -> SentimentSummary {
        match headlines {
            Some(h) => self.score(h),
            None => {
                tracing::debug!("No headlines available, sentiment marked as no data");
                SentimentSummary::no_data()
            }
        }
    }
}

impl Default for HeadlineSentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}
