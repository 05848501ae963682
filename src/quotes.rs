use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Shown on the habit view when no quote could be fetched
pub const HABIT_FALLBACK: &str = "Keep going — small steps count!";
/// Shown on the journal view when no quote could be fetched
pub const JOURNAL_FALLBACK: &str = "Reflect on your journey — every entry counts!";

pub const MOTIVATIONAL_QUOTES: [&str; 5] = [
    "The secret of getting ahead is getting started.",
    "Your future is created by what you do today.",
    "Small progress is still progress.",
    "You're capable of amazing things.",
    "One day at a time.",
];

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Quote service unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed quote response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Quote response had no text")]
    Empty,
}

/// Something that hands out one random quote
pub trait QuoteSource {
    fn random_quote(&self) -> Result<String, QuoteError>;
}

#[derive(Deserialize)]
struct QuoteResponse {
    content: String,
}

/// Pull the quote text out of a quote service response body
pub fn parse_quote(body: &str) -> Result<String, QuoteError> {
    let response: QuoteResponse = serde_json::from_str(body)?;
    let content = response.content.trim();
    if content.is_empty() {
        return Err(QuoteError::Empty);
    }
    Ok(content.to_string())
}

/// Ask `source` for a quote, using `fallback` on any failure
pub fn quote_or_fallback(source: &dyn QuoteSource, fallback: &str) -> String {
    match source.random_quote() {
        Ok(quote) => quote,
        Err(e) => {
            warn!(error = %e, "quote lookup failed, using fallback");
            fallback.to_string()
        }
    }
}

/// Same quote all day, a different one the next
pub fn quote_of_the_day(date: NaiveDate) -> &'static str {
    let index = date.num_days_from_ce().rem_euclid(MOTIVATIONAL_QUOTES.len() as i32) as usize;
    MOTIVATIONAL_QUOTES[index]
}
