use anyhow::{Context, Result};
use regex::Regex;

/// Marker the provider appends to a goalkeeper's name when they enter
const GOALKEEPER_IN_MARKER: &str = "(IN)";

/// Pulls structured fragments out of the provider's human-readable texts
#[derive(Debug, Clone)]
pub struct TextExtractor {
    play_type_regex: Regex,
    score_regex: Regex,
}

impl TextExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            play_type_regex: Regex::new(r"[A-Za-z]\w*")
                .context("Failed to compile play type regex")?,
            score_regex: Regex::new(r"\d+:\d+").context("Failed to compile score regex")?,
        })
    }

    /// Play type tag of a goal text such as "PP1 / 2:1 - J. Doe".
    ///
    /// Only the first tag is returned for combined tags ("EQ, GWG" -> "EQ").
    pub fn play_type(&self, text: &str) -> String {
        self.play_type_regex
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    /// First "digits:digits" run of a goal text
    pub fn score(&self, text: &str) -> String {
        self.score_regex
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    /// Whether a goalkeeper text marks the goalkeeper coming in.
    ///
    /// The feed has no structured in/out field; anything without the
    /// "(IN)" marker counts as going out.
    pub fn goalkeeper_in(&self, text: &str) -> bool {
        text.contains(GOALKEEPER_IN_MARKER)
    }
}
