//! Keyword-based interpretation of chat messages.
//!
//! A message yields the person it mentions (whole-word alias match), the
//! intent (first keyword group in priority order) and an optional window.

use std::sync::Arc;

use activity_core::{AliasDirectory, Intent, ParsedQuery, TimeWindow};
use regex::{Regex, RegexBuilder};

/// How a keyword must appear in the message
#[derive(Debug, Clone, Copy)]
enum Keyword {
    /// Start of a word; "commit" matches "committed"
    Stem(&'static str),
    /// A whole word; "pr" does not match "progress"
    Word(&'static str),
}

/// Intent keyword groups, highest priority first
const INTENT_KEYWORDS: &[(Intent, &[Keyword])] = &[
    (
        Intent::JiraOnly,
        &[
            Keyword::Stem("jira"),
            Keyword::Stem("ticket"),
            Keyword::Stem("issue"),
        ],
    ),
    (Intent::GithubCommits, &[Keyword::Stem("commit")]),
    (
        Intent::GithubPrs,
        &[
            Keyword::Stem("pull request"),
            Keyword::Word("pr"),
            Keyword::Word("prs"),
        ],
    ),
    (Intent::GithubRepos, &[Keyword::Stem("repo")]),
    (Intent::GithubOnly, &[Keyword::Stem("github")]),
];

/// Recency phrases and their length in days
const WINDOW_PHRASES: &[(&str, u32)] = &[
    ("this month", 30),
    ("this week", 7),
    ("today", 1),
    ("recent", 3),
    ("these days", 3),
];

/// Parses messages against a fixed alias vocabulary
#[derive(Debug, Clone)]
pub struct IntentParser {
    directory: Arc<AliasDirectory>,
    person_pattern: Option<Regex>,
}

impl IntentParser {
    pub fn new(directory: Arc<AliasDirectory>) -> Result<Self, regex::Error> {
        let person_pattern = if directory.is_empty() {
            None
        } else {
            // Longest first so "jo" never shadows "john" at the same position
            let mut aliases: Vec<&str> = directory.aliases().collect();
            aliases.sort_by_key(|a| std::cmp::Reverse(a.len()));
            let alternation = aliases
                .iter()
                .map(|a| regex::escape(a))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
                .case_insensitive(true)
                .build()?;
            Some(pattern)
        };

        Ok(Self {
            directory,
            person_pattern,
        })
    }

    /// Interpret one message. Pure: no I/O.
    pub fn parse(&self, message: &str) -> ParsedQuery {
        let text = message.to_lowercase();

        let person = self
            .person_pattern
            .as_ref()
            .and_then(|pattern| pattern.find(&text))
            .and_then(|m| self.directory.lookup(m.as_str()))
            .cloned();

        ParsedQuery {
            person,
            intent: classify_intent(&text),
            window: extract_window(&text),
        }
    }
}

/// Pick the intent of a lower-cased message
pub fn classify_intent(text: &str) -> Intent {
    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| keyword_matches(text, *k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Both)
}

/// Recency window of a lower-cased message.
///
/// When several phrases occur, the one appearing first in the text wins,
/// so "this week, no wait, this month" is 7 days rather than 30.
pub fn extract_window(text: &str) -> Option<TimeWindow> {
    WINDOW_PHRASES
        .iter()
        .filter_map(|(phrase, days)| text.find(phrase).map(|pos| (pos, *days)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, days)| TimeWindow::days(days))
}

fn keyword_matches(text: &str, keyword: Keyword) -> bool {
    match keyword {
        Keyword::Stem(stem) => text
            .match_indices(stem)
            .any(|(pos, _)| is_word_start(text, pos)),
        Keyword::Word(word) => text.match_indices(word).any(|(pos, _)| {
            is_word_start(text, pos) && is_word_end(text, pos + word.len())
        }),
    }
}

fn is_word_start(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric())
}

fn is_word_end(text: &str, pos: usize) -> bool {
    text[pos..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric())
}
