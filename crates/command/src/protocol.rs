use crate::config::CommandConfig;
use crate::error::{CommandError, Result};
use crate::payload::FollowUpPayload;
use crate::types::{Choice, DisplayMode, QueryMatch};
use docbot_session::SessionEntry;
use std::collections::HashMap;

/// How a query result set is answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disambiguation {
    /// Exactly one canonical match
    Resolved(QueryMatch),
    /// Nothing matched
    Unresolved,
    /// Few enough matches to offer them as choices
    AmbiguousSmall(Vec<QueryMatch>),
    /// Too many matches for choices; only a preview is shown
    AmbiguousLarge(Vec<QueryMatch>),
}

/// Decides how to answer `matches`.
///
/// A single match wins, then a single exact match among several. Otherwise
/// fewer than `choice_limit` matches become choices and the rest is a
/// preview.
pub fn plan(mut matches: Vec<QueryMatch>, choice_limit: usize) -> Disambiguation {
    if matches.len() == 1 {
        return Disambiguation::Resolved(matches.remove(0));
    }

    let mut exact = matches.iter().filter(|m| m.exact);
    if let (Some(first), None) = (exact.next(), exact.next()) {
        return Disambiguation::Resolved(first.clone());
    }

    if matches.is_empty() {
        return Disambiguation::Unresolved;
    }

    if matches.len() < choice_limit {
        Disambiguation::AmbiguousSmall(matches)
    } else {
        Disambiguation::AmbiguousLarge(matches)
    }
}

/// Shortens `text` to at most `max_chars` chars, marking the cut with `...`.
pub fn abbreviate(text: &str, max_chars: usize) -> String {
    const MARKER: &str = "...";

    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(MARKER.len());
    let mut abbreviated: String = text.chars().take(keep).collect();
    abbreviated.push_str(MARKER);
    abbreviated
}

/// Lays out one choice per session candidate.
///
/// Choices are ordered by qualified name (case-insensitive) and grouped
/// `choices_per_row` per row; each payload points at the candidate's index in
/// `entry`.
pub(crate) fn choice_rows(
    entry: &SessionEntry,
    labels: &HashMap<String, String>,
    session: &str,
    display: DisplayMode,
    config: &CommandConfig,
) -> Result<Vec<Vec<Choice>>> {
    let mut ordered: Vec<(usize, &String)> = entry.candidates().iter().enumerate().collect();
    ordered.sort_by(|(_, a), (_, b)| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    let mut choices = Vec::with_capacity(ordered.len());
    for (index, name) in ordered {
        let payload = FollowUpPayload::new(display, index, session).encode();
        let length = payload.chars().count();
        if length > config.payload_max_chars {
            return Err(CommandError::PayloadTooLong {
                session: session.to_string(),
                length,
                limit: config.payload_max_chars,
            });
        }

        let label = labels.get(name).map_or(name.as_str(), String::as_str);
        choices.push(Choice {
            label: abbreviate(label, config.label_max_chars),
            payload,
        });
    }

    Ok(choices
        .chunks(config.choices_per_row.max(1))
        .map(<[Choice]>::to_vec)
        .collect())
}

/// First `limit` qualified names, in query order
pub(crate) fn preview(matches: &[QueryMatch], limit: usize) -> Vec<String> {
    matches
        .iter()
        .take(limit)
        .map(|m| m.qualified_name.clone())
        .collect()
}
