//! Recommendation text parser
//!
//! Turns one completion payload into an ordered list of show candidates. The
//! completion provider is asked to answer one show per line using a
//! [`Template`]; this module tolerates answers that drift from it. Malformed
//! lines degrade to partially populated records and only a payload with no
//! usable text at all is an error.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::models::{MediaType, MediaTypeFilter, UnrecognizedMediaType};

mod template;

pub use template::{Slot, Template};

static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\. ").expect("ordinal pattern is valid"));

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The payload was empty or whitespace only, so the upstream call produced nothing usable
    #[error("completion contained no usable text")]
    EmptyCompletion,
}

/// One candidate extracted from a completion line
///
/// Fields are `None` when the line had no data for them and `Some("")` when
/// the data was there but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedShow {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Trimmed and lower-cased, not yet checked against [`MediaType`]
    pub media_type: Option<String>,
    pub identifier: Option<String>,
}

impl GeneratedShow {
    fn fill(&mut self, slot: Slot, raw: &str) {
        let value = raw.trim();
        match slot {
            Slot::Name => self.name = Some(value.to_string()),
            Slot::Description => self.description = Some(value.to_string()),
            Slot::MediaType => self.media_type = Some(value.to_lowercase()),
            Slot::Identifier => self.identifier = Some(value.to_string()),
        }
    }

    /// Classifies the normalized media-type token
    ///
    /// `Ok(None)` when the line carried no media type at all.
    pub fn media_kind(&self) -> Result<Option<MediaType>, UnrecognizedMediaType> {
        self.media_type
            .as_deref()
            .map(str::parse::<MediaType>)
            .transpose()
    }

    /// Identifier as a numeric metadata-provider id, if it is one
    pub fn numeric_id(&self) -> Option<u64> {
        self.identifier.as_deref().and_then(|id| id.parse().ok())
    }
}

/// A line whose field count differs from the template's
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMismatch {
    /// 1-based line number in the completion payload
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCompletion {
    pub shows: Vec<GeneratedShow>,
    pub field_mismatches: Vec<FieldMismatch>,
    /// Media-type constraint the prompt was built with; never applied to `shows` here
    pub expected_media_type: Option<MediaTypeFilter>,
}

impl ParsedCompletion {
    /// Candidates whose media type is present but outside [`MediaType`], with their positions
    pub fn unrecognized_media_types(&self) -> Vec<(usize, UnrecognizedMediaType)> {
        self.shows
            .iter()
            .enumerate()
            .filter_map(|(index, show)| show.media_kind().err().map(|e| (index, e)))
            .collect()
    }
}

/// Parser configured for one template
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationParser {
    template: Template,
    expected_media_type: Option<MediaTypeFilter>,
}

impl RecommendationParser {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            expected_media_type: None,
        }
    }

    /// Records the media-type constraint the prompt was built with
    pub fn expecting(mut self, filter: MediaTypeFilter) -> Self {
        self.expected_media_type = Some(filter);
        self
    }

    /// Parses a completion payload, one candidate per non-blank line, in line order
    pub fn parse(&self, text: &str) -> Result<ParsedCompletion, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyCompletion);
        }

        let slots = self.template.slots();
        let expected = self.template.field_count();
        let delimiter = self.template.delimiter();

        let mut shows = Vec::new();
        let mut field_mismatches = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (fields, found) = split_fields(line, delimiter, expected);

            if found != expected {
                tracing::warn!(
                    line = index + 1,
                    expected,
                    found,
                    template = %self.template,
                    "Completion line does not match template"
                );
                field_mismatches.push(FieldMismatch {
                    line: index + 1,
                    expected,
                    found,
                });
            }

            let mut show = GeneratedShow::default();
            for (position, (slot, raw)) in slots.iter().zip(fields).enumerate() {
                let raw = if position == 0 { strip_ordinal(raw) } else { raw };
                show.fill(*slot, raw);
            }
            shows.push(show);
        }

        tracing::debug!(
            template = %self.template,
            candidates = shows.len(),
            mismatches = field_mismatches.len(),
            "Parsed completion"
        );

        Ok(ParsedCompletion {
            shows,
            field_mismatches,
            expected_media_type: self.expected_media_type,
        })
    }
}

/// Splits `line` into at most `count` fields, returning them with the raw field count
///
/// With too many delimiters the first fields are taken from the left, the last
/// from the right, and the field before the last keeps the overflow.
fn split_fields<'a>(line: &'a str, delimiter: &str, count: usize) -> (Vec<&'a str>, usize) {
    let found = line.matches(delimiter).count() + 1;
    if found <= count {
        return (line.split(delimiter).collect(), found);
    }
    if count < 2 {
        return (vec![line], found);
    }

    let mut fields = Vec::with_capacity(count);
    let mut rest = line;
    for _ in 0..count - 2 {
        if let Some((head, tail)) = rest.split_once(delimiter) {
            fields.push(head);
            rest = tail;
        }
    }
    match rest.rsplit_once(delimiter) {
        Some((middle, last)) => {
            fields.push(middle);
            fields.push(last);
        }
        None => fields.push(rest),
    }

    (fields, found)
}

/// Removes a leading `"<digits>. "` list marker
pub fn strip_ordinal(field: &str) -> &str {
    match ORDINAL_PREFIX.find(field) {
        Some(marker) => &field[marker.end()..],
        None => field,
    }
}

/// Parses `text` with `template`, dropping diagnostics
pub fn parse_recommendations(
    text: &str,
    template: Template,
) -> Result<Vec<GeneratedShow>, ParseError> {
    RecommendationParser::new(template)
        .parse(text)
        .map(|parsed| parsed.shows)
}
