//! services/client/src/views/transcript_row.rs

use std::collections::HashSet;
use tutorials_core::domain::Transcript;
use tutorials_core::formatters::{
    average_confidence, dominant_language, format_confidence, format_date_time, format_duration,
};

const EMPTY: &str = "No transcripts uploaded yet.";

/// One line per transcript. `generating` switches the action label.
pub fn render_transcript_row(transcript: &Transcript, generating: bool) -> String {
    let action = if generating { "Generating..." } else { "Generate" };
    format!(
        "{}  {}  recorded {}  {}  {} phrases  {}  conf {}  [{}]  ({})",
        format_date_time(&transcript.created_at),
        transcript.filename,
        format_date_time(&transcript.timestamp),
        format_duration(transcript.duration_in_ticks),
        transcript.phrases.len(),
        dominant_language(&transcript.phrases),
        format_confidence(average_confidence(&transcript.phrases)),
        action,
        transcript.id,
    )
}

pub fn render_transcript_table(transcripts: &[Transcript], generating: &HashSet<String>) -> String {
    if transcripts.is_empty() {
        return EMPTY.to_string();
    }
    transcripts
        .iter()
        .map(|t| render_transcript_row(t, generating.contains(&t.id)))
        .collect::<Vec<_>>()
        .join("\n")
}
