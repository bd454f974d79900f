//! services/client/src/views/tutorial_card.rs

use tutorials_core::domain::Tutorial;
use tutorials_core::formatters::format_date;

const EMPTY: &str = "No tutorials generated yet.";

pub fn render_tutorial_card(tutorial: &Tutorial) -> String {
    let mut lines = vec![format!("{}  ({})", tutorial.title, tutorial.id)];
    if let Some(source) = &tutorial.transcript_filename {
        lines.push(format!("  from {}", source));
    }
    if !tutorial.tags.is_empty() {
        lines.push(format!("  tags: {}", tutorial.tags.join(", ")));
    }
    let read_time = tutorial.duration_estimate.as_deref().unwrap_or("N/A");
    lines.push(format!(
        "  {} steps  read time {}  updated {}",
        tutorial.steps.len(),
        read_time,
        format_date(&tutorial.updated_at)
    ));
    lines.join("\n")
}

/// Cards separated by blank lines, newest first as given.
pub fn render_tutorial_grid(tutorials: &[Tutorial]) -> String {
    if tutorials.is_empty() {
        return EMPTY.to_string();
    }
    tutorials
        .iter()
        .map(render_tutorial_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}
