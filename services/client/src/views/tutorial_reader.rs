//! services/client/src/views/tutorial_reader.rs
//!
//! Full text of an open tutorial, as shown by the viewer.

use tutorials_core::domain::Tutorial;
use tutorials_core::formatters::format_date_time;
use tutorials_core::markdown::{format_video_timing, resolve_media_url};

/// Renders every section; clip URLs are resolved against `media_origin`.
pub fn render_tutorial(tutorial: &Tutorial, media_origin: &str) -> String {
    let mut out = vec![tutorial.title.clone(), "=".repeat(tutorial.title.chars().count())];

    if let Some(source) = &tutorial.transcript_filename {
        out.push(format!("Source: {}", source));
    }
    if !tutorial.tags.is_empty() {
        out.push(format!("Tags: {}", tutorial.tags.join(", ")));
    }
    if let Some(read_time) = &tutorial.duration_estimate {
        out.push(format!("Read time: {}", read_time));
    }
    out.push(format!("Updated: {}", format_date_time(&tutorial.updated_at)));

    out.push(String::new());
    out.push(tutorial.introduction.clone());

    out.push(String::new());
    out.push("Steps".to_string());
    for step in &tutorial.steps {
        out.push(format!("  {}. {}", step.index, step.text));
        if let Some(clip) = &step.video_clip {
            match &clip.file_url {
                Some(url) => out.push(format!(
                    "     {} ({})",
                    resolve_media_url(url, media_origin),
                    format_video_timing(clip)
                )),
                None => out.push(format!("     {}", format_video_timing(clip))),
            }
        }
    }

    if !tutorial.tips.is_empty() {
        out.push(String::new());
        out.push("Tips".to_string());
        out.extend(tutorial.tips.iter().map(|tip| format!("  - {}", tip)));
    }

    out.push(String::new());
    out.push("Summary".to_string());
    out.push(tutorial.summary.clone());
    out.join("\n")
}

/// Where each clip linked as `clips/<name>` by a bundled export is fetched
/// from. Empty when no step carries a clip URL.
pub fn render_clip_manifest(tutorial: &Tutorial, media_origin: &str) -> String {
    let clips = tutorial.video_clips();
    if clips.is_empty() {
        return String::new();
    }
    let mut out = vec![format!("Clips to place next to the document ({}):", clips.len())];
    out.extend(clips.iter().map(|clip| {
        format!(
            "  clips/{} <- {}",
            clip.file_name,
            resolve_media_url(&clip.url, media_origin)
        )
    }));
    out.join("\n")
}
