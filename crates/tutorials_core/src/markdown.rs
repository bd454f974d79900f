//! crates/tutorials_core/src/markdown.rs
//!
//! Renders a tutorial as a Markdown document, with an HTML `<video>` block
//! inlined after every step that carries a clip. The output depends only on
//! the tutorial and the link mode, so repeated calls yield identical text.

use crate::domain::{clip_file_name, Step, Tutorial, VideoClip};
use regex::Regex;
use std::sync::OnceLock;

/// How clip URLs are written into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLinks {
    /// Relative URLs are resolved against the backend origin.
    Absolute { origin: String },
    /// Clips are referenced as `clips/<file name>`, next to the document.
    Bundled,
}

impl MediaLinks {
    pub fn absolute(origin: impl Into<String>) -> Self {
        MediaLinks::Absolute {
            origin: origin.into(),
        }
    }

    fn link_for(&self, file_url: &str) -> String {
        match self {
            MediaLinks::Absolute { origin } => resolve_media_url(file_url, origin),
            MediaLinks::Bundled => format!("clips/{}", clip_file_name(file_url)),
        }
    }
}

/// Prefixes `url` with `origin` unless it is already absolute.
pub fn resolve_media_url(url: &str, origin: &str) -> String {
    if url.starts_with("http") {
        return url.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", origin, url)
    } else {
        format!("{}/{}", origin, url)
    }
}

/// Replaces every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize_file_stem(title: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let re = UNSAFE.get_or_init(|| Regex::new(r"(?i)[^a-z0-9]").expect("static pattern"));
    re.replace_all(title, "_").into_owned()
}

pub fn generate_markdown(tutorial: &Tutorial, media: &MediaLinks) -> String {
    let mut sections: Vec<String> = vec![format!("# {}", tutorial.title), String::new()];

    if !tutorial.tags.is_empty() {
        sections.push(format!("**Tags:** {}", tutorial.tags.join(", ")));
        sections.push(String::new());
    }

    if let Some(read_time) = tutorial.duration_estimate.as_deref().filter(|d| !d.is_empty()) {
        sections.push(format!("**Read time:** {}", read_time));
        sections.push(String::new());
    }

    sections.push(tutorial.introduction.clone());
    sections.push(String::new());
    sections.push("## Steps".to_string());
    sections.push(String::new());

    for step in &tutorial.steps {
        sections.push(format!("{}. {}", step.index, step.text));
        sections.push(String::new());
        if let Some(block) = video_block(step, media) {
            sections.push(block);
            sections.push(String::new());
        }
    }

    if !tutorial.tips.is_empty() {
        sections.push("## Tips".to_string());
        sections.push(String::new());
        sections.extend(tutorial.tips.iter().map(|tip| format!("- {}", tip)));
        sections.push(String::new());
    }

    sections.push("## Summary".to_string());
    sections.push(String::new());
    sections.push(tutorial.summary.clone());

    sections.join("\n")
}

/// Caption shown under an embedded clip.
pub fn format_video_timing(clip: &VideoClip) -> String {
    format!("Video clip: {}s - {}s", clip.start, clip.end)
}

fn video_block(step: &Step, media: &MediaLinks) -> Option<String> {
    let clip = step.video_clip.as_ref()?;
    let file_url = clip.file_url.as_deref()?;
    Some(format!(
        "<video controls preload=\"auto\">\n  <source src=\"{}\" type=\"video/mp4\">\n  Your browser does not support the video tag.\n</video>\n\n*{}*",
        media.link_for(file_url),
        format_video_timing(clip)
    ))
}
