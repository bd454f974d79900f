//! services/client/src/export.rs
//!
//! Local file output for tutorial exports.

use std::path::{Path, PathBuf};
use tutorials_core::domain::{is_plain_id, Tutorial};
use tutorials_core::markdown::{generate_markdown, sanitize_file_stem, MediaLinks};
use tutorials_core::ports::PortError;

use crate::error::ClientError;

pub fn markdown_file_name(title: &str) -> String {
    format!("{}.md", sanitize_file_stem(title))
}

pub fn archive_file_name(tutorial_id: &str) -> String {
    format!("tutorial_{}.zip", tutorial_id)
}

pub async fn write_markdown(
    tutorial: &Tutorial,
    dir: &Path,
    media: &MediaLinks,
) -> Result<PathBuf, ClientError> {
    let path = dir.join(markdown_file_name(&tutorial.title));
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, generate_markdown(tutorial, media)).await?;
    Ok(path)
}

pub async fn write_archive(
    bytes: &[u8],
    tutorial_id: &str,
    dir: &Path,
) -> Result<PathBuf, ClientError> {
    if !is_plain_id(tutorial_id) {
        return Err(PortError::InvalidId(tutorial_id.to_string()).into());
    }
    let path = dir.join(archive_file_name(tutorial_id));
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}
