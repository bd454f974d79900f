//! services/client/src/views/mod.rs
//!
//! Plain-text renderers for the terminal front end. They only format what they
//! are given; every decision about what to show is made by the caller.

pub mod header;
pub mod transcript_row;
pub mod tutorial_card;
pub mod tutorial_reader;

pub use header::{render_notification, render_user_header};
pub use transcript_row::{render_transcript_row, render_transcript_table};
pub use tutorial_card::{render_tutorial_card, render_tutorial_grid};
pub use tutorial_reader::{render_clip_manifest, render_tutorial};
