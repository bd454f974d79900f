//! services/client/src/views/header.rs

use crate::dashboard::{Notification, NotificationKind};
use tutorials_core::domain::User;

pub fn render_user_header(user: Option<&User>, login_url: &str) -> String {
    match user {
        Some(user) => {
            let mut line = format!("Signed in as {} <{}>", user.username, user.email);
            if let Some(profile) = &user.profile_url {
                line.push_str(&format!("  {}", profile));
            }
            line
        }
        None => format!("Not signed in. Log in with GitHub: {}", login_url),
    }
}

pub fn render_notification(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Success => "✓",
        NotificationKind::Error => "✗",
    };
    format!("[{}] {}", marker, notification.message)
}
