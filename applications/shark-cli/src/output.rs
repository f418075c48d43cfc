//! Plain-text rendering of domain objects for terminal output.

use shark_core::{Library, MediaItem, ServerInfo, User};

pub fn server_line(info: &ServerInfo) -> String {
    let support = if info.is_supported() {
        ""
    } else {
        " [unsupported]"
    };
    match &info.operating_system {
        Some(os) => format!(
            "{} (version {}, {}){}",
            info.server_name, info.version, os, support
        ),
        None => format!("{} (version {}){}", info.server_name, info.version, support),
    }
}

pub fn user_line(user: &User) -> String {
    if user.is_administrator {
        format!("{} [admin]", user.name)
    } else {
        user.name.clone()
    }
}

pub fn library_line(library: &Library) -> String {
    let mut line = format!(
        "{}  {} ({})",
        library.id, library.name, library.collection_type
    );
    if let Some(count) = library.child_count {
        line.push_str(&format!(", {} items", count));
    }
    line
}

/// One line per item: id, title, then runtime and progress when known
pub fn item_line(item: &MediaItem) -> String {
    let title = item.episode_display_title().unwrap_or_else(|| {
        match item.production_year {
            Some(year) => format!("{} ({})", item.name, year),
            None => item.name.clone(),
        }
    });

    let mut line = format!("{}  [{}] {}", item.id, item.media_type, title);
    if let Some(runtime) = item.formatted_runtime() {
        line.push_str(&format!("  {}", runtime));
    }
    if item.has_progress() {
        if let Some(progress) = item.progress_percentage() {
            line.push_str(&format!("  {:.0}% watched", progress * 100.0));
        }
    }
    line
}
