//! Search filtering, column sorting and cell formatting for the item table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{model::FileItem, view_mode::ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    #[default]
    Name,
    Size,
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Table query state. Reset to the default on every listing load.
pub struct ListingQuery {
    pub search: String,
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl ListingQuery {
    /// Clicking the active column flips direction; another column sorts ascending.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column;
            self.direction = SortDirection::Asc;
        }
    }

    fn matches(&self, item: &FileItem) -> bool {
        let needle = self.search.trim();
        needle.is_empty() || item.name().to_lowercase().contains(&needle.to_lowercase())
    }
}

fn compare(column: SortColumn, a: &FileItem, b: &FileItem) -> Ordering {
    match column {
        SortColumn::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        SortColumn::Size => a.size().cmp(&b.size()),
        SortColumn::Modified => a.timestamp().cmp(b.timestamp()),
    }
    .then_with(|| a.name().cmp(b.name()))
}

/// Filters and sorts `items`. Folders stay ahead of files in both directions.
pub fn apply(items: &[FileItem], query: &ListingQuery) -> Vec<FileItem> {
    let mut visible: Vec<FileItem> = items
        .iter()
        .filter(|item| query.matches(item))
        .cloned()
        .collect();
    visible.sort_by(|a, b| {
        b.is_dir().cmp(&a.is_dir()).then_with(|| {
            let ordering = compare(query.column, a, b);
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        })
    });
    visible
}

/// Human-readable byte count using binary units, e.g. `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Size cell text; folders show a dash.
pub fn size_label(item: &FileItem) -> String {
    if item.is_dir() {
        "-".to_string()
    } else {
        format_size(item.size())
    }
}

/// Header of the view-specific column shown between name and size.
pub fn detail_header(view: ViewMode) -> Option<&'static str> {
    match view {
        ViewMode::Directory => None,
        ViewMode::Trash => Some("Original Location"),
        ViewMode::SharedWithMe => Some("Shared By"),
        ViewMode::MyShares => Some("Shared With"),
    }
}

pub fn detail_cell(item: &FileItem) -> Option<&str> {
    match item {
        FileItem::Directory(_) => None,
        FileItem::Trash(entry) => Some(&entry.original_path),
        FileItem::SharedWithMe(entry) => Some(&entry.sharer_name),
        FileItem::MyShare(entry) => Some(&entry.recipient_name),
    }
}

pub fn timestamp_header(view: ViewMode) -> &'static str {
    match view {
        ViewMode::Directory => "Modified",
        ViewMode::Trash => "Deleted",
        ViewMode::SharedWithMe | ViewMode::MyShares => "Shared",
    }
}

/// Shortens an RFC 3339 timestamp to `YYYY-MM-DD HH:MM`; other text is shown unchanged.
pub fn format_timestamp(raw: &str) -> String {
    let bytes = raw.as_bytes();
    if raw.len() >= 16 && raw.is_char_boundary(16) && bytes[10] == b'T' {
        format!("{} {}", &raw[..10], &raw[11..16])
    } else {
        raw.to_string()
    }
}
