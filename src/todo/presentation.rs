use serde::Serialize;

use super::data::Status;
use super::view::View;

/// Color class the rendering layer applies to a status label or tab.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct ColorTag(&'static str);

impl ColorTag {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

pub const NEUTRAL_TAG: ColorTag = ColorTag("text-gray-500");

impl Status {
    pub fn tag(self) -> ColorTag {
        match self {
            Status::Pending => ColorTag("text-red-600"),
            Status::Ongoing => ColorTag("text-orange-700"),
            Status::Upcoming => ColorTag("text-fuchsia-600"),
            Status::Completed => ColorTag("text-green-600"),
        }
    }
}

/// Tag for a status that may not be one we know, e.g. read back from a
/// damaged row. Unknown values get the neutral tag.
pub fn status_tag(raw: &str) -> ColorTag {
    raw.parse::<Status>().map_or(NEUTRAL_TAG, Status::tag)
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TabMeta {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: ColorTag,
}

impl View {
    /// Sidebar entry for this view, `None` for views that only live in the
    /// top navigation bar.
    pub fn tab_meta(&self) -> Option<TabMeta> {
        let (icon, color) = match self {
            View::All => ("folder-open", "text-black font-bold"),
            View::Important => ("star", "text-[#4ABDAC]"),
            View::Pending => ("clock", "text-red-500"),
            View::Ongoing => ("refresh-ccw", "text-yellow-700"),
            View::Completed => ("check-circle", "text-green-600"),
            View::Trash => ("trash", "text-red-800"),
            _ => return None,
        };

        Some(TabMeta {
            label: self.static_label()?,
            icon,
            color: ColorTag(color),
        })
    }
}

pub const SIDEBAR_VIEWS: [View; 6] = [
    View::All,
    View::Important,
    View::Pending,
    View::Ongoing,
    View::Completed,
    View::Trash,
];

pub const TOP_NAV_VIEWS: [View; 3] = [View::Today, View::Previous, View::Upcoming];

pub fn sidebar_tabs() -> Vec<TabMeta> {
    SIDEBAR_VIEWS.iter().filter_map(View::tab_meta).collect()
}

#[derive(Serialize, Debug)]
pub struct TabsResponse {
    pub sidebar: Vec<TabMeta>,
    pub top_nav: Vec<&'static str>,
}

impl TabsResponse {
    pub fn new() -> TabsResponse {
        TabsResponse {
            sidebar: sidebar_tabs(),
            top_nav: TOP_NAV_VIEWS
                .iter()
                .filter_map(View::static_label)
                .collect(),
        }
    }
}

impl Default for TabsResponse {
    fn default() -> TabsResponse {
        TabsResponse::new()
    }
}
