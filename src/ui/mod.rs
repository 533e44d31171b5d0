//! Read-only projection of the forum panel for presentation.

pub mod time_format;

use crate::model::GroupId;
use crate::state::{ForumThread, GroupInfo, PanelState};
use chrono::{DateTime, Utc};
use time_format::format_last_activity;

/// Everything a renderer needs for one frame of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView<'a> {
    pub group_id: GroupId,
    pub group: &'a GroupInfo,
    pub threads: &'a [ForumThread],
    pub loading: bool,
    pub show_settings: bool,
    pub show_compose: bool,
}

/// `None` until the panel is visible, has a group and has its metadata.
pub fn panel_view(state: &PanelState) -> Option<PanelView<'_>> {
    if !state.visible {
        return None;
    }
    let group_id = state.active_group_id?;
    let group = state.group_info.as_ref()?;
    Some(PanelView {
        group_id,
        group,
        threads: &state.threads,
        loading: state.loading,
        show_settings: state.show_settings,
        show_compose: state.show_compose,
    })
}

impl PanelView<'_> {
    /// Footer label; there is a single page until pagination is tracked.
    pub fn page_label(&self) -> String {
        format!("1 / {}", self.threads.len())
    }

    /// (subject, posts, last activity) rows relative to `now`.
    pub fn rows(&self, now: DateTime<Utc>) -> Vec<(String, u32, String)> {
        self.threads
            .iter()
            .map(|t| (t.subject.clone(), t.posts_count, format_last_activity(&t.last_activity, &now)))
            .collect()
    }
}
