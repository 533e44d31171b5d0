use crate::model::{GroupId, GroupInformation, ThreadRecord};
use chrono::{DateTime, TimeZone, Utc};

/// Group header shown above the thread list. Replaced wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub group_id: GroupId,
    pub badge: String,
    pub title: String,
    pub description: String,
}

impl From<&GroupInformation> for GroupInfo {
    fn from(info: &GroupInformation) -> Self {
        Self {
            group_id: info.group_id,
            badge: info.badge.clone(),
            title: info.title.clone(),
            description: info.description.clone(),
        }
    }
}

/// One row of the thread list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumThread {
    pub id: i32,
    pub subject: String,
    pub posts_count: u32,
    pub last_activity: DateTime<Utc>,
    pub pinned: bool,
    pub locked: bool,
}

impl ForumThread {
    /// Last activity rendered as "6/16/2025, 8:30:00 PM" (UTC).
    pub fn updated_at(&self) -> String {
        self.last_activity.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }
}

impl From<&ThreadRecord> for ForumThread {
    fn from(record: &ThreadRecord) -> Self {
        // Out-of-range timestamps collapse to the epoch rather than dropping the row.
        let last_activity = Utc
            .timestamp_opt(record.last_comment_time, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self {
            id: record.thread_id,
            subject: record.header.clone(),
            posts_count: record.total_messages,
            last_activity,
            pinned: record.is_pinned,
            locked: record.is_locked,
        }
    }
}

/// Lifecycle of the panel, derived from `visible` and `loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Closed,
    Opening,
    Loaded,
}

/// State management for the group forum panel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelState {
    pub visible: bool,
    pub active_group_id: Option<GroupId>,
    pub loading: bool,
    pub group_info: Option<GroupInfo>,
    pub threads: Vec<ForumThread>,

    // Overlays, independent of each other
    pub show_settings: bool,
    pub show_compose: bool,

    pub active_thread_id: Option<i32>,
}

impl PanelState {
    pub fn phase(&self) -> PanelPhase {
        match (self.visible, self.loading) {
            (false, _) => PanelPhase::Closed,
            (true, true) => PanelPhase::Opening,
            (true, false) => PanelPhase::Loaded,
        }
    }

    pub fn is_open(&self) -> bool {
        self.visible && self.active_group_id.is_some()
    }

    /// Enter `Opening` for `group_id`. Threads from a previous group are kept
    /// until the next snapshot replaces them.
    pub fn open_for(&mut self, group_id: GroupId) {
        self.visible = true;
        self.active_group_id = Some(group_id);
        self.loading = true;
        self.group_info = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn open_settings(&mut self) {
        self.show_settings = true;
    }

    pub fn close_settings(&mut self) {
        self.show_settings = false;
    }

    pub fn open_compose(&mut self) {
        self.show_compose = true;
    }

    pub fn close_compose(&mut self) {
        self.show_compose = false;
    }

    /// Select a thread currently in the list. Returns false for unknown ids.
    pub fn select_thread(&mut self, thread_id: i32) -> bool {
        if self.threads.iter().any(|t| t.id == thread_id) {
            self.active_thread_id = Some(thread_id);
            true
        } else {
            false
        }
    }

    pub fn clear_thread_selection(&mut self) {
        self.active_thread_id = None;
    }

    pub fn get_active_thread(&self) -> Option<&ForumThread> {
        self.active_thread_id
            .and_then(|id| self.threads.iter().find(|t| t.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, ts: i64) -> ThreadRecord {
        ThreadRecord {
            thread_id: id,
            header: format!("thread {}", id),
            total_messages: 2,
            last_comment_time: ts,
            is_pinned: false,
            is_locked: true,
        }
    }

    #[test]
    fn default_state_is_closed_and_empty() {
        let state = PanelState::default();
        assert_eq!(state.phase(), PanelPhase::Closed);
        assert!(!state.is_open());
        assert!(!state.loading);
        assert!(state.threads.is_empty());
    }

    #[test]
    fn open_for_enters_opening_and_drops_group_info() {
        let mut state = PanelState::default();
        state.group_info = Some(GroupInfo {
            group_id: GroupId(1),
            badge: "b".into(),
            title: "t".into(),
            description: "d".into(),
        });
        state.open_for(GroupId(2));
        assert_eq!(state.phase(), PanelPhase::Opening);
        assert_eq!(state.active_group_id, Some(GroupId(2)));
        assert!(state.group_info.is_none());
    }

    #[test]
    fn thread_timestamp_formats_in_utc() {
        let thread = ForumThread::from(&record(1, 1_750_105_800));
        assert_eq!(thread.updated_at(), "6/16/2025, 8:30:00 PM");
        assert!(thread.locked);
        assert!(!thread.pinned);
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_epoch() {
        let thread = ForumThread::from(&record(1, i64::MAX));
        assert_eq!(thread.last_activity, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn select_thread_only_accepts_listed_ids() {
        let mut state = PanelState::default();
        state.threads = vec![ForumThread::from(&record(4, 0))];
        assert!(!state.select_thread(5));
        assert!(state.select_thread(4));
        assert_eq!(state.get_active_thread().map(|t| t.id), Some(4));
        state.clear_thread_selection();
        assert!(state.get_active_thread().is_none());
    }

    #[test]
    fn overlays_are_independent() {
        let mut state = PanelState::default();
        state.open_settings();
        state.open_compose();
        state.close_settings();
        assert!(!state.show_settings);
        assert!(state.show_compose);
    }
}
