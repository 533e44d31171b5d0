use crate::global_prefs::ForumPrefs;
use crate::model::IncomingMessage;
use crate::state::{ForumThread, GroupInfo, PanelState};

/// Fold one server event into the panel. Events may arrive in any order
/// across kinds; anything for a closed or different panel is dropped.
pub fn reduce(mut state: PanelState, msg: &IncomingMessage, prefs: &ForumPrefs) -> PanelState {
    if !state.is_open() {
        tracing::debug!("Dropping {} event, no forum panel open", msg.kind());
        return state;
    }

    match msg {
        IncomingMessage::GroupInfoArrived(info) => {
            if state.active_group_id != Some(info.group_id) {
                tracing::debug!("Dropping stale group info for group {}", info.group_id);
                return state;
            }
            state.group_info = Some(GroupInfo::from(info));
        }
        IncomingMessage::ThreadPageArrived { group_id, threads } => {
            if prefs.guard_thread_pages_by_group {
                if let Some(id) = group_id {
                    if state.active_group_id != Some(*id) {
                        tracing::debug!("Dropping stale thread page for group {}", id);
                        return state;
                    }
                }
            }
            // Snapshot: replaces, never appends.
            state.threads = threads.iter().map(ForumThread::from).collect();
            state.loading = false;
            if let Some(active) = state.active_thread_id {
                if !state.threads.iter().any(|t| t.id == active) {
                    state.active_thread_id = None;
                }
            }
            tracing::debug!("Thread page applied: {} threads", state.threads.len());
        }
        IncomingMessage::ThreadPosted(record) => {
            state.threads.insert(0, ForumThread::from(record));
            state.loading = false;
        }
    }
    state
}
