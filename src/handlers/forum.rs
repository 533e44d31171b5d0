use crate::global_prefs::ForumPrefs;
use crate::model::GroupId;
use crate::state::PanelState;

pub const FORUM_NAMESPACE: &str = "group-forum";
pub const FORUM_LINK_PREFIX: &str = "group-forum/";

/// Commands accepted under the `group-forum` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForumCommand {
    Open(GroupId),
    Close,
    Settings,
}

impl ForumCommand {
    /// Parse `group-forum/<verb>[/<args>]`. Foreign namespaces, unknown verbs
    /// and bad group ids all come back as `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let mut parts = path.split('/');
        if parts.next()? != FORUM_NAMESPACE {
            return None;
        }

        match parts.next()? {
            "open" => {
                let raw = parts.next()?;
                match raw.parse::<GroupId>() {
                    Ok(group_id) => Some(ForumCommand::Open(group_id)),
                    Err(e) => {
                        tracing::debug!("Ignoring forum open with bad group id {:?}: {}", raw, e);
                        None
                    }
                }
            }
            "close" => Some(ForumCommand::Close),
            "settings" => Some(ForumCommand::Settings),
            other => {
                tracing::debug!("Ignoring unknown forum verb {:?}", other);
                None
            }
        }
    }
}

/// Side effects requested by a state transition, run by the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForumEffect {
    RequestGroupMetadata(GroupId),
    RequestThreadList {
        group_id: GroupId,
        offset: u32,
        page_size: u32,
    },
    PostThread {
        group_id: GroupId,
        subject: String,
        body: String,
    },
}

/// Apply a routed command to the panel.
pub fn apply_command(
    mut state: PanelState,
    command: ForumCommand,
    prefs: &ForumPrefs,
) -> (PanelState, Vec<ForumEffect>) {
    match command {
        ForumCommand::Open(group_id) => {
            tracing::info!("Opening group forum for group {}", group_id);
            state.open_for(group_id);
            let effects = vec![
                ForumEffect::RequestGroupMetadata(group_id),
                ForumEffect::RequestThreadList {
                    group_id,
                    offset: 0,
                    page_size: prefs.page_size,
                },
            ];
            (state, effects)
        }
        ForumCommand::Close => {
            state.reset();
            (state, Vec::new())
        }
        ForumCommand::Settings => {
            state.open_settings();
            (state, Vec::new())
        }
    }
}

/// Submit the compose overlay for the open group. Closes the overlay; no-op
/// without an active group.
pub fn submit_compose(mut state: PanelState, subject: &str, body: &str) -> (PanelState, Vec<ForumEffect>) {
    let Some(group_id) = state.active_group_id else {
        return (state, Vec::new());
    };
    state.close_compose();
    let effect = ForumEffect::PostThread {
        group_id,
        subject: subject.to_string(),
        body: body.to_string(),
    };
    (state, vec![effect])
}
