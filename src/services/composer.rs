use crate::global_prefs::ForumPrefs;
use crate::model::{GroupId, OutgoingMessage};
use crate::state::{AppError, AppResult};
use tokio::sync::mpsc;

/// Anything that can put an outgoing message on its way to the server.
pub trait MessageGateway {
    fn send(&self, msg: OutgoingMessage) -> AppResult<()>;
}

impl MessageGateway for mpsc::UnboundedSender<OutgoingMessage> {
    fn send(&self, msg: OutgoingMessage) -> AppResult<()> {
        mpsc::UnboundedSender::send(self, msg).map_err(|e| AppError::Network(e.to_string()))
    }
}

/// Translates forum intents into outgoing requests. Holds no state beyond the
/// parameters fixed by prefs; every call is fire-and-forget.
pub struct ForumComposer<G> {
    gateway: G,
    include_ownerless: bool,
    category_id: i32,
}

impl<G: MessageGateway> ForumComposer<G> {
    pub fn new(gateway: G, prefs: &ForumPrefs) -> Self {
        Self {
            gateway,
            include_ownerless: prefs.include_ownerless,
            category_id: prefs.default_category_id,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn request_group_metadata(&self, group_id: GroupId) {
        self.dispatch(OutgoingMessage::RequestGroupInfo {
            group_id,
            include_ownerless: self.include_ownerless,
        });
    }

    pub fn request_thread_list(&self, group_id: GroupId, offset: u32, page_size: u32) {
        tracing::info!("Requesting threads for group {} (offset {}, count {})", group_id, offset, page_size);
        self.dispatch(OutgoingMessage::RequestThreadPage {
            group_id,
            offset,
            count: page_size,
        });
    }

    /// Forwards subject and body untouched, empty or not.
    pub fn post_new_thread(&self, group_id: GroupId, subject: &str, body: &str) {
        self.dispatch(OutgoingMessage::PostThread {
            group_id,
            category_id: self.category_id,
            subject: subject.to_string(),
            body: body.to_string(),
        });
    }

    /// Send a prepared message; failures are logged and absorbed.
    pub fn dispatch(&self, msg: OutgoingMessage) {
        if let Err(e) = self.gateway.send(msg) {
            tracing::warn!("Dropping outgoing forum request: {}", e);
        }
    }
}
