use crate::global_prefs::ForumPrefs;
use crate::handlers::{self, ForumCommand, ForumEffect, FORUM_LINK_PREFIX};
use crate::model::IncomingMessage;
use crate::services::{ForumComposer, LinkEventBus, LinkSubscription, MessageGateway};
use crate::state::PanelState;
use crate::ui::{self, PanelView};

/// One mounted group forum panel: state, outbound composer and link listener.
pub struct App<G> {
    pub forum: PanelState,
    pub prefs: ForumPrefs,
    pub should_quit: bool,
    composer: ForumComposer<G>,
    link_subscription: Option<LinkSubscription>,
}

impl<G: MessageGateway> App<G> {
    pub fn new(gateway: G, prefs: ForumPrefs) -> Self {
        let composer = ForumComposer::new(gateway, &prefs);
        App {
            forum: PanelState::default(),
            prefs,
            should_quit: false,
            composer,
            link_subscription: None,
        }
    }

    pub fn gateway(&self) -> &G {
        self.composer.gateway()
    }

    /// Start listening for `group-forum/` links. A previous listener is
    /// released before the new one is registered.
    pub fn mount(&mut self, bus: &LinkEventBus) {
        self.link_subscription = None;
        self.link_subscription = Some(bus.subscribe(FORUM_LINK_PREFIX));
    }

    pub fn unmount(&mut self) {
        self.link_subscription = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.link_subscription.is_some()
    }

    /// Handle every link delivered since the last call. Returns how many were seen.
    pub fn drain_links(&mut self) -> usize {
        let mut handled = 0;
        while let Some(path) = self.link_subscription.as_mut().and_then(|sub| sub.try_recv()) {
            self.handle_link(&path);
            handled += 1;
        }
        handled
    }

    pub fn handle_link(&mut self, path: &str) {
        let Some(command) = ForumCommand::parse(path) else {
            return;
        };
        let prefs = &self.prefs;
        let state = std::mem::take(&mut self.forum);
        let (state, effects) = handlers::apply_command(state, command, prefs);
        self.forum = state;
        self.run_effects(effects);
    }

    pub fn handle_server_message(&mut self, msg: IncomingMessage) {
        let state = std::mem::take(&mut self.forum);
        self.forum = handlers::reduce(state, &msg, &self.prefs);
    }

    /// Post a new thread from the compose overlay.
    pub fn submit_compose(&mut self, subject: &str, body: &str) {
        let state = std::mem::take(&mut self.forum);
        let (state, effects) = handlers::submit_compose(state, subject, body);
        self.forum = state;
        self.run_effects(effects);
    }

    pub fn view(&self) -> Option<PanelView<'_>> {
        ui::panel_view(&self.forum)
    }

    fn run_effects(&self, effects: Vec<ForumEffect>) {
        for effect in effects {
            match effect {
                ForumEffect::RequestGroupMetadata(group_id) => {
                    self.composer.request_group_metadata(group_id);
                }
                ForumEffect::RequestThreadList { group_id, offset, page_size } => {
                    self.composer.request_thread_list(group_id, offset, page_size);
                }
                ForumEffect::PostThread { group_id, subject, body } => {
                    self.composer.post_new_thread(group_id, &subject, &body);
                }
            }
        }
    }
}
