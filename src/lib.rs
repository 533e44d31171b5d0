//! Group forum synchronization for the virtual-world client.
//!
//! Deep links drive the panel (`group-forum/open/<id>`, `group-forum/close`,
//! `group-forum/settings`), the composer turns them into server requests, and
//! server events are folded back into a single [`state::PanelState`].

pub mod app;
pub mod global_prefs;
pub mod handlers;
pub mod model;
pub mod services;
pub mod state;
pub mod ui;

pub use app::App;
pub use global_prefs::ForumPrefs;
pub use model::{GroupId, IncomingMessage, OutgoingMessage};
pub use services::{LinkEventBus, MessageGateway};
pub use state::{AppError, AppResult, PanelState};
