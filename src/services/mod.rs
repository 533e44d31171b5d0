pub mod composer;
pub mod link_bus;

pub use composer::{ForumComposer, MessageGateway};
pub use link_bus::{LinkEventBus, LinkSubscription};
