pub mod forum;
pub mod server;

pub use forum::{apply_command, submit_compose, ForumCommand, ForumEffect, FORUM_LINK_PREFIX};
pub use server::reduce;
