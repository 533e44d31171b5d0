// Logical message shapes exchanged with the game server.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

// --- Identifiers ---

/// Identifier of a group. Supplied by navigation, never minted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub i32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(GroupId)
    }
}

impl From<i32> for GroupId {
    fn from(id: i32) -> Self {
        GroupId(id)
    }
}

// --- Inbound payloads ---

/// Group metadata as delivered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInformation {
    pub group_id: GroupId,
    pub badge: String,
    pub title: String,
    pub description: String,
}

/// Raw thread entry as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub thread_id: i32,
    pub header: String,
    pub total_messages: u32,
    /// Epoch seconds.
    pub last_comment_time: i64,
    pub is_pinned: bool,
    pub is_locked: bool,
}

// --- Messages ---

/// Requests the client sends to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutgoingMessage {
    RequestGroupInfo {
        group_id: GroupId,
        include_ownerless: bool,
    },
    RequestThreadPage {
        group_id: GroupId,
        offset: u32,
        count: u32,
    },
    PostThread {
        group_id: GroupId,
        category_id: i32,
        subject: String,
        body: String,
    },
}

/// Events the server pushes to the client, in no guaranteed order across kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomingMessage {
    GroupInfoArrived(GroupInformation),
    ThreadPageArrived {
        group_id: Option<GroupId>,
        threads: Vec<ThreadRecord>,
    },
    ThreadPosted(ThreadRecord),
}

impl IncomingMessage {
    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            IncomingMessage::GroupInfoArrived(_) => "group_info",
            IncomingMessage::ThreadPageArrived { .. } => "thread_page",
            IncomingMessage::ThreadPosted(_) => "thread_posted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_id_parses_trimmed_integers() {
        assert_eq!(" 42 ".parse::<GroupId>(), Ok(GroupId(42)));
        assert_eq!("-3".parse::<GroupId>(), Ok(GroupId(-3)));
        assert!("abc".parse::<GroupId>().is_err());
        assert!("".parse::<GroupId>().is_err());
    }

    #[test]
    fn messages_survive_bincode_framing() {
        let msg = IncomingMessage::ThreadPageArrived {
            group_id: Some(GroupId(9)),
            threads: vec![ThreadRecord {
                thread_id: 1,
                header: "Welcome".to_string(),
                total_messages: 3,
                last_comment_time: 1_700_000_000,
                is_pinned: true,
                is_locked: false,
            }],
        };
        let bytes = bincode::serialize(&msg).unwrap();
        let back: IncomingMessage = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, msg);
        assert_eq!(back.kind(), "thread_page");
    }
}
