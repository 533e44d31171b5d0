use group_forum_client::model::{GroupInformation, ThreadRecord};
use group_forum_client::state::PanelPhase;
use group_forum_client::{
    App, AppError, AppResult, ForumPrefs, GroupId, IncomingMessage, LinkEventBus, MessageGateway,
    OutgoingMessage,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct RecordingGateway {
    sent: Rc<RefCell<Vec<OutgoingMessage>>>,
}

impl RecordingGateway {
    fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.borrow().clone()
    }
}

impl MessageGateway for RecordingGateway {
    fn send(&self, msg: OutgoingMessage) -> AppResult<()> {
        self.sent.borrow_mut().push(msg);
        Ok(())
    }
}

struct FailingGateway;

impl MessageGateway for FailingGateway {
    fn send(&self, _msg: OutgoingMessage) -> AppResult<()> {
        Err(AppError::Network("link down".to_string()))
    }
}

fn new_app() -> (App<RecordingGateway>, RecordingGateway) {
    let gateway = RecordingGateway::default();
    (App::new(gateway.clone(), ForumPrefs::default()), gateway)
}

fn record(id: i32, subject: &str) -> ThreadRecord {
    ThreadRecord {
        thread_id: id,
        header: subject.to_string(),
        total_messages: 4,
        last_comment_time: 1_750_105_800,
        is_pinned: true,
        is_locked: false,
    }
}

fn group_info(group: i32) -> IncomingMessage {
    IncomingMessage::GroupInfoArrived(GroupInformation {
        group_id: GroupId(group),
        badge: "b05114s19134".to_string(),
        title: "Builders".to_string(),
        description: "We build things".to_string(),
    })
}

#[test]
fn open_sends_exactly_one_metadata_and_one_page_request() {
    let (mut app, gateway) = new_app();
    app.handle_link("group-forum/open/5");

    assert!(app.forum.visible);
    assert!(app.forum.loading);
    assert_eq!(app.forum.active_group_id, Some(GroupId(5)));
    assert_eq!(
        gateway.sent(),
        vec![
            OutgoingMessage::RequestGroupInfo { group_id: GroupId(5), include_ownerless: false },
            OutgoingMessage::RequestThreadPage { group_id: GroupId(5), offset: 0, count: 100 },
        ]
    );
}

#[test]
fn close_resets_from_any_state_without_requests() {
    let (mut app, gateway) = new_app();
    app.handle_link("group-forum/open/5");
    app.handle_server_message(group_info(5));
    app.handle_server_message(IncomingMessage::ThreadPageArrived {
        group_id: Some(GroupId(5)),
        threads: vec![record(1, "a")],
    });
    app.forum.open_compose();
    app.handle_link("group-forum/close");

    assert!(!app.forum.visible);
    assert_eq!(app.forum.active_group_id, None);
    assert!(app.forum.threads.is_empty());
    assert!(app.forum.group_info.is_none());
    assert!(!app.forum.show_compose);
    assert_eq!(app.forum.phase(), PanelPhase::Closed);
    assert_eq!(gateway.sent().len(), 2);
}

#[test]
fn late_metadata_after_close_is_discarded() {
    let (mut app, _) = new_app();
    app.handle_link("group-forum/open/5");
    app.handle_link("group-forum/close");
    app.handle_server_message(group_info(5));
    assert!(app.forum.group_info.is_none());
    assert!(app.view().is_none());
}

#[test]
fn metadata_from_superseded_group_is_discarded() {
    let (mut app, _) = new_app();
    app.handle_link("group-forum/open/5");
    app.handle_link("group-forum/open/6");
    app.handle_server_message(group_info(5));
    assert!(app.forum.group_info.is_none());
    app.handle_server_message(group_info(6));
    assert_eq!(app.view().map(|v| v.group.title.clone()), Some("Builders".to_string()));
}

#[test]
fn snapshot_round_trip_keeps_fields() {
    let (mut app, _) = new_app();
    app.handle_link("group-forum/open/5");
    app.handle_server_message(IncomingMessage::ThreadPageArrived {
        group_id: Some(GroupId(5)),
        threads: vec![record(77, "Rules")],
    });

    let thread = &app.forum.threads[0];
    assert_eq!(app.forum.threads.len(), 1);
    assert_eq!(thread.id, 77);
    assert_eq!(thread.subject, "Rules");
    assert_eq!(thread.posts_count, 4);
    assert!(thread.pinned);
    assert!(!thread.locked);
    assert_eq!(thread.updated_at(), "6/16/2025, 8:30:00 PM");
    assert!(!app.forum.loading);
}

#[test]
fn new_thread_before_snapshot_then_snapshot_replaces() {
    let (mut app, _) = new_app();
    app.handle_link("group-forum/open/7");
    app.handle_server_message(IncomingMessage::ThreadPosted(record(9, "Early")));
    assert_eq!(app.forum.threads.len(), 1);
    assert!(!app.forum.loading);

    app.handle_server_message(IncomingMessage::ThreadPageArrived {
        group_id: Some(GroupId(7)),
        threads: vec![record(1, "One"), record(2, "Two")],
    });
    let ids: Vec<i32> = app.forum.threads.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn ignored_links_change_nothing() {
    let (mut app, gateway) = new_app();
    for path in ["group-forum/open/xyz", "group-forum/open", "group-forum/explode", "catalog/open/1"] {
        app.handle_link(path);
    }
    assert_eq!(app.forum, group_forum_client::PanelState::default());
    assert!(gateway.sent().is_empty());
}

#[test]
fn settings_twice_stays_open() {
    let (mut app, gateway) = new_app();
    app.handle_link("group-forum/settings");
    app.handle_link("group-forum/settings");
    assert!(app.forum.show_settings);
    assert!(gateway.sent().is_empty());
}

#[test]
fn compose_submission_posts_thread() {
    let (mut app, gateway) = new_app();
    app.handle_link("group-forum/open/3");
    app.forum.open_compose();
    app.submit_compose("Welcome", "Say hi");

    assert!(!app.forum.show_compose);
    assert_eq!(
        gateway.sent().last(),
        Some(&OutgoingMessage::PostThread {
            group_id: GroupId(3),
            category_id: 0,
            subject: "Welcome".to_string(),
            body: "Say hi".to_string(),
        })
    );
}

#[test]
fn custom_page_size_is_used_for_first_page() {
    let gateway = RecordingGateway::default();
    let prefs = ForumPrefs { page_size: 20, ..ForumPrefs::default() };
    let mut app = App::new(gateway.clone(), prefs);
    app.handle_link("group-forum/open/8");
    assert!(gateway
        .sent()
        .contains(&OutgoingMessage::RequestThreadPage { group_id: GroupId(8), offset: 0, count: 20 }));
}

#[test]
fn gateway_failure_does_not_break_state() {
    let mut app = App::new(FailingGateway, ForumPrefs::default());
    app.handle_link("group-forum/open/5");
    assert_eq!(app.forum.phase(), PanelPhase::Opening);
    app.handle_link("group-forum/close");
    assert_eq!(app.forum.phase(), PanelPhase::Closed);
}

#[test]
fn links_flow_through_the_bus() {
    let bus = LinkEventBus::new();
    let (mut app, gateway) = new_app();
    app.mount(&bus);

    assert_eq!(bus.dispatch("group-forum/open/11"), 1);
    assert_eq!(bus.dispatch("catalog/open/2"), 0);
    assert_eq!(app.drain_links(), 1);
    assert_eq!(app.forum.active_group_id, Some(GroupId(11)));
    assert_eq!(gateway.sent().len(), 2);
}

#[test]
fn remount_does_not_duplicate_listeners() {
    let bus = LinkEventBus::new();
    let (mut app, gateway) = new_app();
    app.mount(&bus);
    app.mount(&bus);
    assert_eq!(bus.listener_count(), 1);

    bus.dispatch("group-forum/open/2");
    app.drain_links();
    assert_eq!(gateway.sent().len(), 2);

    app.unmount();
    assert!(!app.is_mounted());
    assert_eq!(bus.listener_count(), 0);
}

#[test]
fn dropping_app_releases_listener() {
    let bus = LinkEventBus::new();
    {
        let (mut app, _) = new_app();
        app.mount(&bus);
        assert_eq!(bus.listener_count(), 1);
    }
    assert_eq!(bus.listener_count(), 0);
}
