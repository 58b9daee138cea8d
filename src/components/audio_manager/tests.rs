use super::*;
use crate::config::parse_manifest;
use dioxus::core::VirtualDom;
use std::cell::Cell;

const MANIFEST: &str = r#"{
    "player": { "transition_delay_ms": 20 },
    "tracks": [
        { "id": 1, "title": "A", "url": "https://example.test/a.mp3" },
        { "id": 2, "title": "B", "url": "https://example.test/b.mp3" },
        { "id": 3, "title": "C", "url": "https://example.test/c.mp3" }
    ]
}"#;

thread_local! {
    static MOUNTED: Cell<Option<PlayerActions>> = const { Cell::new(None) };
}

fn harness() -> Element {
    let setup = parse_manifest(MANIFEST).unwrap();
    let actions = use_player(setup);
    MOUNTED.with(|slot| slot.set(Some(actions)));
    rsx! {}
}

fn mount() -> (VirtualDom, PlayerActions) {
    let mut dom = VirtualDom::new(harness);
    dom.rebuild_in_place();
    let actions = MOUNTED
        .with(|slot| slot.get())
        .expect("harness should have mounted the player");
    (dom, actions)
}

#[tokio::test]
async fn rapid_next_from_a_listener_swaps_once() {
    let (mut dom, actions) = mount();

    // Document listeners run with the runtime installed but no scope on the stack.
    let (first, second) = dom.in_runtime(|| {
        actions.next();
        let first = scheduled_ticket(&actions.timer);
        actions.next();
        (first, scheduled_ticket(&actions.timer))
    });
    assert!(first.is_some());
    assert_ne!(first, second);
    assert_eq!(
        second,
        dom.in_runtime(|| actions.controller.peek().pending_transition())
    );

    let _ = tokio::time::timeout(Duration::from_millis(250), dom.wait_for_work()).await;

    dom.in_runtime(|| {
        let snapshot = actions.controller.peek().snapshot();
        assert_eq!(snapshot.current_track_id, TrackId(3));
        assert!(!snapshot.is_transitioning);
        assert_eq!(snapshot.pending_track_id, None);
        assert_eq!(scheduled_ticket(&actions.timer), None);
    });
}

#[tokio::test]
async fn cancelled_transition_clears_the_timer() {
    let (mut dom, actions) = mount();

    dom.in_runtime(|| {
        actions.next();
        assert!(scheduled_ticket(&actions.timer).is_some());
        actions.previous();
        assert_eq!(scheduled_ticket(&actions.timer), None);
    });

    let _ = tokio::time::timeout(Duration::from_millis(100), dom.wait_for_work()).await;

    dom.in_runtime(|| {
        let snapshot = actions.controller.peek().snapshot();
        assert_eq!(snapshot.current_track_id, TrackId(1));
        assert!(!snapshot.is_transitioning);
    });
}
