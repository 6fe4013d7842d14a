//! End-to-end player flow: composition, deep links, history
//! synchronization, and mode switching, with a recording history
//! backend standing in for the browser.

use std::sync::Arc;

use parking_lot::Mutex;
use slipdeck_player::{
    ChapterLevel, Deck, HistoryBackend, Player, PlayerConfig, Slide,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum HistoryOp {
    Replace { state: String, url: String },
    Push { state: String, url: String },
}

#[derive(Default)]
struct RecordingHistory {
    ops: Mutex<Vec<HistoryOp>>,
}

impl RecordingHistory {
    fn ops(&self) -> Vec<HistoryOp> {
        self.ops.lock().clone()
    }
}

impl HistoryBackend for RecordingHistory {
    fn replace_state(&self, state: &str, url: &str) {
        self.ops.lock().push(HistoryOp::Replace {
            state: state.to_string(),
            url: url.to_string(),
        });
    }

    fn push_state(&self, state: &str, url: &str) {
        self.ops.lock().push(HistoryOp::Push {
            state: state.to_string(),
            url: url.to_string(),
        });
    }
}

fn sample_deck() -> Arc<Deck> {
    Arc::new(Deck::new(
        "Systems Programming",
        vec![
            Slide::new("Welcome").with_chapter(ChapterLevel::FrontMatter),
            Slide::new("Memory").with_chapter(ChapterLevel::Heading(1)),
            Slide::new("The Stack").with_id("stack"),
            Slide::new("The Heap").with_id("heap"),
            Slide::new("Concurrency").with_chapter(ChapterLevel::Heading(1)),
            Slide::new("Threads").with_chapter(ChapterLevel::Heading(2)),
            Slide::new("Channels"),
        ],
    ))
}

fn player_with_history() -> (Player, Arc<RecordingHistory>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let history = Arc::new(RecordingHistory::default());
    let player = Player::new(PlayerConfig::default(), history.clone());
    player.register_ui_mode("overview");
    player.register_ui_mode("slideshow");
    player.register_ui_mode("print");
    (player, history)
}

#[test]
fn first_assignment_replaces_then_pushes() {
    let (player, history) = player_with_history();
    player.start(sample_deck(), None).unwrap();

    // Front matter has no id, so the fragment carries its number.
    assert_eq!(
        history.ops(),
        vec![HistoryOp::Replace {
            state: r#"{"slideId":"0"}"#.to_string(),
            url: "#0".to_string(),
        }]
    );

    player.next_slide();
    player.goto_slide("stack");

    let ops = history.ops();
    assert_eq!(ops.len(), 3);
    assert_eq!(
        ops[1],
        HistoryOp::Push {
            state: r#"{"slideId":"1"}"#.to_string(),
            url: "#1".to_string(),
        }
    );
    // Slides with a stable id prefer it over the number.
    assert_eq!(
        ops[2],
        HistoryOp::Push {
            state: r#"{"slideId":"stack"}"#.to_string(),
            url: "#stack".to_string(),
        }
    );
}

#[test]
fn no_change_assignments_write_no_history() {
    let (player, history) = player_with_history();
    player.start(sample_deck(), None).unwrap();
    let before = history.ops().len();

    player.goto_slide("0");
    player.previous_slide();
    assert_eq!(history.ops().len(), before);
}

#[test]
fn history_driven_navigation_does_not_push_back() {
    let (player, history) = player_with_history();
    player.start(sample_deck(), None).unwrap();
    player.goto_slide("heap");
    let before = history.ops().len();

    // The browser popped an entry; the guard must suppress a new push.
    player.on_history_changed(Some(r#"{"slideId":"stack"}"#), None);

    assert_eq!(player.slide_number.get(), 3);
    assert_eq!(history.ops().len(), before);
    assert_eq!(player.ui_mode.get(), "slideshow");
}

#[test]
fn history_change_falls_back_to_fragment_then_first_slide() {
    let (player, _history) = player_with_history();
    player.start(sample_deck(), None).unwrap();

    player.on_history_changed(None, Some("2.1"));
    assert_eq!(player.slide_number.get(), 6);

    player.on_history_changed(None, None);
    assert_eq!(player.slide_number.get(), 1);
}

#[test]
fn deep_link_selects_the_initial_slide() {
    let (player, history) = player_with_history();
    player.start(sample_deck(), Some("2.1")).unwrap();

    assert_eq!(player.slide_number.get(), 6);
    // Still the load-time assignment: a replace, not a push.
    assert_eq!(
        history.ops(),
        vec![HistoryOp::Replace {
            state: r#"{"slideId":"2.1"}"#.to_string(),
            url: "#2.1".to_string(),
        }]
    );
}

#[test]
fn embedded_players_write_no_history() {
    let history = Arc::new(RecordingHistory::default());
    let config = PlayerConfig {
        embedded: true,
        ..PlayerConfig::default()
    };
    let player = Player::new(config, history.clone());
    player.register_ui_mode("overview");
    player.start(sample_deck(), None).unwrap();
    player.next_slide();

    assert!(history.ops().is_empty());
}

#[test]
fn duplicate_mode_registration_leaves_the_set_unchanged() {
    let (player, _history) = player_with_history();
    assert!(!player.register_ui_mode("overview"));
    // The mode still works.
    player.start(sample_deck(), None).unwrap();
    assert_eq!(player.ui_mode.get(), "overview");
}

#[test]
fn mode_switch_is_broadcast_to_all_subscribers() {
    let (player, _history) = player_with_history();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let seen_clone = seen.clone();
    player.ui_mode.bind(move |new, old| {
        seen_clone.lock().push((old.clone(), new.clone()));
    });

    player.start(sample_deck(), None).unwrap();
    player.ui_mode.set("print".to_string());

    assert_eq!(
        *seen.lock(),
        vec![
            (String::new(), "overview".to_string()),
            ("overview".to_string(), "print".to_string()),
        ]
    );
}

#[test]
fn rejected_assignments_fire_no_subscribers() {
    let (player, _history) = player_with_history();
    player.start(sample_deck(), None).unwrap();

    let fired = Arc::new(Mutex::new(0usize));
    let fired_clone = fired.clone();
    player.slide_number.bind(move |_, _| {
        *fired_clone.lock() += 1;
    });

    player.slide_number.set(0);
    player.slide_number.set(42);
    assert_eq!(*fired.lock(), 0);
    assert_eq!(player.slide_number.get(), 1);
}

#[test]
fn toc_reaches_plugins_through_the_player() {
    let (player, _history) = player_with_history();
    player.start(sample_deck(), None).unwrap();

    let numbers: Vec<String> = player
        .table_of_contents()
        .into_iter()
        .map(|entry| entry.number)
        .collect();
    assert_eq!(numbers, vec!["0", "1", "1.1", "1.2", "2", "2.1", "2.1.1"]);
}
