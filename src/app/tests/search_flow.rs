use std::time::Instant;

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::Focus;
use crate::engine::{PREFERRED_ENGINE_KEY, PreferenceStore};
use crate::feeds::WallpaperRotation;
use crate::links::all_links;
use crate::suggest::SuggestEvent;
use crate::widget::SearchBoxLayout;

use super::{
    FailingStore, SharedStore, ctrl, harness, harness_with_store, key, ms, next_suggestions,
    type_text,
};

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[tokio::test(start_paused = true)]
async fn text_cleared_before_quiet_period_issues_no_request() {
    let mut h = harness();
    let t0 = Instant::now();

    type_text(&mut h.app, "ab", t0);
    h.app
        .handle_key_event(ctrl('u'), t0 + ms(100))
        .expect("clear should pass");

    assert!(!h.app.poll_timers(t0 + ms(1_000)));
    assert_eq!(h.app.next_deadline(), None);
    assert!(h.transport.calls().is_empty());
    assert!(h.app.search.search_box.value().is_empty());
}

#[tokio::test(start_paused = true)]
async fn rapid_keystrokes_coalesce_into_one_request() {
    let mut h = harness();
    let t0 = Instant::now();

    for (offset, ch) in ["r", "u", "s", "t"].into_iter().enumerate() {
        type_text(&mut h.app, ch, t0 + ms(100 * offset as u64));
    }
    assert!(!h.app.poll_timers(t0 + ms(400)));
    assert!(h.transport.calls().is_empty());

    assert!(h.app.poll_timers(t0 + ms(550)));
    assert_eq!(
        h.transport.calls(),
        vec![("bing".to_string(), "rust".to_string())]
    );

    let event = next_suggestions(&mut h.app).await;
    assert!(h.app.apply_suggest_event(event));
    let search_box = &h.app.search.search_box;
    assert!(search_box.suggestions_visible());
    assert_eq!(search_box.suggestions(), ["rust 1", "rust 2"]);
}

#[tokio::test(start_paused = true)]
async fn only_the_latest_issued_request_lands() {
    let mut h = harness();
    let t0 = Instant::now();

    type_text(&mut h.app, "slow", t0);
    assert!(h.app.poll_timers(t0 + ms(250)));
    let first_seq = h.app.search.debounce.current().expect("first request issued");

    type_text(&mut h.app, "er", t0 + ms(300));
    assert!(h.app.poll_timers(t0 + ms(550)));
    assert_ne!(h.app.search.debounce.current(), Some(first_seq));

    let stale = SuggestEvent {
        seq: first_seq,
        query: "slow".to_string(),
        suggestions: vec!["slow 1".to_string()],
    };
    assert!(!h.app.apply_suggest_event(stale));
    assert!(h.app.search.search_box.suggestions().is_empty());

    let event = next_suggestions(&mut h.app).await;
    assert_eq!(event.query, "slower");
    assert!(h.app.apply_suggest_event(event));
    assert_eq!(h.app.search.search_box.suggestions(), ["slower 1", "slower 2"]);
    assert_eq!(h.transport.queries(), ["slow", "slower"]);
}

#[tokio::test(start_paused = true)]
async fn enter_navigates_with_current_engine_and_resets_query() {
    let mut h = harness();
    let t0 = Instant::now();

    type_text(&mut h.app, "rust ownership", t0);
    h.app
        .handle_key_event(key(KeyCode::Enter), t0 + ms(10))
        .expect("submit should pass");

    assert_eq!(
        h.navigator.opened(),
        ["https://cn.bing.com/search?q=rust%20ownership"]
    );
    assert!(h.app.search.search_box.value().is_empty());
    assert!(!h.app.poll_timers(t0 + ms(1_000)));
    assert!(h.transport.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn enter_on_blank_text_does_nothing() {
    let mut h = harness();
    type_text(&mut h.app, "   ", Instant::now());
    h.app
        .handle_key_event(key(KeyCode::Enter), Instant::now())
        .expect("submit should pass");
    assert!(h.navigator.opened().is_empty());
}

#[tokio::test(start_paused = true)]
async fn highlighted_suggestion_is_submitted_instead_of_text() {
    let mut h = harness();
    let t0 = Instant::now();

    type_text(&mut h.app, "ru", t0);
    assert!(h.app.poll_timers(t0 + ms(250)));
    let event = next_suggestions(&mut h.app).await;
    h.app.apply_suggest_event(event);

    h.app
        .handle_key_event(key(KeyCode::Up), t0 + ms(300))
        .expect("highlight should pass");
    assert_eq!(h.app.search.search_box.highlight(), Some(1));
    h.app
        .handle_key_event(key(KeyCode::Enter), t0 + ms(310))
        .expect("submit should pass");

    assert_eq!(h.navigator.opened(), ["https://cn.bing.com/search?q=ru%202"]);
}

#[tokio::test(start_paused = true)]
async fn engine_chosen_from_dropdown_persists_across_sessions() {
    let store = SharedStore::default();
    let mut h = harness_with_store(Box::new(store.clone()));
    let now = Instant::now();

    for code in [KeyCode::Tab, KeyCode::Down, KeyCode::Enter] {
        h.app.handle_key_event(key(code), now).expect("key should pass");
    }

    assert!(!h.app.search.search_box.is_dropdown_open());
    assert_eq!(h.app.search.engines.preferred().id, "google");
    assert_eq!(store.get(PREFERRED_ENGINE_KEY).as_deref(), Some("google"));
    assert_eq!(h.app.state.status.message, "search engine: Google");

    let restored = harness_with_store(Box::new(store));
    assert_eq!(restored.app.search.engines.preferred().id, "google");
}

#[tokio::test(start_paused = true)]
async fn engine_switch_survives_failing_storage() {
    let mut h = harness_with_store(Box::new(FailingStore));
    let now = Instant::now();

    for code in [KeyCode::Tab, KeyCode::Down, KeyCode::Down, KeyCode::Enter] {
        h.app.handle_key_event(key(code), now).expect("key should pass");
    }

    assert_eq!(h.app.search.engines.preferred().id, "baidu");
    type_text(&mut h.app, "天气", now);
    h.app
        .handle_key_event(key(KeyCode::Enter), now)
        .expect("submit should pass");
    assert_eq!(
        h.navigator.opened(),
        ["https://www.baidu.com/s?wd=%E5%A4%A9%E6%B0%94"]
    );
}

#[tokio::test(start_paused = true)]
async fn outside_click_closes_dropdown_and_keeps_text() {
    let mut h = harness();
    let now = Instant::now();

    type_text(&mut h.app, "ab", now);
    h.app
        .handle_key_event(key(KeyCode::Tab), now)
        .expect("toggle should pass");
    assert!(h.app.search.search_box.is_dropdown_open());
    h.app.state.search_layout = SearchBoxLayout::compute(Rect::new(0, 0, 72, 10), 4, 0);

    assert!(
        h.app
            .handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, 20), now)
    );

    let search_box = &h.app.search.search_box;
    assert!(!search_box.is_dropdown_open());
    assert_eq!(search_box.value(), "ab");
}

#[tokio::test(start_paused = true)]
async fn clicking_an_engine_row_selects_it() {
    let mut h = harness();
    let now = Instant::now();

    h.app
        .handle_key_event(key(KeyCode::Tab), now)
        .expect("toggle should pass");
    let layout = SearchBoxLayout::compute(Rect::new(0, 0, 72, 10), 4, 0);
    let row = layout.engine_rows[3];
    h.app.state.search_layout = layout;

    h.app
        .handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), row.x + 1, row.y), now);

    assert_eq!(h.app.search.engines.preferred().id, "yandex");
    assert!(!h.app.search.search_box.is_dropdown_open());
}

#[tokio::test(start_paused = true)]
async fn hover_highlights_and_press_navigates_to_suggestion() {
    let mut h = harness();
    let t0 = Instant::now();

    type_text(&mut h.app, "ru", t0);
    h.app.poll_timers(t0 + ms(250));
    let event = next_suggestions(&mut h.app).await;
    h.app.apply_suggest_event(event);

    let layout = SearchBoxLayout::compute(Rect::new(0, 0, 72, 10), 0, 2);
    let first = layout.suggestion_rows[0];
    let second = layout.suggestion_rows[1];
    h.app.state.search_layout = layout;

    assert!(
        h.app
            .handle_mouse_event(mouse(MouseEventKind::Moved, second.x + 4, second.y), t0)
    );
    assert_eq!(h.app.search.search_box.highlight(), Some(1));

    // A pending blur must not swallow the press.
    h.app.handle_focus_lost(t0 + ms(300));
    h.app.handle_mouse_event(
        mouse(MouseEventKind::Down(MouseButton::Left), first.x + 4, first.y),
        t0 + ms(310),
    );

    assert_eq!(h.navigator.opened(), ["https://cn.bing.com/search?q=ru%201"]);
    assert!(h.app.search.search_box.value().is_empty());
    assert_eq!(h.app.search.search_box.blur_deadline(), None);
}

#[tokio::test(start_paused = true)]
async fn blur_hides_suggestions_after_grace_period() {
    let mut h = harness();
    let t0 = Instant::now();

    type_text(&mut h.app, "ru", t0);
    h.app.poll_timers(t0 + ms(250));
    let event = next_suggestions(&mut h.app).await;
    h.app.apply_suggest_event(event);

    h.app.handle_focus_lost(t0 + ms(300));
    assert!(!h.app.poll_timers(t0 + ms(450)));
    assert!(h.app.search.search_box.suggestions_visible());

    assert!(h.app.poll_timers(t0 + ms(500)));
    let search_box = &h.app.search.search_box;
    assert!(!search_box.is_focused());
    assert!(!search_box.suggestions_visible());
    assert_eq!(search_box.value(), "ru");
}

#[tokio::test(start_paused = true)]
async fn session_override_does_not_touch_stored_preference() {
    let store = SharedStore::default();
    let mut h = harness_with_store(Box::new(store.clone()));

    let err = h
        .app
        .override_engine("altavista")
        .expect_err("unknown engine should fail");
    assert!(err.to_string().contains("bing"));

    h.app.override_engine("baidu").expect("known engine");
    assert_eq!(h.app.search.engines.preferred().id, "baidu");
    assert_eq!(store.get(PREFERRED_ENGINE_KEY), None);
}

#[tokio::test(start_paused = true)]
async fn links_focus_opens_decoded_email() {
    let mut h = harness();
    let now = Instant::now();

    h.app
        .handle_key_event(ctrl('l'), now)
        .expect("focus links should pass");
    assert_eq!(h.app.state.focus, Focus::Links);

    let email = all_links()
        .iter()
        .position(|entry| entry.label() == "email")
        .expect("email link exists");
    for _ in 0..email {
        h.app
            .handle_key_event(key(KeyCode::Char('j')), now)
            .expect("move should pass");
    }
    h.app
        .handle_key_event(key(KeyCode::Enter), now)
        .expect("open should pass");

    assert_eq!(h.navigator.opened(), ["mailto:wgdecade43@mail.ustc.edu.cn"]);
    assert!(h.app.search.search_box.value().is_empty());

    h.app
        .handle_key_event(key(KeyCode::Char('/')), now)
        .expect("focus search should pass");
    assert_eq!(h.app.state.focus, Focus::Search);
    assert!(h.app.search.search_box.is_focused());
}

#[tokio::test(start_paused = true)]
async fn wallpaper_rotation_wraps_and_reports_status() {
    let mut h = harness();
    let now = Instant::now();
    h.app.state.wallpapers = WallpaperRotation::new(
        "https://www.cn.bing.com",
        vec!["/th?id=a.jpg".to_string(), "/th?id=b.jpg".to_string()],
    );

    h.app.handle_key_event(ctrl('l'), now).expect("focus links");
    h.app
        .handle_key_event(key(KeyCode::Char('w')), now)
        .expect("next wallpaper");
    assert_eq!(
        h.app.state.status.message,
        "wallpaper 2/2: https://www.cn.bing.com/th?id=b.jpg"
    );
    h.app
        .handle_key_event(key(KeyCode::Char('w')), now)
        .expect("next wallpaper");
    assert_eq!(
        h.app.state.status.message,
        "wallpaper 1/2: https://www.cn.bing.com/th?id=a.jpg"
    );

    h.app
        .handle_key_event(key(KeyCode::Char('o')), now)
        .expect("open wallpaper");
    assert_eq!(h.navigator.opened(), ["https://www.cn.bing.com/th?id=a.jpg"]);
}

#[tokio::test(start_paused = true)]
async fn quit_keys_request_exit() {
    let mut h = harness();
    let outcome = h
        .app
        .handle_key_event(ctrl('c'), Instant::now())
        .expect("quit should pass");
    assert!(outcome.quit_requested);
}
