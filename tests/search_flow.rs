//! End-to-end search flows driven through `handle_event`, the way the plugin
//! shim drives them: every fetch action's context map is round-tripped as the
//! host would before the completion is handled.

use bookfinder::openlibrary::{SearchRequest, BOOTSTRAP_QUERY, DEFAULT_QUERY, PAGE_SIZE};
use bookfinder::{handle_event, initialize, Action, AppState, Config, Event, LanguageFilter};

fn new_state() -> AppState {
    initialize(&Config::default())
}

/// Runs `event` and returns the single request it fetched, decoded from its
/// context map.
fn issue(state: &mut AppState, event: &Event) -> SearchRequest {
    let (_, actions) = handle_event(state, event).unwrap();
    match actions.as_slice() {
        [Action::FetchPage(request)] => SearchRequest::from_context(&request.to_context()).unwrap(),
        other => panic!("expected a single fetch, got {other:?}"),
    }
}

fn page_body(prefix: &str, count: usize) -> Vec<u8> {
    let docs: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            let author = if i % 2 == 0 { "Niklaus Wirth" } else { "Donald Knuth" };
            let language = if i % 5 == 0 { "ger" } else { "eng" };
            serde_json::json!({
                "key": format!("/works/{prefix}{i}W"),
                "title": format!("{prefix} volume {i}"),
                "author_name": [author],
                "first_publish_year": 1970 + i,
                "language": [language],
                "cover_i": 1000 + i,
            })
        })
        .collect();
    serde_json::json!({ "numFound": 1000, "docs": docs })
        .to_string()
        .into_bytes()
}

fn complete(state: &mut AppState, request: SearchRequest, status: u16, body: Vec<u8>) -> bool {
    let (render, actions) = handle_event(
        state,
        &Event::SearchCompleted {
            request,
            status,
            body,
        },
    )
    .unwrap();
    assert!(actions.is_empty());
    render
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
}

#[test]
fn full_first_page_offers_load_more_for_the_next_page() {
    let mut state = new_state();
    type_text(&mut state, "Data Structures");

    let first = issue(&mut state, &Event::Submit);
    assert_eq!(first.query, "Data Structures");
    assert!(first.url().contains("title=Data%20Structures&limit=50&page=1"));
    complete(&mut state, first, 200, page_body("a", PAGE_SIZE));

    assert!(state.has_more_pages);
    assert_eq!(state.current_page, 1);
    assert!(state.compute_viewmodel(40, 120).footer.load_more);

    let second = issue(&mut state, &Event::LoadMore);
    assert_eq!(second.page, 2);
    assert!(second.append);
    assert_eq!(second.query, "Data Structures");

    complete(&mut state, second, 200, page_body("b", 7));
    assert_eq!(state.results.len(), PAGE_SIZE + 7);
    assert_eq!(state.results[PAGE_SIZE].id, "/works/b0W");
    assert_eq!(state.current_page, 2);
    assert!(!state.has_more_pages);
}

#[test]
fn mount_runs_the_bootstrap_query_and_empty_submit_uses_default() {
    let mut state = new_state();

    let bootstrap = issue(&mut state, &Event::Mounted);
    assert_eq!(bootstrap.query, BOOTSTRAP_QUERY);

    type_text(&mut state, "   ");
    let submitted = issue(&mut state, &Event::Submit);
    assert_eq!(submitted.query, DEFAULT_QUERY);
}

#[test]
fn failed_fetch_keeps_results_and_reports() {
    let mut state = new_state();
    let first = issue(&mut state, &Event::Mounted);
    complete(&mut state, first, 200, page_body("a", 12));

    let retry = issue(&mut state, &Event::Submit);
    assert!(state.is_loading);
    assert!(complete(&mut state, retry, 503, Vec::new()));

    assert_eq!(state.results.len(), 12);
    assert!(!state.is_loading);
    assert_eq!(
        state.error_message.as_deref(),
        Some("Failed to fetch from Open Library API")
    );

    let next = issue(&mut state, &Event::Submit);
    assert!(state.error_message.is_none());
    complete(&mut state, next, 200, page_body("c", 3));
    assert!(state.error_message.is_none());
}

#[test]
fn only_the_latest_search_is_applied() {
    let mut state = new_state();
    let stale = issue(&mut state, &Event::Mounted);

    type_text(&mut state, "compilers");
    let latest = issue(&mut state, &Event::Submit);

    complete(&mut state, latest, 200, page_body("fresh", 4));
    assert!(!complete(&mut state, stale, 200, page_body("stale", PAGE_SIZE)));

    assert_eq!(state.results.len(), 4);
    assert!(state.results.iter().all(|b| b.id.starts_with("/works/fresh")));
    assert!(!state.has_more_pages);
}

#[test]
fn load_more_refused_while_loading() {
    let mut state = new_state();
    let first = issue(&mut state, &Event::Mounted);
    complete(&mut state, first, 200, page_body("a", PAGE_SIZE));

    let _in_flight = issue(&mut state, &Event::Submit);
    let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();

    assert!(!render);
    assert!(actions.is_empty());
}

#[test]
fn filters_narrow_loaded_results_without_fetching() {
    let mut state = new_state();
    let first = issue(&mut state, &Event::Mounted);
    complete(&mut state, first, 200, page_body("a", 10));

    handle_event(&mut state, &Event::FocusNext).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Char('K')).unwrap();
    assert!(actions.is_empty());
    type_text(&mut state, "NUTH");
    assert_eq!(state.filtered_books().len(), 5);

    handle_event(&mut state, &Event::FocusNext).unwrap();
    handle_event(&mut state, &Event::CycleLanguagePrevious).unwrap();
    assert_eq!(state.filter.language, LanguageFilter::Ger);
    // Only index 5 is both German and by Knuth.
    let filtered = state.filtered_books();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "/works/a5W");

    handle_event(&mut state, &Event::FocusNext).unwrap();
    type_text(&mut state, "1999");
    assert!(state.filtered_books().is_empty());

    let vm = state.compute_viewmodel(30, 100);
    assert_eq!(
        vm.empty_state.map(|e| e.message).as_deref(),
        Some("No books match the filters")
    );
    assert_eq!(state.results.len(), 10);
}

#[test]
fn clear_reloads_defaults_but_keeps_filters() {
    let mut state = new_state();
    handle_event(&mut state, &Event::FocusNext).unwrap();
    type_text(&mut state, "wirth");

    let request = issue(&mut state, &Event::Clear);
    assert_eq!(request.query, BOOTSTRAP_QUERY);
    assert!(!request.append);
    assert_eq!(state.filter.author, "wirth");
}

#[test]
fn selection_shows_cover_of_selected_book() {
    let mut state = new_state();
    let first = issue(&mut state, &Event::Mounted);
    complete(&mut state, first, 200, page_body("a", 3));

    handle_event(&mut state, &Event::SelectionDown).unwrap();
    let detail = state.compute_viewmodel(30, 100).detail.unwrap();

    assert_eq!(detail.id, "/works/a1W");
    assert_eq!(detail.cover_url, "https://covers.openlibrary.org/b/id/1001-M.jpg");
}

#[test]
fn missing_fields_are_normalized() {
    let mut state = new_state();
    let first = issue(&mut state, &Event::Mounted);
    let body = br#"{"docs":[{"title":"Anonymous Notes","first_publish_year":0,"cover_i":0}]}"#;
    complete(&mut state, first, 200, body.to_vec());

    let book = &state.results[0];
    assert_eq!(book.author_display, "Unknown Author");
    assert_eq!(book.language_display, "N/A");
    assert_eq!(book.first_publish_year.to_string(), "N/A");

    let detail = state.compute_viewmodel(30, 100).detail.unwrap();
    assert_eq!(
        detail.cover_url,
        "https://via.placeholder.com/180x260?text=No+Cover+Available"
    );
}
