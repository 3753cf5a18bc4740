use std::sync::Arc;

use catalog::{Catalog, EventId};
use foundation::time::{CalendarDate, DateBounds};
use pretty_assertions::assert_eq;
use session::{ExplorerConfig, ExplorerSession, Intent, Outcome, Phase, Viewport};
use viewpoint::{GlobeCamera, PointOfView, RecordingViewpoint, ViewpointController};

const VERSAILLES: &str = r#"[
    {"lat": 48.8566, "lng": 2.3522, "title": "Paris Peace Conference opens",
     "image": "/images/a.jpg", "date": "1919-01-18"},
    {"lat": 48.8049, "lng": 2.1204, "title": "Treaty of Versailles signed",
     "image": "/images/b.jpg", "date": "1919-06-28"}
]"#;

const A: EventId = EventId(0);
const B: EventId = EventId(1);

fn d(s: &str) -> CalendarDate {
    CalendarDate::parse(s).expect("date")
}

fn session_at(initial: &str) -> ExplorerSession<RecordingViewpoint> {
    let catalog = Catalog::from_json_str(VERSAILLES, &DateBounds::default()).expect("catalog");
    let config = ExplorerConfig {
        initial_date: d(initial),
        ..ExplorerConfig::default()
    };
    ExplorerSession::new(Arc::new(catalog), config).expect("session")
}

fn desktop() -> Viewport {
    Viewport {
        width: 1440,
        height: 900,
    }
}

#[test]
fn previous_from_treaty_lands_on_conference() {
    let mut s = session_at("1939-09-01");
    s.apply(Intent::DatePicked { date: d("1919-06-28") });
    assert_eq!(s.view().matching_events, vec![B]);

    assert_eq!(s.apply(Intent::PreviousIncident), Outcome::Changed);
    let view = s.view();
    assert_eq!(view.selected_date, d("1919-01-18"));
    assert_eq!(view.matching_events, vec![A]);
    assert!(!view.has_previous);
    assert!(view.has_next);
}

#[test]
fn previous_from_empty_date_finds_nearest_earlier() {
    let mut s = session_at("1920-01-01");
    assert!(s.view().matching_events.is_empty());
    assert_eq!(s.view().phase, Phase::DateActive);

    s.apply(Intent::PreviousIncident);
    assert_eq!(s.view().selected_date, d("1919-06-28"));
    assert_eq!(s.view().matching_events, vec![B]);
}

#[test]
fn previous_at_earliest_date_is_a_no_op() {
    let mut s = session_at("1919-01-18");
    s.apply(Intent::MarkerClicked { event: A });
    let before = s.view();

    assert_eq!(s.apply(Intent::PreviousIncident), Outcome::Unchanged);
    assert_eq!(s.view(), before);
    assert_eq!(s.view().selected_event, Some(A));
}

#[test]
fn next_then_previous_round_trips() {
    let catalog = Catalog::from_json_str(
        r#"[
            {"lat": 0, "lng": 0, "title": "a", "date": "1919-01-18"},
            {"lat": 0, "lng": 0, "title": "b", "date": "1919-06-28"},
            {"lat": 0, "lng": 0, "title": "c", "date": "1939-09-01"}
        ]"#,
        &DateBounds::default(),
    )
    .expect("catalog");
    let config = ExplorerConfig {
        initial_date: d("1919-06-28"),
        ..ExplorerConfig::default()
    };
    let mut s: ExplorerSession<RecordingViewpoint> =
        ExplorerSession::new(Arc::new(catalog), config).expect("session");

    s.apply(Intent::PreviousIncident);
    s.apply(Intent::NextIncident);
    assert_eq!(s.view().selected_date, d("1919-06-28"));
    s.apply(Intent::NextIncident);
    s.apply(Intent::PreviousIncident);
    assert_eq!(s.view().selected_date, d("1919-06-28"));
}

#[test]
fn marker_click_focuses_without_moving_date() {
    let mut s = session_at("1919-06-28");
    s.mount(desktop(), RecordingViewpoint::new());

    // A marker from another day is still addressable.
    assert_eq!(s.apply(Intent::MarkerClicked { event: A }), Outcome::Changed);
    let view = s.view();
    assert_eq!(view.selected_event, Some(A));
    assert_eq!(view.selected_date, d("1919-06-28"));
    assert_eq!(view.phase, Phase::EventFocused);

    let last = *s.viewpoint().controller().expect("mounted").last().expect("cmd");
    assert_eq!(
        last,
        PointOfView {
            lat: 48.8566,
            lng: 2.3522,
            altitude: 0.8,
            duration_ms: 1000,
        }
    );
}

#[test]
fn picking_a_date_clears_the_event() {
    let mut s = session_at("1919-06-28");
    s.apply(Intent::MarkerClicked { event: B });
    s.apply(Intent::DatePicked { date: d("1919-06-28") });
    assert_eq!(s.view().selected_event, None);

    s.apply(Intent::MarkerClicked { event: B });
    s.apply(Intent::NextIncident); // no later date: no-op keeps focus
    assert_eq!(s.view().selected_event, Some(B));
    s.apply(Intent::PreviousIncident);
    assert_eq!(s.view().selected_event, None);
}

#[test]
fn close_and_escape_keep_the_date() {
    let mut s = session_at("1919-06-28");
    s.apply(Intent::MarkerClicked { event: B });
    assert_eq!(s.apply(Intent::CloseCard), Outcome::Changed);
    assert_eq!(s.view().phase, Phase::DateActive);
    assert_eq!(s.apply(Intent::CloseCard), Outcome::Unchanged);

    s.apply(Intent::TogglePanel);
    s.apply(Intent::MarkerClicked { event: B });
    assert!(s.view().panel_open);
    assert_eq!(s.apply(Intent::Escape), Outcome::Changed);
    let view = s.view();
    assert!(!view.panel_open);
    assert_eq!(view.selected_event, None);
    assert_eq!(view.selected_date, d("1919-06-28"));
    assert_eq!(view.matching_events, vec![B]);
}

#[test]
fn empty_catalog_disables_navigation() {
    let mut s: ExplorerSession<RecordingViewpoint> =
        ExplorerSession::new(Arc::new(Catalog::empty()), ExplorerConfig::default())
            .expect("session");
    let view = s.view();
    assert!(view.matching_events.is_empty());
    assert!(!view.has_previous && !view.has_next);
    assert_eq!(s.apply(Intent::PreviousIncident), Outcome::Unchanged);
    assert_eq!(s.apply(Intent::NextIncident), Outcome::Unchanged);
    assert!(s.date_index().is_empty());
}

#[test]
fn journal_records_every_intent_in_order() {
    let mut s = session_at("1920-01-01");
    s.apply(Intent::NextIncident);
    s.apply(Intent::PreviousIncident);
    s.apply(Intent::PreviousIncident);
    s.apply(Intent::PreviousIncident);

    let outcomes: Vec<(u64, Outcome, CalendarDate)> = s
        .journal()
        .entries()
        .iter()
        .map(|e| (e.seq, e.outcome, e.selected_date))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            (0, Outcome::Unchanged, d("1920-01-01")),
            (1, Outcome::Changed, d("1919-06-28")),
            (2, Outcome::Changed, d("1919-01-18")),
            (3, Outcome::Unchanged, d("1919-01-18")),
        ]
    );
}

#[test]
fn camera_commands_wait_for_an_unready_surface() {
    let mut s: ExplorerSession<GlobeCamera> = {
        let catalog = Catalog::from_json_str(VERSAILLES, &DateBounds::default()).expect("catalog");
        ExplorerSession::new(Arc::new(catalog), ExplorerConfig::default()).expect("session")
    };

    // Surface exists but has no size yet: nothing is delivered, nothing panics.
    s.mount(desktop(), GlobeCamera::new());
    s.apply(Intent::MarkerClicked { event: B });
    let camera = s.viewpoint().controller().expect("mounted");
    assert_eq!(camera.commands_received(), 0);
    assert!(!camera.is_ready());

    // Once sized, only the latest command is delivered.
    s.viewpoint_mut()
        .controller_mut()
        .expect("mounted")
        .set_canvas_size(1440.0, 900.0);
    assert!(s.flush_viewpoint());
    let camera = s.viewpoint().controller().expect("mounted");
    assert_eq!(camera.commands_received(), 1);
    assert_eq!(camera.destination().lat, 48.8049);
    assert_eq!(camera.destination().altitude, 0.8);
}

#[test]
fn clicks_before_mount_are_replayed_on_mount() {
    let mut s = session_at("1919-06-28");
    s.apply(Intent::MarkerClicked { event: B });
    assert!(s.viewpoint().pending().is_some());

    s.mount(desktop(), RecordingViewpoint::new());
    let last = *s.viewpoint().controller().expect("mounted").last().expect("cmd");
    assert_eq!((last.lat, last.lng, last.altitude), (48.8049, 2.1204, 0.8));
}

#[test]
fn date_transitions_stay_date_active_without_matches() {
    let mut s = session_at("1919-06-28");
    assert_eq!(s.view().phase, Phase::DateActive);

    s.apply(Intent::DatePicked { date: d("1920-01-01") });
    assert!(s.view().matching_events.is_empty());
    assert_eq!(s.view().phase, Phase::DateActive);

    s.apply(Intent::MarkerClicked { event: A });
    assert_eq!(s.view().phase, Phase::EventFocused);
    s.apply(Intent::NextIncident);
    assert_eq!(s.view().selected_date, d("1920-01-01"));
    assert_eq!(s.view().phase, Phase::EventFocused);
    s.apply(Intent::CloseCard);
    assert_eq!(s.view().phase, Phase::DateActive);
}

#[test]
fn navigation_never_leaves_configured_bounds() {
    let json = r#"[
        {"lat": 48.8049, "lng": 2.1204, "title": "Treaty of Versailles signed",
         "image": "/images/b.jpg", "date": "1919-06-28"},
        {"lat": 52.2297, "lng": 21.0122, "title": "Germany invades Poland",
         "image": "/images/c.jpg", "date": "1939-09-01"}
    ]"#;
    let wide = Catalog::from_json_str(json, &DateBounds::default()).expect("catalog");
    let narrow = DateBounds::new(d("1900-01-01"), d("1920-12-31"));
    let config = ExplorerConfig {
        initial_date: d("1919-06-28"),
        date_bounds: narrow,
        ..ExplorerConfig::default()
    };
    let mut s: ExplorerSession<RecordingViewpoint> =
        ExplorerSession::new(Arc::new(wide.clone()), config).expect("session");

    assert_eq!(s.catalog().bounds(), &narrow);
    assert!(!s.view().has_next);
    assert_eq!(s.apply(Intent::NextIncident), Outcome::Unchanged);
    assert_eq!(s.view().selected_date, d("1919-06-28"));

    s.apply(Intent::DatePicked { date: d("1939-09-01") });
    assert_eq!(s.view().selected_date, d("1920-12-31"));
    assert!(s.view().matching_events.is_empty());
    assert_eq!(s.apply(Intent::NextIncident), Outcome::Unchanged);
    assert_eq!(s.apply(Intent::PreviousIncident), Outcome::Changed);
    assert_eq!(s.view().selected_date, d("1919-06-28"));

    // Swapping in the same records loaded under the wide range is
    // re-resolved too, and hits the memoized index.
    s.replace_catalog(Arc::new(wide));
    assert_eq!(s.index_builds(), 1);
    assert!(!s.view().has_next);
}
