//! Headless presentation shell: loading, rendering and script replay shared
//! by the `explorer` binary.

use std::fmt::Write as _;
use std::path::Path;

use catalog::builtin::builtin_catalog;
use catalog::{Catalog, CatalogError, Event, EventId};
use foundation::time::{CalendarDate, DateBounds};
use serde::Serialize;
use session::{
    ConfigError, ExplorerConfig, ExplorerSession, Intent, JournalEntry, SessionView,
};
use viewpoint::{PointOfView, RecordingViewpoint};

/// Builds the effective configuration: defaults, then the config file, then
/// the environment, then explicit overrides.
pub fn load_config(
    path: Option<&Path>,
    initial_date: Option<CalendarDate>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ExplorerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };
    config.apply_env(env)?;
    if let Some(date) = initial_date {
        config.initial_date = date;
    }
    config.validate()?;
    Ok(config)
}

pub fn load_catalog(path: Option<&Path>, bounds: &DateBounds) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => Catalog::load(path, bounds),
        None => builtin_catalog(bounds),
    }
}

pub fn render_event(id: EventId, event: &Event, fallback_accent: &str) -> String {
    let mut out = format!(
        "#{} {} [{}] ({:.4}, {:.4}) {}",
        id.0,
        event.date_text,
        event.accent_or(fallback_accent),
        event.location.lat,
        event.location.lng,
        event.title
    );
    for block in &event.narrative {
        let _ = write!(out, "\n    {block}");
    }
    if let Some(reference) = &event.reference {
        let label = reference.label.as_deref().unwrap_or("reference");
        if let Some(link) = &reference.link {
            let _ = write!(out, "\n    {label}: {link}");
        }
    }
    out
}

pub fn render_view(view: &SessionView, catalog: &Catalog) -> String {
    let mut out = format!(
        "{} [{}{}] {:?}{}",
        view.selected_date,
        if view.has_previous { "<" } else { "-" },
        if view.has_next { ">" } else { "-" },
        view.phase,
        if view.panel_open { " panel" } else { "" },
    );
    for id in &view.matching_events {
        let Some(event) = catalog.get(*id) else {
            continue;
        };
        let marker = if view.selected_event == Some(*id) { "*" } else { " " };
        let _ = write!(out, "\n  {marker} #{} {}", id.0, event.title);
    }
    if let Some(id) = view.selected_event
        && !view.matching_events.contains(&id)
        && let Some(event) = catalog.get(id)
    {
        let _ = write!(out, "\n  * #{} {} ({})", id.0, event.title, event.date_text);
    }
    out
}

/// Result of one replayed intent.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    #[serde(flatten)]
    pub entry: JournalEntry,
    pub view: SessionView,
    /// Camera commands issued while handling the intent.
    pub camera: Vec<PointOfView>,
}

/// Feeds `intents` through the session in order.
pub fn replay(
    session: &mut ExplorerSession<RecordingViewpoint>,
    intents: &[Intent],
) -> Vec<ReplayStep> {
    let mut steps = Vec::with_capacity(intents.len());
    for intent in intents {
        session.apply(*intent);
        let camera = session
            .viewpoint_mut()
            .controller_mut()
            .map(RecordingViewpoint::drain)
            .unwrap_or_default();
        let view = session.view();
        for entry in session.journal_mut().drain() {
            steps.push(ReplayStep {
                entry,
                view: view.clone(),
                camera: camera.clone(),
            });
        }
    }
    steps
}
