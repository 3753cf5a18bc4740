use std::sync::Arc;

use catalog::{Catalog, Event, EventId};
use foundation::geo::GeoPoint;
use foundation::time::CalendarDate;
use serde::Serialize;
use timeline::{DateIndex, DateIndexCache, Direction, Jump};
use tracing::{debug, info};
use viewpoint::{DeferredViewpoint, PointOfView, ViewpointController};

use crate::config::{ConfigError, ExplorerConfig, ResolvedViewpoint, Viewport};
use crate::intent::{Intent, Outcome};
use crate::journal::Journal;
use crate::selection::{Phase, Selection};

/// Everything the presentation shell renders from, recomputed after every
/// transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub selected_date: CalendarDate,
    /// Events on `selected_date`, in catalog order.
    pub matching_events: Vec<EventId>,
    pub selected_event: Option<EventId>,
    pub has_previous: bool,
    pub has_next: bool,
    pub panel_open: bool,
    pub phase: Phase,
}

/// One user's explorer session.
///
/// All transitions are synchronous: an intent is fully applied before the
/// next one is looked at. Camera commands are fire-and-forget.
#[derive(Debug)]
pub struct ExplorerSession<V> {
    catalog: Arc<Catalog>,
    cache: DateIndexCache,
    index: Arc<DateIndex>,
    config: ExplorerConfig,
    selection: Selection,
    viewpoint: DeferredViewpoint<V>,
    viewport: Option<Viewport>,
    resolved: Option<ResolvedViewpoint>,
    journal: Journal,
}

impl<V: ViewpointController> ExplorerSession<V> {
    pub fn new(catalog: Arc<Catalog>, config: ExplorerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let catalog = conform_to_bounds(catalog, &config);
        let mut cache = DateIndexCache::new();
        let index = cache.get(&catalog);
        let selection = Selection::new(config.initial_date);
        let viewpoint = DeferredViewpoint::new(config.unavailable_policy());

        info!(
            events = catalog.len(),
            dates = index.len(),
            initial_date = %config.initial_date,
            "explorer session started"
        );

        Ok(Self {
            catalog,
            cache,
            index,
            config,
            selection,
            viewpoint,
            viewport: None,
            resolved: None,
            journal: Journal::new(),
        })
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn date_index(&self) -> &DateIndex {
        &self.index
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn journal_mut(&mut self) -> &mut Journal {
        &mut self.journal
    }

    pub fn viewpoint(&self) -> &DeferredViewpoint<V> {
        &self.viewpoint
    }

    pub fn viewpoint_mut(&mut self) -> &mut DeferredViewpoint<V> {
        &mut self.viewpoint
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Device-dependent camera settings, fixed by the first viewport seen.
    pub fn resolved_viewpoint(&self) -> Option<ResolvedViewpoint> {
        self.resolved
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.selection.focused().and_then(|id| self.catalog.get(id))
    }

    pub fn view(&self) -> SessionView {
        let date = self.selection.date();
        let matching_events = timeline::matching_events(&self.catalog, date);
        let availability = timeline::availability(date, &self.index);
        SessionView {
            selected_date: date,
            phase: self.selection.phase(),
            matching_events,
            selected_event: self.selection.focused(),
            has_previous: availability.has_previous,
            has_next: availability.has_next,
            panel_open: self.selection.panel_open(),
        }
    }

    /// Attaches the 3D surface and points it at the current focus, or at the
    /// overview when nothing is focused.
    pub fn mount(&mut self, viewport: Viewport, controller: V) {
        self.observe_viewport(viewport);
        self.viewpoint.mount(controller);
        self.recenter();
    }

    /// Delivers a deferred camera command once the surface reports ready.
    pub fn flush_viewpoint(&mut self) -> bool {
        self.viewpoint.flush()
    }

    /// Swaps in a different catalog. The date index is rebuilt only when the
    /// catalog content differs; a content change also drops the focused event.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        let catalog = conform_to_bounds(catalog, &self.config);
        if catalog.identity() != self.catalog.identity() {
            self.selection.close_card();
        }
        self.index = self.cache.get(&catalog);
        self.catalog = catalog;
    }

    /// Number of times the date index has been built for this session.
    pub fn index_builds(&self) -> u64 {
        self.cache.builds()
    }

    pub fn apply(&mut self, intent: Intent) -> Outcome {
        let outcome = Outcome::from_changed(match intent {
            Intent::DatePicked { date } => self.pick_date(date),
            Intent::MarkerClicked { event } => self.click_marker(event),
            Intent::PreviousIncident => self.navigate(Direction::Previous),
            Intent::NextIncident => self.navigate(Direction::Next),
            Intent::CloseCard => self.selection.close_card(),
            Intent::Escape => self.selection.dismiss_all(),
            Intent::TogglePanel => self.selection.toggle_panel(),
            Intent::Resized { width, height } => self.resize(Viewport { width, height }),
        });

        debug!(
            intent = intent.kind(),
            ?outcome,
            selected_date = %self.selection.date(),
            focused = ?self.selection.focused(),
            "intent applied"
        );
        self.journal.record(intent, outcome, self.selection.date());
        outcome
    }

    /// Calendar pick. Dates outside the configured range are clamped into it.
    fn pick_date(&mut self, date: CalendarDate) -> bool {
        let clamped = self.config.date_bounds.clamp(date);
        if clamped != date {
            debug!(%date, %clamped, "picked date outside bounds; clamped");
        }
        self.selection.pick_date(clamped)
    }

    fn click_marker(&mut self, event: EventId) -> bool {
        let Some(location) = self.catalog.get(event).map(|e| e.location) else {
            debug!(event = event.0, "click on unknown event ignored");
            return false;
        };
        let changed = self.selection.focus(event);
        let pov = self.focus_command(location);
        self.viewpoint.issue(pov);
        changed
    }

    fn navigate(&mut self, direction: Direction) -> bool {
        let jump = timeline::incident(direction, self.selection.date(), &self.index);
        if jump == Jump::Stay {
            debug!(?direction, date = %self.selection.date(), "no incident in that direction");
        }
        self.selection.jump(jump)
    }

    /// Viewport changes never change the selection; they only re-center the
    /// camera when no event is focused.
    fn resize(&mut self, viewport: Viewport) -> bool {
        self.observe_viewport(viewport);
        self.viewpoint.flush();
        if self.selection.focused().is_none()
            && let Some(resolved) = self.resolved
        {
            self.viewpoint.issue(resolved.overview);
        }
        false
    }

    fn observe_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        if self.resolved.is_none() {
            let resolved = self.config.resolve(viewport);
            debug!(device = ?resolved.device, "device class resolved");
            self.resolved = Some(resolved);
        }
    }

    fn recenter(&mut self) {
        let pov = match self.selected_event().map(|e| e.location) {
            Some(location) => self.focus_command(location),
            None => match self.resolved {
                Some(resolved) => resolved.overview,
                None => return,
            },
        };
        self.viewpoint.issue(pov);
    }

    fn focus_command(&self, location: GeoPoint) -> PointOfView {
        match self.resolved {
            Some(resolved) => resolved.focus_on(location),
            None => PointOfView::new(
                location,
                self.config.focus_altitude,
                self.config.transition_duration_ms,
            ),
        }
    }
}

/// Event dates outside the configured calendar range must not become
/// navigation targets, so a catalog resolved against other bounds is
/// re-resolved against the session's.
fn conform_to_bounds(catalog: Arc<Catalog>, config: &ExplorerConfig) -> Arc<Catalog> {
    if *catalog.bounds() == config.date_bounds {
        return catalog;
    }
    debug!(
        min = %config.date_bounds.min,
        max = %config.date_bounds.max,
        "catalog resolved against other date bounds; re-resolving"
    );
    Arc::new(catalog.with_bounds(&config.date_bounds))
}
