use catalog::EventId;
use foundation::time::CalendarDate;
use serde::Serialize;
use timeline::Jump;

/// The session's current date/event focus.
///
/// Matching events are not stored here; they are always
/// recomputed from the catalog for `date`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Selection {
    date: CalendarDate,
    focused: Option<EventId>,
    panel_open: bool,
}

/// Coarse state of a selection.
///
/// Every date transition lands in `DateActive`, including dates with no
/// events; the matching list is simply empty then.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    DateActive,
    /// An event card is open.
    EventFocused,
}

impl Selection {
    pub fn new(date: CalendarDate) -> Self {
        Self {
            date,
            focused: None,
            panel_open: false,
        }
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn focused(&self) -> Option<EventId> {
        self.focused
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn phase(&self) -> Phase {
        match self.focused {
            Some(_) => Phase::EventFocused,
            None => Phase::DateActive,
        }
    }

    /// Explicit calendar pick: always drops the focused event.
    ///
    /// Returns `true` if anything changed.
    pub fn pick_date(&mut self, date: CalendarDate) -> bool {
        let changed = self.date != date || self.focused.is_some();
        self.date = date;
        self.focused = None;
        changed
    }

    /// Marker click: focuses `event` and leaves the date alone.
    pub fn focus(&mut self, event: EventId) -> bool {
        let changed = self.focused != Some(event);
        self.focused = Some(event);
        changed
    }

    pub fn close_card(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Applies a navigation decision. `Jump::Stay` leaves the state untouched.
    pub fn jump(&mut self, jump: Jump) -> bool {
        match jump {
            Jump::To(date) => self.pick_date(date),
            Jump::Stay => false,
        }
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        true
    }

    /// Escape: closes the event card and the navigation panel, keeps the date.
    pub fn dismiss_all(&mut self) -> bool {
        let changed = self.focused.is_some() || self.panel_open;
        self.focused = None;
        self.panel_open = false;
        changed
    }
}
