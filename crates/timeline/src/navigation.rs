//! Chronological "previous / next incident" jumps over a [`DateIndex`].
//!
//! The selected date does not have to be in the index: free calendar
//! browsing can land on a day without events. Every function here returns a
//! definite answer; "nothing to jump to" is [`Jump::Stay`], never an error.

use foundation::time::CalendarDate;

use crate::date_index::DateIndex;

/// Decision of a navigation request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Jump {
    To(CalendarDate),
    Stay,
}

impl Jump {
    pub fn target(self) -> Option<CalendarDate> {
        match self {
            Jump::To(date) => Some(date),
            Jump::Stay => None,
        }
    }

    fn from_option(date: Option<CalendarDate>) -> Self {
        date.map_or(Jump::Stay, Jump::To)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Whether the previous/next affordances should be enabled.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    pub has_previous: bool,
    pub has_next: bool,
}

/// Nearest populated dates on either side of a selection.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub previous: Option<CalendarDate>,
    pub next: Option<CalendarDate>,
}

/// Previous incident relative to `selected`.
///
/// - present at position `i > 0`: the date at `i - 1`
/// - present at position 0: stay
/// - absent: latest date strictly before `selected`, or stay
pub fn previous_incident(selected: CalendarDate, index: &DateIndex) -> Jump {
    let candidate = match index.position(selected) {
        Ok(i) => i.checked_sub(1),
        Err(insert_at) => insert_at.checked_sub(1),
    };
    Jump::from_option(candidate.and_then(|i| index.get(i)))
}

/// Next incident relative to `selected`; mirror image of [`previous_incident`].
pub fn next_incident(selected: CalendarDate, index: &DateIndex) -> Jump {
    let candidate = match index.position(selected) {
        Ok(i) => i + 1,
        Err(insert_at) => insert_at,
    };
    Jump::from_option(index.get(candidate))
}

pub fn incident(direction: Direction, selected: CalendarDate, index: &DateIndex) -> Jump {
    match direction {
        Direction::Previous => previous_incident(selected, index),
        Direction::Next => next_incident(selected, index),
    }
}

/// True iff some indexed date is strictly earlier than `selected`.
pub fn has_previous(selected: CalendarDate, index: &DateIndex) -> bool {
    index.first().is_some_and(|first| first < selected)
}

/// True iff some indexed date is strictly later than `selected`.
pub fn has_next(selected: CalendarDate, index: &DateIndex) -> bool {
    index.last().is_some_and(|last| last > selected)
}

pub fn availability(selected: CalendarDate, index: &DateIndex) -> Availability {
    Availability {
        has_previous: has_previous(selected, index),
        has_next: has_next(selected, index),
    }
}

pub fn neighbors(selected: CalendarDate, index: &DateIndex) -> Neighbors {
    Neighbors {
        previous: previous_incident(selected, index).target(),
        next: next_incident(selected, index).target(),
    }
}
