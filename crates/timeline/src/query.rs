use catalog::{Catalog, Event, EventId};
use foundation::time::CalendarDate;

/// Events recorded on `date`, in catalog order.
///
/// This is a pure filter over the catalog; the result is never cached.
pub fn events_on(catalog: &Catalog, date: CalendarDate) -> impl Iterator<Item = (EventId, &Event)> {
    catalog.iter().filter(move |(_, e)| e.occurs_on(date))
}

pub fn matching_events(catalog: &Catalog, date: CalendarDate) -> Vec<EventId> {
    events_on(catalog, date).map(|(id, _)| id).collect()
}

pub fn count_on(catalog: &Catalog, date: CalendarDate) -> usize {
    events_on(catalog, date).count()
}
