use std::sync::Arc;

use catalog::{Catalog, CatalogId};
use foundation::time::CalendarDate;
use tracing::debug;

/// Sorted, deduplicated dates that have at least one event.
///
/// Ordering contract:
/// - Dates are ascending by calendar value (not by their textual form).
/// - Each date appears once.
/// - Events whose date did not resolve to a valid calendar day are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateIndex {
    dates: Vec<CalendarDate>,
}

impl DateIndex {
    pub fn build(catalog: &Catalog) -> Self {
        Self::from_dates(catalog.events().iter().filter_map(|e| e.calendar_date()))
    }

    pub fn from_dates(dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        let mut dates: Vec<CalendarDate> = dates.into_iter().collect();
        dates.sort_unstable();
        dates.dedup();
        Self { dates }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> Option<CalendarDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<CalendarDate> {
        self.dates.last().copied()
    }

    pub fn get(&self, position: usize) -> Option<CalendarDate> {
        self.dates.get(position).copied()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// `Ok(i)` if `date` is at position `i`, otherwise `Err(i)` with the
    /// position it would be inserted at.
    pub fn position(&self, date: CalendarDate) -> Result<usize, usize> {
        self.dates.binary_search(&date)
    }

    pub fn as_slice(&self) -> &[CalendarDate] {
        &self.dates
    }

    pub fn iter(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.dates.iter().copied()
    }
}

/// Memoizes the [`DateIndex`] of the most recently seen catalog.
///
/// The index is rebuilt only when the catalog identity changes.
#[derive(Debug, Default)]
pub struct DateIndexCache {
    entry: Option<(CatalogId, Arc<DateIndex>)>,
    builds: u64,
}

impl DateIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, catalog: &Catalog) -> Arc<DateIndex> {
        if let Some((id, index)) = &self.entry
            && id == catalog.identity()
        {
            return Arc::clone(index);
        }

        let index = Arc::new(DateIndex::build(catalog));
        self.builds += 1;
        debug!(
            catalog = %catalog.identity(),
            dates = index.len(),
            builds = self.builds,
            "date index built"
        );
        self.entry = Some((catalog.identity().clone(), Arc::clone(&index)));
        index
    }

    /// Number of times an index was actually built.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{DateIndex, DateIndexCache};
    use catalog::Catalog;
    use foundation::time::{CalendarDate, DateBounds};
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> CalendarDate {
        CalendarDate::parse(s).expect("date")
    }

    fn catalog(json: &str) -> Catalog {
        Catalog::from_json_str(json, &DateBounds::default()).expect("catalog")
    }

    const MIXED: &str = r#"[
        {"lat": 0, "lng": 0, "title": "c", "date": "1945-05-08"},
        {"lat": 0, "lng": 0, "title": "a", "date": "1919-06-28"},
        {"lat": 0, "lng": 0, "title": "b", "date": "1945-05-08"},
        {"lat": 0, "lng": 0, "title": "bad", "date": "not a date"},
        {"lat": 0, "lng": 0, "title": "d", "date": "1919-01-18"}
    ]"#;

    #[test]
    fn build_sorts_and_dedups_valid_dates() {
        let index = DateIndex::build(&catalog(MIXED));
        let dates: Vec<CalendarDate> = index.iter().collect();
        assert_eq!(dates, vec![d("1919-01-18"), d("1919-06-28"), d("1945-05-08")]);
        assert_eq!(index.first(), Some(d("1919-01-18")));
        assert_eq!(index.last(), Some(d("1945-05-08")));
        assert_eq!(index.position(d("1919-06-28")), Ok(1));
        assert_eq!(index.position(d("1920-01-01")), Err(2));
    }

    #[test]
    fn empty_catalog_gives_empty_index() {
        let index = DateIndex::build(&Catalog::empty());
        assert!(index.is_empty());
        assert_eq!(index.first(), None);
        assert!(!index.contains(d("1939-09-01")));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let c = catalog(MIXED);
        assert_eq!(DateIndex::build(&c), DateIndex::build(&c));
    }

    #[test]
    fn cache_rebuilds_only_on_identity_change() {
        let a = catalog(MIXED);
        let mut cache = DateIndexCache::new();

        let first = cache.get(&a);
        let second = cache.get(&a);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.builds(), 1);

        // Same content, different allocation: still a hit.
        let a_again = catalog(MIXED);
        let _ = cache.get(&a_again);
        assert_eq!(cache.builds(), 1);

        let b = catalog(r#"[{"lat": 0, "lng": 0, "title": "x", "date": "1939-09-01"}]"#);
        let other = cache.get(&b);
        assert_eq!(cache.builds(), 2);
        assert_eq!(other.as_slice(), &[d("1939-09-01")]);

        cache.invalidate();
        let _ = cache.get(&b);
        assert_eq!(cache.builds(), 3);
    }

    #[test]
    fn cache_rebuilds_when_bounds_differ() {
        let wide = catalog(MIXED);
        let narrow = Catalog::from_json_str(
            MIXED,
            &DateBounds::new(d("1919-01-01"), d("1920-12-31")),
        )
        .expect("catalog");
        let mut cache = DateIndexCache::new();

        assert_eq!(cache.get(&wide).len(), 3);
        let index = cache.get(&narrow);
        assert_eq!(cache.builds(), 2);
        assert_eq!(index.as_slice(), &[d("1919-01-18"), d("1919-06-28")]);
    }
}
