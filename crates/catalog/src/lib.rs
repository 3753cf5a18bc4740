//! Immutable, preloaded catalog of dated historical events.
//!
//! A catalog is built once and then shared read-only (typically behind an
//! `Arc`). Its identity is a content hash, so derived data can be memoized
//! against it.

pub mod builtin;
pub mod event;

use std::path::{Path, PathBuf};

use foundation::geo::{GeoError, GeoPoint};
use foundation::time::{CalendarDate, DateBounds};
use tracing::{debug, warn};

pub use event::*;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event #{index}: title is empty")]
    EmptyTitle { index: usize },
    #[error("event #{index} ({title}): {source}")]
    Location {
        index: usize,
        title: String,
        source: GeoError,
    },
}

/// Content identity of a catalog (blake3 hex of its canonical JSON).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogId(String);

impl CatalogId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of `records` resolved against `bounds`. The same records under
/// different bounds index differently, so they get different ids.
pub fn id_for_records(records: &[EventRecord], bounds: &DateBounds) -> CatalogId {
    id_for_content(&content_hash(records), bounds)
}

fn content_hash(records: &[EventRecord]) -> blake3::Hash {
    // Serializing plain structs of strings and finite floats cannot fail;
    // fall back to hashing nothing rather than panicking.
    let bytes = serde_json::to_vec(records).unwrap_or_default();
    blake3::hash(&bytes)
}

fn id_for_content(content: &blake3::Hash, bounds: &DateBounds) -> CatalogId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(content.as_bytes());
    hasher.update(format!("{}..={}", bounds.min, bounds.max).as_bytes());
    CatalogId(hasher.finalize().to_hex().to_string())
}

/// Something worth reporting about a loaded catalog. None of these prevent use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MalformedDate { id: EventId, text: String },
    DateOutOfBounds { id: EventId, date: CalendarDate },
    MissingImage { id: EventId },
    Duplicate { id: EventId, first: EventId },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::MalformedDate { id, text } => {
                write!(f, "event #{}: malformed date {text:?}", id.0)
            }
            ValidationIssue::DateOutOfBounds { id, date } => {
                write!(f, "event #{}: date {date} outside supported range", id.0)
            }
            ValidationIssue::MissingImage { id } => write!(f, "event #{}: no image", id.0),
            ValidationIssue::Duplicate { id, first } => {
                write!(f, "event #{}: duplicates event #{}", id.0, first.0)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    events: Vec<Event>,
    bounds: DateBounds,
    content: blake3::Hash,
    identity: CatalogId,
}

impl Catalog {
    pub fn empty() -> Self {
        Self {
            events: Vec::new(),
            bounds: DateBounds::default(),
            content: content_hash(&[]),
            identity: id_for_records(&[], &DateBounds::default()),
        }
    }

    /// Builds a catalog from authoring records.
    ///
    /// Dates are interpreted leniently: an unparseable or out-of-range date
    /// keeps the event in the catalog but excludes it from indexing.
    /// Empty titles and out-of-range coordinates are hard errors.
    pub fn from_records(
        records: Vec<EventRecord>,
        bounds: &DateBounds,
    ) -> Result<Self, CatalogError> {
        let content = content_hash(&records);
        let identity = id_for_content(&content, bounds);
        let mut events = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            if record.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle { index });
            }
            let location = GeoPoint::new(record.lat, record.lng).map_err(|source| {
                CatalogError::Location {
                    index,
                    title: record.title.clone(),
                    source,
                }
            })?;

            let event = Event::from_parts(record, location, bounds);
            match &event.date {
                EventDate::Valid(_) => {}
                EventDate::OutOfBounds(date) => {
                    warn!(index, title = %event.title, %date, "event date outside range; not indexed");
                }
                EventDate::Malformed(text) => {
                    warn!(index, title = %event.title, date = %text, "malformed event date; not indexed");
                }
            }
            events.push(event);
        }

        debug!(events = events.len(), identity = %identity, "catalog built");
        Ok(Self {
            events,
            bounds: *bounds,
            content,
            identity,
        })
    }

    /// Re-resolves every event date against `bounds`.
    ///
    /// Locations and titles were checked when the catalog was built, so this
    /// cannot fail. Returns a clone when the bounds already match.
    pub fn with_bounds(&self, bounds: &DateBounds) -> Self {
        if self.bounds == *bounds {
            return self.clone();
        }
        let events: Vec<Event> = self
            .events
            .iter()
            .map(|event| Event {
                date: EventDate::resolve(&event.date_text, bounds),
                ..event.clone()
            })
            .collect();
        let identity = id_for_content(&self.content, bounds);
        debug!(
            from = %self.identity,
            to = %identity,
            min = %bounds.min,
            max = %bounds.max,
            "catalog dates re-resolved"
        );
        Self {
            events,
            bounds: *bounds,
            content: self.content,
            identity,
        }
    }

    pub fn from_json_str(json: &str, bounds: &DateBounds) -> Result<Self, CatalogError> {
        let records: Vec<EventRecord> = serde_json::from_str(json)?;
        Self::from_records(records, bounds)
    }

    pub fn load(path: impl AsRef<Path>, bounds: &DateBounds) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, bounds)
    }

    pub fn identity(&self) -> &CatalogId {
        &self.identity
    }

    /// Range the event dates were resolved against.
    pub fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.index())
    }

    /// Events with their ids, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (EventId, &Event)> + '_ {
        self.events
            .iter()
            .enumerate()
            .map(|(idx, e)| (EventId(idx as u32), e))
    }

    pub fn to_records(&self) -> Vec<EventRecord> {
        self.events.iter().map(Event::to_record).collect()
    }

    /// Reports data-quality issues in catalog order.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut seen: Vec<(EventId, &str, &str)> = Vec::new();

        for (id, event) in self.iter() {
            match &event.date {
                EventDate::Valid(_) => {}
                EventDate::OutOfBounds(date) => {
                    issues.push(ValidationIssue::DateOutOfBounds { id, date: *date });
                }
                EventDate::Malformed(text) => {
                    issues.push(ValidationIssue::MalformedDate {
                        id,
                        text: text.clone(),
                    });
                }
            }
            if event.image_ref.trim().is_empty() {
                issues.push(ValidationIssue::MissingImage { id });
            }
            let key = (event.title.as_str(), event.date_text.as_str());
            if let Some((first, _, _)) = seen.iter().find(|(_, t, d)| (*t, *d) == key) {
                issues.push(ValidationIssue::Duplicate { id, first: *first });
            } else {
                seen.push((id, key.0, key.1));
            }
        }

        issues
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}
