use foundation::geo::GeoPoint;
use foundation::time::{CalendarDate, DateBounds};
use serde::{Deserialize, Serialize};

/// Marker color used when an event does not carry one.
pub const DEFAULT_ACCENT: &str = "red";

/// Position of an event in catalog order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl EventId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Authoring format of a single event, as stored in catalog JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    #[serde(default, alias = "narrative", skip_serializing_if = "Narrative::is_empty")]
    pub description: Narrative,
    #[serde(default)]
    pub image: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_label: Option<String>,
}

/// Descriptive text: a single string or a list of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Narrative {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl Narrative {
    pub fn is_empty(&self) -> bool {
        matches!(self, Narrative::None)
    }

    fn into_blocks(self) -> Vec<String> {
        let blocks = match self {
            Narrative::None => Vec::new(),
            Narrative::One(text) => vec![text],
            Narrative::Many(blocks) => blocks,
        };
        blocks
            .into_iter()
            .filter(|b| !b.trim().is_empty())
            .collect()
    }

    fn from_blocks(blocks: &[String]) -> Self {
        match blocks {
            [] => Narrative::None,
            [one] => Narrative::One(one.clone()),
            many => Narrative::Many(many.to_vec()),
        }
    }
}

/// Optional external citation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub link: Option<String>,
    pub image: Option<String>,
    pub label: Option<String>,
}

/// Outcome of interpreting an event's date text against the supported range.
///
/// Only `Valid` dates take part in indexing and day filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDate {
    Valid(CalendarDate),
    OutOfBounds(CalendarDate),
    Malformed(String),
}

impl EventDate {
    pub fn resolve(text: &str, bounds: &DateBounds) -> Self {
        match CalendarDate::parse(text) {
            Ok(date) if bounds.contains(date) => EventDate::Valid(date),
            Ok(date) => EventDate::OutOfBounds(date),
            Err(_) => EventDate::Malformed(text.to_string()),
        }
    }

    pub fn valid(&self) -> Option<CalendarDate> {
        match self {
            EventDate::Valid(date) => Some(*date),
            _ => None,
        }
    }
}

/// A single dated historical record.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub location: GeoPoint,
    pub title: String,
    pub narrative: Vec<String>,
    pub image_ref: String,
    pub date_text: String,
    pub date: EventDate,
    pub accent_color: Option<String>,
    pub reference: Option<Reference>,
}

impl Event {
    /// Calendar date of the event, if it parsed and lies within bounds.
    pub fn calendar_date(&self) -> Option<CalendarDate> {
        self.date.valid()
    }

    pub fn occurs_on(&self, date: CalendarDate) -> bool {
        self.calendar_date() == Some(date)
    }

    pub fn accent_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.accent_color.as_deref().unwrap_or(fallback)
    }

    pub fn accent(&self) -> &str {
        self.accent_or(DEFAULT_ACCENT)
    }

    pub fn to_record(&self) -> EventRecord {
        let reference = self.reference.clone().unwrap_or_default();
        EventRecord {
            lat: self.location.lat,
            lng: self.location.lng,
            title: self.title.clone(),
            description: Narrative::from_blocks(&self.narrative),
            image: self.image_ref.clone(),
            date: self.date_text.clone(),
            color: self.accent_color.clone(),
            reference_link: reference.link,
            reference_image: reference.image,
            reference_label: reference.label,
        }
    }

    pub(crate) fn from_parts(
        record: EventRecord,
        location: GeoPoint,
        bounds: &DateBounds,
    ) -> Self {
        let date = EventDate::resolve(&record.date, bounds);
        let reference = if record.reference_link.is_some()
            || record.reference_image.is_some()
            || record.reference_label.is_some()
        {
            Some(Reference {
                link: record.reference_link,
                image: record.reference_image,
                label: record.reference_label,
            })
        } else {
            None
        };

        Self {
            location,
            title: record.title,
            narrative: record.description.into_blocks(),
            image_ref: record.image,
            date_text: record.date,
            date,
            accent_color: record.color.filter(|c| !c.trim().is_empty()),
            reference,
        }
    }
}
