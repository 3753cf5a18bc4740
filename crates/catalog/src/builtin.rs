//! Catalog bundled with the crate, used when no catalog file is supplied.

use foundation::time::DateBounds;

use crate::{Catalog, CatalogError};

pub const BUILTIN_EVENTS_JSON: &str = include_str!("../data/events.json");

pub fn builtin_catalog(bounds: &DateBounds) -> Result<Catalog, CatalogError> {
    Catalog::from_json_str(BUILTIN_EVENTS_JSON, bounds)
}
