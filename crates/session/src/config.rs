use std::path::{Path, PathBuf};

use foundation::geo::{GeoError, GeoPoint};
use foundation::time::{CalendarDate, DateBounds, DateError};
use serde::{Deserialize, Serialize};
use viewpoint::{PointOfView, UnavailablePolicy};

pub const ENV_INITIAL_DATE: &str = "EXPLORER_INITIAL_DATE";
pub const ENV_TRANSITION_MS: &str = "EXPLORER_TRANSITION_MS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{var}: {source}")]
    EnvDate { var: &'static str, source: DateError },
    #[error("{var}: expected milliseconds, got {value:?}")]
    EnvDuration { var: &'static str, value: String },
    #[error("date bounds are inverted: {min} > {max}")]
    InvertedBounds { min: CalendarDate, max: CalendarDate },
    #[error("initial date {date} outside date bounds {min}..={max}")]
    InitialDateOutOfBounds {
        date: CalendarDate,
        min: CalendarDate,
        max: CalendarDate,
    },
    #[error("overview center: {0}")]
    OverviewCenter(#[from] GeoError),
    #[error("{field} must be a positive finite altitude, got {value}")]
    Altitude { field: &'static str, value: f64 },
}

/// Recognized session options. Every field has a default, so a config file
/// only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub initial_date: CalendarDate,
    pub date_bounds: DateBounds,
    pub mobile_altitude: f64,
    pub desktop_altitude: f64,
    pub focus_altitude: f64,
    pub transition_duration_ms: u32,
    pub mount_duration_ms: u32,
    pub overview_center: GeoPoint,
    /// Viewports at most this wide are treated as mobile.
    pub mobile_max_width: u32,
    pub fallback_accent: String,
    pub defer_camera_until_ready: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            initial_date: CalendarDate::from_ymd(1939, 9, 1)
                .unwrap_or(DateBounds::default().min),
            date_bounds: DateBounds::default(),
            mobile_altitude: 2.6,
            desktop_altitude: 2.0,
            focus_altitude: 0.8,
            transition_duration_ms: 1000,
            mount_duration_ms: 2000,
            overview_center: GeoPoint { lat: 20.0, lng: 0.0 },
            mobile_max_width: 768,
            fallback_accent: catalog::DEFAULT_ACCENT.to_string(),
            defer_camera_until_ready: true,
        }
    }
}

impl ExplorerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Overrides fields from environment variables looked up through `var`.
    pub fn apply_env(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = var(ENV_INITIAL_DATE) {
            self.initial_date =
                CalendarDate::parse(&raw).map_err(|source| ConfigError::EnvDate {
                    var: ENV_INITIAL_DATE,
                    source,
                })?;
        }
        if let Some(raw) = var(ENV_TRANSITION_MS) {
            self.transition_duration_ms =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::EnvDuration {
                        var: ENV_TRANSITION_MS,
                        value: raw.clone(),
                    })?;
        }
        Ok(())
    }

    pub fn apply_process_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env(|name| std::env::var(name).ok())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = self.date_bounds;
        if !bounds.is_ordered() {
            return Err(ConfigError::InvertedBounds {
                min: bounds.min,
                max: bounds.max,
            });
        }
        if !bounds.contains(self.initial_date) {
            return Err(ConfigError::InitialDateOutOfBounds {
                date: self.initial_date,
                min: bounds.min,
                max: bounds.max,
            });
        }
        GeoPoint::new(self.overview_center.lat, self.overview_center.lng)?;
        for (field, value) in [
            ("mobile_altitude", self.mobile_altitude),
            ("desktop_altitude", self.desktop_altitude),
            ("focus_altitude", self.focus_altitude),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Altitude { field, value });
            }
        }
        Ok(())
    }

    pub fn unavailable_policy(&self) -> UnavailablePolicy {
        if self.defer_camera_until_ready {
            UnavailablePolicy::Defer
        } else {
            UnavailablePolicy::Drop
        }
    }

    /// Settles device-dependent camera parameters for a session.
    pub fn resolve(&self, viewport: Viewport) -> ResolvedViewpoint {
        let device = DeviceClass::classify(viewport, self.mobile_max_width);
        let overview_altitude = match device {
            DeviceClass::Mobile => self.mobile_altitude,
            DeviceClass::Desktop => self.desktop_altitude,
        };
        ResolvedViewpoint {
            device,
            overview: PointOfView::new(
                self.overview_center,
                overview_altitude,
                self.mount_duration_ms,
            ),
            focus_altitude: self.focus_altitude,
            transition_duration_ms: self.transition_duration_ms,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    pub fn classify(viewport: Viewport, mobile_max_width: u32) -> Self {
        if viewport.width <= mobile_max_width {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Camera parameters fixed once per session.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedViewpoint {
    pub device: DeviceClass,
    pub overview: PointOfView,
    pub focus_altitude: f64,
    pub transition_duration_ms: u32,
}

impl ResolvedViewpoint {
    pub fn focus_on(&self, location: GeoPoint) -> PointOfView {
        PointOfView::new(location, self.focus_altitude, self.transition_duration_ms)
    }
}
