//! Reference globe camera that animates between points of view.
//!
//! Each command starts a transition from wherever the camera currently is,
//! so a command issued mid-flight supersedes the previous one without a jump.
//! Longitude is interpolated along the shorter arc.

use foundation::geo::{GeoPoint, WGS84_A, shortest_longitude_delta_deg, wrap_longitude_deg};

use crate::command::PointOfView;
use crate::controller::ViewpointController;

/// Closest the eye may get to the surface (globe radii).
pub const MIN_ALTITUDE: f64 = 0.01;

/// Farthest the eye may get from the surface (globe radii).
pub const MAX_ALTITUDE: f64 = 19.0;

/// Largest time step accepted by `update`, to avoid big jumps after stalls.
const MAX_STEP_S: f64 = 0.1;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Pose {
    lat: f64,
    lng: f64,
    altitude: f64,
}

impl Pose {
    fn lerp(from: Pose, to: Pose, t: f64) -> Pose {
        let dlng = shortest_longitude_delta_deg(from.lng, to.lng);
        Pose {
            lat: from.lat + (to.lat - from.lat) * t,
            lng: wrap_longitude_deg(from.lng + dlng * t),
            altitude: from.altitude + (to.altitude - from.altitude) * t,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Transition {
    from: Pose,
    to: Pose,
    elapsed_s: f64,
    duration_s: f64,
}

#[derive(Debug, Clone)]
pub struct GlobeCamera {
    pose: Pose,
    transition: Option<Transition>,
    canvas_width: f64,
    canvas_height: f64,
    /// Commands received, including superseded ones.
    commands: u64,
}

impl Default for GlobeCamera {
    fn default() -> Self {
        Self {
            pose: Pose {
                lat: 0.0,
                lng: 0.0,
                altitude: 2.5,
            },
            transition: None,
            canvas_width: 0.0,
            canvas_height: 0.0,
            commands: 0,
        }
    }
}

impl GlobeCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the drawing surface size. A camera without a surface is not ready.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width.max(0.0);
        self.canvas_height = height.max(0.0);
    }

    /// Advances any active transition by `dt_s` seconds.
    pub fn update(&mut self, dt_s: f64) {
        let dt_s = dt_s.clamp(0.0, MAX_STEP_S);
        let Some(mut tr) = self.transition else {
            return;
        };

        tr.elapsed_s += dt_s;
        if tr.elapsed_s >= tr.duration_s {
            self.pose = tr.to;
            self.transition = None;
            return;
        }

        let t = smoothstep(tr.elapsed_s / tr.duration_s);
        self.pose = Pose::lerp(tr.from, tr.to, t);
        self.transition = Some(tr);
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: self.pose.lat,
            lng: self.pose.lng,
        }
    }

    pub fn altitude(&self) -> f64 {
        self.pose.altitude
    }

    /// Distance from the globe center in meters.
    pub fn distance_m(&self) -> f64 {
        WGS84_A * (1.0 + self.pose.altitude)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Final pose of the active transition, or the current pose.
    pub fn destination(&self) -> PointOfView {
        let pose = self.transition.map_or(self.pose, |t| t.to);
        PointOfView {
            lat: pose.lat,
            lng: pose.lng,
            altitude: pose.altitude,
            duration_ms: 0,
        }
    }

    pub fn commands_received(&self) -> u64 {
        self.commands
    }
}

impl ViewpointController for GlobeCamera {
    fn is_ready(&self) -> bool {
        self.canvas_width > 0.0 && self.canvas_height > 0.0
    }

    fn set_point_of_view(&mut self, pov: PointOfView) {
        self.commands += 1;
        if !(pov.lat.is_finite() && pov.lng.is_finite() && pov.altitude.is_finite()) {
            return;
        }

        let to = Pose {
            lat: pov.lat.clamp(-90.0, 90.0),
            lng: wrap_longitude_deg(pov.lng),
            altitude: pov.altitude.clamp(MIN_ALTITUDE, MAX_ALTITUDE),
        };

        if pov.is_instant() {
            self.pose = to;
            self.transition = None;
            return;
        }

        self.transition = Some(Transition {
            from: self.pose,
            to,
            elapsed_s: 0.0,
            duration_s: f64::from(pov.duration_ms) / 1000.0,
        });
    }
}

fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
