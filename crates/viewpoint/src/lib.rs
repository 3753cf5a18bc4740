//! Camera boundary of the explorer.
//!
//! The session issues fire-and-forget [`PointOfView`] commands; whoever owns
//! the 3D surface implements [`ViewpointController`]. Commands never block
//! and a newer command always supersedes an older one.

pub mod command;
pub mod controller;
pub mod deferred;
pub mod globe_camera;

pub use command::*;
pub use controller::*;
pub use deferred::*;
pub use globe_camera::*;
