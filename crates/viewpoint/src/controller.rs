use crate::command::PointOfView;

/// The 3D surface the explorer drives but does not own.
pub trait ViewpointController {
    /// Whether the underlying surface can accept commands right now.
    fn is_ready(&self) -> bool {
        true
    }

    /// Starts a transition. Must not block and must not panic.
    fn set_point_of_view(&mut self, pov: PointOfView);
}

impl<T: ViewpointController + ?Sized> ViewpointController for Box<T> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn set_point_of_view(&mut self, pov: PointOfView) {
        (**self).set_point_of_view(pov);
    }
}

/// Controller that only remembers what it was told.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingViewpoint {
    commands: Vec<PointOfView>,
}

impl RecordingViewpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PointOfView] {
        &self.commands
    }

    pub fn last(&self) -> Option<&PointOfView> {
        self.commands.last()
    }

    pub fn drain(&mut self) -> Vec<PointOfView> {
        std::mem::take(&mut self.commands)
    }
}

impl ViewpointController for RecordingViewpoint {
    fn set_point_of_view(&mut self, pov: PointOfView) {
        self.commands.push(pov);
    }
}
