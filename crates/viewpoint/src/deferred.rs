use tracing::debug;

use crate::command::PointOfView;
use crate::controller::ViewpointController;

/// What to do with a command while the controller is missing or not ready.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum UnavailablePolicy {
    /// Keep the newest command and deliver it once the controller is ready.
    #[default]
    Defer,
    /// Forget the command.
    Drop,
}

/// Wraps an optional controller so commands can be issued before the 3D
/// surface is mounted.
///
/// At most one command is pending: later commands replace earlier ones.
#[derive(Debug)]
pub struct DeferredViewpoint<C> {
    controller: Option<C>,
    pending: Option<PointOfView>,
    policy: UnavailablePolicy,
    dropped: u64,
}

impl<C: ViewpointController> DeferredViewpoint<C> {
    pub fn new(policy: UnavailablePolicy) -> Self {
        Self {
            controller: None,
            pending: None,
            policy,
            dropped: 0,
        }
    }

    pub fn mounted(controller: C, policy: UnavailablePolicy) -> Self {
        let mut out = Self::new(policy);
        out.controller = Some(controller);
        out
    }

    /// Attaches the controller and delivers any pending command.
    pub fn mount(&mut self, controller: C) {
        self.controller = Some(controller);
        self.flush();
    }

    pub fn unmount(&mut self) -> Option<C> {
        self.controller.take()
    }

    pub fn controller(&self) -> Option<&C> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut C> {
        self.controller.as_mut()
    }

    pub fn pending(&self) -> Option<PointOfView> {
        self.pending
    }

    /// Commands discarded without ever reaching a controller.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn issue(&mut self, pov: PointOfView) {
        if let Some(controller) = self.controller.as_mut()
            && controller.is_ready()
        {
            self.pending = None;
            controller.set_point_of_view(pov);
            return;
        }

        match self.policy {
            UnavailablePolicy::Defer => {
                if self.pending.replace(pov).is_some() {
                    self.dropped += 1;
                }
                debug!(?pov, "viewpoint not ready; command deferred");
            }
            UnavailablePolicy::Drop => {
                self.dropped += 1;
                debug!(?pov, "viewpoint not ready; command dropped");
            }
        }
    }

    /// Delivers the pending command if the controller has become ready.
    ///
    /// Returns `true` if a command was delivered.
    pub fn flush(&mut self) -> bool {
        let Some(controller) = self.controller.as_mut() else {
            return false;
        };
        if !controller.is_ready() {
            return false;
        }
        match self.pending.take() {
            Some(pov) => {
                controller.set_point_of_view(pov);
                true
            }
            None => false,
        }
    }
}
