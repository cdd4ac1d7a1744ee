use std::time::Instant;

use log::{debug, error};

use crate::controllers::data::render_request::{ControllerSlot, GenerationMode, RenderStrategy};
use crate::controllers::data::render_signals::RenderSignals;
use crate::controllers::errors::rendering::RenderingError;
use crate::controllers::ports::render_controller::{RenderController, StartOutcome};
use crate::core::data::render_params::RenderParameters;

/// Holds at most one live controller per slot and resolves the one that
/// serves a `(strategy, mode)` pair.
///
/// Owned by the consumer context. Registering a controller into an occupied
/// slot disposes the previous one.
#[derive(Default)]
pub struct RendererCoordinator {
    cpu: Option<Box<dyn RenderController>>,
    gpu_one_shot: Option<Box<dyn RenderController>>,
    continuous: Option<Box<dyn RenderController>>,
}

impl RendererCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, controller: Box<dyn RenderController>) {
        let slot = controller.slot();
        debug!("coordinator: registering {} controller", slot.name());

        if let Some(mut previous) = self.slot_mut(slot).replace(controller) {
            previous.dispose();
        }
    }

    /// Disposes and forgets the controller in `slot`, if any.
    pub fn unregister(&mut self, slot: ControllerSlot) {
        if let Some(mut controller) = self.slot_mut(slot).take() {
            debug!("coordinator: unregistering {} controller", slot.name());
            controller.dispose();
        }
    }

    #[must_use]
    pub fn is_registered(&self, slot: ControllerSlot) -> bool {
        self.slot_ref(slot).is_some()
    }

    pub fn get_mut(&mut self, slot: ControllerSlot) -> Option<&mut (dyn RenderController + 'static)> {
        self.slot_mut(slot).as_deref_mut()
    }

    pub fn resolve(
        &mut self,
        strategy: RenderStrategy,
        mode: GenerationMode,
    ) -> Result<&mut (dyn RenderController + 'static), RenderingError> {
        let slot = ControllerSlot::resolve(strategy, mode);

        self.get_mut(slot).ok_or_else(|| {
            error!("coordinator: no {} controller registered", slot.name());
            RenderingError::ControllerUnavailable { slot }
        })
    }

    /// Forwards a start to the controller in `slot` when the UI has asked
    /// for one, the controller has no session, and no cancel is pending.
    pub fn dispatch_start(
        &mut self,
        slot: ControllerSlot,
        params: RenderParameters,
        signals: &RenderSignals,
    ) -> Result<Option<StartOutcome>, RenderingError> {
        let controller = self
            .get_mut(slot)
            .ok_or(RenderingError::ControllerUnavailable { slot })?;

        if !signals.is_generating() || controller.has_rendered() || signals.is_cancel_requested() {
            return Ok(None);
        }

        Ok(Some(controller.start(params, signals.clone())))
    }

    pub fn tick(&mut self, now: Instant) {
        for slot in ControllerSlot::ALL {
            if let Some(controller) = self.slot_mut(slot) {
                controller.tick(now);
            }
        }
    }

    pub fn dispose_all(&mut self) {
        for slot in ControllerSlot::ALL {
            self.unregister(slot);
        }
    }

    fn slot_mut(&mut self, slot: ControllerSlot) -> &mut Option<Box<dyn RenderController>> {
        match slot {
            ControllerSlot::Cpu => &mut self.cpu,
            ControllerSlot::GpuOneShot => &mut self.gpu_one_shot,
            ControllerSlot::Continuous => &mut self.continuous,
        }
    }

    fn slot_ref(&self, slot: ControllerSlot) -> &Option<Box<dyn RenderController>> {
        match slot {
            ControllerSlot::Cpu => &self.cpu,
            ControllerSlot::GpuOneShot => &self.gpu_one_shot,
            ControllerSlot::Continuous => &self.continuous,
        }
    }
}

impl Drop for RendererCoordinator {
    fn drop(&mut self) {
        self.dispose_all();
    }
}
