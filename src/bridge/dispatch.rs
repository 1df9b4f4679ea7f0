//! # Dispatch Loop
//!
//! Waits on the hot-plug channel and the controller channel, takes one item,
//! and runs it through routing and emission before waiting again.
//!
//! ## Control Flow
//!
//! 1. **Wait** for a hot-plug notice, a controller item or shutdown
//! 2. **Controller event**: route it and emit the resulting pointer action
//! 3. **Controller gone**: stop polling the controller until a notice arrives
//! 4. **Hot-plug notice**: reopen the controller and request one Motion-Plus
//!    recalibration; polling resumes only if the reopen succeeded
//!
//! `WouldBlock` and `Interrupted` reads are retried. Any other read error or
//! a failed emission ends the loop with an error.

use std::future::Future;
use std::io;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::controller::event::{ControllerEvent, ControllerItem, HotplugNotice};
use crate::controller::motion_plus::MpCalibration;
use crate::controller::ControllerChannel;
use crate::error::{PointerBridgeError, Result};
use crate::pointer::device_trait::{FilePointer, PointerIO};
use crate::pointer::VirtualPointer;

use super::router::Router;

/// One bridging session
///
/// Owns the router state and the pointer device for the lifetime of the
/// dispatch loop. The pointer is released when the session is dropped.
#[derive(Debug)]
pub struct Session<P: PointerIO = FilePointer> {
    router: Router,
    pointer: VirtualPointer<P>,
    events_routed: u64,
}

impl<P: PointerIO> Session<P> {
    pub fn new(router: Router, pointer: VirtualPointer<P>) -> Self {
        Self {
            router,
            pointer,
            events_routed: 0,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn pointer(&self) -> &VirtualPointer<P> {
        &self.pointer
    }

    /// Number of controller events routed so far
    pub fn events_routed(&self) -> u64 {
        self.events_routed
    }

    /// Route one event and emit its pointer action, if any
    ///
    /// # Errors
    ///
    /// Returns the pointer's emission error unchanged.
    pub fn handle_event(&mut self, event: &ControllerEvent, calibration: &mut dyn MpCalibration) -> Result<()> {
        let routed = self.router.route(event, calibration);
        self.events_routed += 1;

        if let Some(diagnostic) = routed.diagnostic {
            debug!("{}", diagnostic);
        }
        if let Some(action) = routed.action {
            self.pointer.emit(action)?;
        }
        Ok(())
    }

    /// Run the dispatch loop until `shutdown` completes or a fatal error occurs
    ///
    /// One Motion-Plus recalibration is requested before the first wait.
    ///
    /// # Errors
    ///
    /// - `ControllerRead`: the controller channel failed with a non-transient error
    /// - `Emission` / `ShortWrite`: the pointer device rejected a frame
    pub async fn run<C, F>(
        &mut self,
        controller: &mut C,
        hotplug: &mut mpsc::Receiver<HotplugNotice>,
        shutdown: F,
    ) -> Result<()>
    where
        C: ControllerChannel,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut controller_active = true;
        let mut hotplug_open = true;
        self.router.request_recalibration();

        info!("Dispatch loop started in {} mode", self.router.mode());

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(
                        "Shutting down ({} events routed, {} frames written)",
                        self.events_routed,
                        self.pointer.frames_written()
                    );
                    return Ok(());
                }

                notice = hotplug.recv(), if hotplug_open => match notice {
                    Some(HotplugNotice::Watch) => {
                        controller_active = self.refresh(controller);
                    }
                    None => {
                        debug!("Hot-plug channel closed");
                        hotplug_open = false;
                    }
                },

                item = controller.next_item(), if controller_active => match item {
                    Ok(ControllerItem::Event(event)) => {
                        if let Err(e) = self.handle_event(&event, controller) {
                            error!("Pointer emission failed: {}", e);
                            return Err(e);
                        }
                    }
                    Ok(ControllerItem::Gone) => {
                        warn!("Controller gone, waiting for it to reconnect");
                        controller_active = false;
                    }
                    Err(e) if is_transient(&e) => {
                        debug!("Transient controller read error: {}", e);
                    }
                    Err(e) => {
                        error!("Controller read failed: {}", e);
                        return Err(PointerBridgeError::ControllerRead(e));
                    }
                },
            }
        }
    }

    /// Reopen the controller after a hot-plug notice
    ///
    /// Returns whether the controller can be polled again.
    fn refresh<C: ControllerChannel>(&mut self, controller: &mut C) -> bool {
        self.router.request_recalibration();

        if let Err(e) = controller.reopen() {
            warn!("Failed to reopen controller, waiting for the next change: {}", e);
            return false;
        }

        let status = controller.status();
        info!(
            "Controller reopened: battery {:?}%, LEDs {:?}",
            status.battery, status.leds
        );
        true
    }
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}
