//! Delivery of the aggregated text.
//!
//! The sink walks a fixed chain of states: check for a display, set the
//! clipboard, run the ownership handshake, and print to the console as the
//! terminal fallback. Every path ends in either a confirmed clipboard write
//! or the content on stdout, so delivery never returns an error.

pub mod clipboard;
pub mod console;
pub mod helper;

pub use clipboard::{ArboardClipboard, ClipboardBackend};
pub use helper::{HelperCommand, HelperExit, OwnershipHelper};

use crate::errors::DirClipError;
use std::io::Write;
use tracing::{debug, error, info, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    ClipboardSucceeded,
    ConsoleFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub outcome: DeliveryOutcome,
    /// Why delivery degraded, or the warning raised along the way.
    pub diagnostic: Option<String>,
}

impl DeliveryReport {
    fn clipboard(diagnostic: Option<String>) -> Self {
        DeliveryReport {
            outcome: DeliveryOutcome::ClipboardSucceeded,
            diagnostic,
        }
    }

    fn console(reason: String) -> Self {
        DeliveryReport {
            outcome: DeliveryOutcome::ConsoleFallback,
            diagnostic: Some(reason),
        }
    }
}

#[derive(Debug)]
enum DeliveryState {
    CheckEnvironment,
    SetClipboard,
    OwnershipHandshake,
    PrintToConsole { reason: String },
    Finished(DeliveryReport),
}

pub struct Sink {
    clipboard: Box<dyn ClipboardBackend>,
    helper: Option<Box<dyn OwnershipHelper>>,
    console: Box<dyn Write>,
}

impl Sink {
    pub fn new(
        clipboard: Box<dyn ClipboardBackend>,
        helper: Option<Box<dyn OwnershipHelper>>,
        console: Box<dyn Write>,
    ) -> Self {
        Sink {
            clipboard,
            helper,
            console,
        }
    }

    /// System clipboard, the given handshake helper and stdout.
    pub fn system(helper: Option<HelperCommand>) -> Self {
        Sink::new(
            Box::new(ArboardClipboard::new()),
            helper.map(|h| Box::new(h) as Box<dyn OwnershipHelper>),
            Box::new(std::io::stdout()),
        )
    }

    pub async fn deliver(&mut self, text: &str) -> DeliveryReport {
        let mut state = DeliveryState::CheckEnvironment;
        loop {
            trace!("Delivery state: {:?}", state);
            state = match state {
                DeliveryState::CheckEnvironment => self.check_environment(),
                DeliveryState::SetClipboard => self.set_clipboard(text),
                DeliveryState::OwnershipHandshake => self.ownership_handshake(text).await,
                DeliveryState::PrintToConsole { reason } => self.print_to_console(text, reason),
                DeliveryState::Finished(report) => return report,
            };
        }
    }

    fn check_environment(&self) -> DeliveryState {
        if self.clipboard.is_available() {
            DeliveryState::SetClipboard
        } else {
            warn!("Warning: Running in a headless environment. Cannot access clipboard.");
            let reason = DirClipError::ClipboardUnavailable(
                "headless environment, no display available".to_owned(),
            );
            DeliveryState::PrintToConsole {
                reason: reason.to_string(),
            }
        }
    }

    fn set_clipboard(&mut self, text: &str) -> DeliveryState {
        match self.clipboard.set_text(text) {
            Ok(()) => {
                info!(
                    "Successfully copied {} characters to clipboard!",
                    text.chars().count()
                );
                info!("You can now paste the combined content wherever you like.");
                if self.helper.is_some() {
                    DeliveryState::OwnershipHandshake
                } else {
                    DeliveryState::Finished(DeliveryReport::clipboard(None))
                }
            }
            Err(e) => {
                warn!("Error: {}. Printing content to console instead.", e);
                DeliveryState::PrintToConsole {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn ownership_handshake(&self, text: &str) -> DeliveryState {
        let Some(helper) = self.helper.as_ref() else {
            return DeliveryState::Finished(DeliveryReport::clipboard(None));
        };

        match helper.handshake(text).await {
            Ok(exit) if exit.success() => {
                debug!("Forced {} handshake for clipboard persistence.", helper.name());
                DeliveryState::Finished(DeliveryReport::clipboard(None))
            }
            Ok(exit) => {
                let message = match exit.code {
                    Some(code) => format!("{} command failed with exit code {}", helper.name(), code),
                    None => format!("{} command was terminated by a signal", helper.name()),
                };
                warn!("Warning: {}", message);
                DeliveryState::Finished(DeliveryReport::clipboard(Some(message)))
            }
            Err(e) => {
                warn!("Error running {} for handshake: {}", helper.name(), e);
                DeliveryState::PrintToConsole {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn print_to_console(&mut self, text: &str, reason: String) -> DeliveryState {
        if let Err(e) = console::print_to_console(self.console.as_mut(), text) {
            error!("Failed to print content to console: {}", e);
        }
        DeliveryState::Finished(DeliveryReport::console(reason))
    }
}

