//! Session controller and its presentation-layer boundary.
//!
//! - `phase` - SessionPhase state machine
//! - `update` - SessionUpdate (out), SessionCommand (in), SubmitOutcome
//! - `cancel` - CancelHandle
//! - `controller` - SessionController

mod cancel;
mod controller;
mod phase;
mod update;

pub use cancel::CancelHandle;
pub use controller::SessionController;
pub use phase::SessionPhase;
pub use update::{SessionCommand, SessionUpdate, SubmitOutcome};
