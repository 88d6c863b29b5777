//! Embassy async tasks
//!
//! The trigger and refresh tasks run on the high-priority interrupt
//! executor; the controller runs in thread mode.

pub mod controller;
pub mod refresh;
pub mod trigger;

pub use controller::controller_task;
pub use refresh::refresh_task;
pub use trigger::trigger_task;
