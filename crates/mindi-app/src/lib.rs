pub mod controller;
pub mod scheduler;

pub use controller::{DeferredAction, GameController, Timings};
pub use scheduler::{Scheduled, Scheduler, TaskId};
