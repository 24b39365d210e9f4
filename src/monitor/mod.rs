pub mod controller;
pub mod display;
pub mod error;
pub mod poller;

pub use controller::{MonitorOutcome, TaskMonitor};
