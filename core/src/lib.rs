//! Drive-thru window kiosk core: staffing, readiness and shift sessions.

pub mod assignment;
pub mod clock;
pub mod command;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod event;
pub mod readiness;
pub mod role;
pub mod selection;
pub mod session;
pub mod sink;
pub mod snapshot;
pub mod store;
pub mod ticker;
pub mod tips;
pub mod types;
