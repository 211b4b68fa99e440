//! Single-user student grade roster.
//!
//! [`Student`] holds validated identity fields and per-subject scores;
//! [`StudentManager`] keeps the ordered roster and rewrites the JSON snapshot
//! after every change. The interactive menu lives in [`cli`].

pub mod calc;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod report;
pub mod store;
pub mod student;

pub use error::{Result, RosterError, ValidationError};
pub use manager::{StudentManager, StudentUpdate};
pub use store::SnapshotStore;
pub use student::{GradeStatus, Student, StudentRecord};
