//! Small client helpers with no state of their own.

pub mod dark_mode;
pub mod severity;
