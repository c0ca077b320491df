//! Everyday commands
//!
//! Each file adds one or two methods to `Repository`. Validation errors are
//! returned before any file is written, so a failed command leaves the
//! repository as it found it.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod status;
