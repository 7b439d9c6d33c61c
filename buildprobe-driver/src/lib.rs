//! Process driver for buildprobe.
//!
//! One-shot, blocking invocation of an external build tool:
//! - The tool path is always injected explicitly, never discovered from the
//!   environment, so runs stay deterministic.
//! - A spawn failure (`LaunchError`) is a different thing from a non-zero
//!   exit, which is a normal [`ProcessResult`] for the caller to inspect.
//! - No timeout, no retry. A hung tool hangs the caller.

mod command;
mod result;

pub use command::{LaunchError, ToolCommand};
pub use result::ProcessResult;
