//! Filesystem operations: staging discovery and publish relocation.

mod atomic;
mod copy;
mod discovery;
mod helpers;
mod relocate;
mod util;

pub use discovery::list_by_prefix;
pub use relocate::move_all;
