//! Hook pipeline for chatperms.
//!
//! Control flow per event: normalize → permission gate (access-controlling
//! hooks) → keyword scan + alert (content-bearing hooks) → warning
//! injection (outbound read hook) → normalized payload back to the host.

pub mod engine;
pub mod gate;
pub mod version;
pub mod warning;

pub use engine::HookEngine;
pub use gate::{check_can_chat, check_read_identity};
pub use version::{SUPPORTED_MAJOR_VERSION, is_compatible, parse_version};
pub use warning::{WARNING_KEY, inject_warning};
