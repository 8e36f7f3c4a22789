//! Command-line plumbing and the physical-memory device capability for
//! the Wii-Linux MMIO tools.
//!
//! The `mmio-tool` binary is the general variant (caller-selected
//! access width); `mmio-tool32` is the fixed 32-bit variant. Both share
//! one invocation flow over the resolver profiles in `mmio-core`.

/// Argument shapes for the two tool variants.
pub mod args;
pub use args::{Invocation, Operation, ParsedArgs, UsageError};

/// Physical-memory device: open, map, volatile width-typed access.
pub mod device;
pub use device::{DeviceError, MappedWindow, PhysicalMemory, DEFAULT_DEVICE_PATH, DEVICE_PATH_ENV};

/// One-shot invocation flow: resolve, map, access, report.
pub mod app;
pub use app::{run, AppError};
