//! Core validation and access primitives for the Wii-Linux MMIO tool.
//!
//! Everything in this crate is pure: it turns user-supplied address and
//! value text into bounds-checked, whitelisted, alignment-checked window
//! offsets and performs width-typed loads and stores through the
//! [`RegisterWindow`] seam. The physical-memory device itself is an
//! external capability supplied by the CLI crate.

/// Access width model for 1/2/4-byte register accesses.
pub mod width;
pub use width::AccessWidth;

/// Hardware register-region map and resolver profiles.
pub mod region;
pub use region::{
    HardwareRegion, ResolverProfile, LEGACY_VIRTUAL_BITS, MAP_WINDOW_BYTES, REGION_BASE_MASK,
    REGION_GRANULE_BYTES, REGION_OFFSET_MASK,
};

/// Address validation and translation into window regions.
pub mod resolve;
pub use resolve::{parse_value, resolve, LegacyFixup, Resolution, ValidatedRegion};

/// Width-typed load/store dispatch over a register window.
pub mod access;
pub use access::{read_register, write_register, BufferWindow, RegisterWindow};

/// Error taxonomy for resolution and argument parsing.
pub mod error;
pub use error::{ResolveError, ValueParseError, WidthParseError};

#[cfg(test)]
use proptest as _;
