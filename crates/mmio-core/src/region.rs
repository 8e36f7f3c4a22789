//! Hardware register-region map and resolver profiles.
//!
//! The whitelist below is purely a safety fence against address typos
//! reaching arbitrary physical memory. It encodes no knowledge of the
//! register layout inside each block.

use crate::width::AccessWidth;

/// One region granule: a 20-bit-aligned 1 MiB slice of physical space.
pub const REGION_GRANULE_BYTES: u32 = 0x0010_0000;
/// Mask isolating the 20-bit-aligned region base of a physical address.
pub const REGION_BASE_MASK: u32 = 0x0FF0_0000;
/// Mask isolating the in-region byte offset of a physical address.
pub const REGION_OFFSET_MASK: u32 = 0x000F_FFFF;
/// Bits 30-31: the legacy SDK/libogc virtual-address offset.
pub const LEGACY_VIRTUAL_BITS: u32 = 0xC000_0000;
/// Bytes mapped per window, spanning the largest supported region granule.
pub const MAP_WINDOW_BYTES: usize = 0x00F0_0000;

const _: () = assert!(
    MAP_WINDOW_BYTES >= REGION_GRANULE_BYTES as usize,
    "mapped window must span at least one region granule"
);

/// Known hardware register blocks accepted by address resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardwareRegion {
    /// GX embedded framebuffer (first hardware generation).
    GxEfb,
    /// Legacy Flipper registers.
    Flipper,
    /// Hollywood registers.
    Hollywood,
    /// Hollywood registers (mirrored).
    HollywoodMirror,
}

impl HardwareRegion {
    /// Physical base address of this register block.
    #[must_use]
    pub const fn base(self) -> u32 {
        match self {
            Self::GxEfb => 0x0800_0000,
            Self::Flipper => 0x0C00_0000,
            Self::Hollywood => 0x0D00_0000,
            Self::HollywoodMirror => 0x0D80_0000,
        }
    }
}

/// Address-resolver configuration: which register blocks are accepted
/// and whether the access width is fixed or caller-selectable.
///
/// Both observed tool variants are the same resolver under two
/// profiles; they differ only in whitelist membership and width policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverProfile {
    allowed: &'static [HardwareRegion],
    fixed_width: Option<AccessWidth>,
}

impl ResolverProfile {
    /// General tool profile: all four blocks, caller-selected width.
    pub const GENERAL: Self = Self {
        allowed: &[
            HardwareRegion::GxEfb,
            HardwareRegion::Flipper,
            HardwareRegion::Hollywood,
            HardwareRegion::HollywoodMirror,
        ],
        fixed_width: None,
    };

    /// Word-only profile: no GX EFB block, width pinned to 32 bits.
    pub const WORD_ONLY: Self = Self {
        allowed: &[
            HardwareRegion::Flipper,
            HardwareRegion::Hollywood,
            HardwareRegion::HollywoodMirror,
        ],
        fixed_width: Some(AccessWidth::Word),
    };

    /// Register blocks this profile accepts.
    #[must_use]
    pub const fn allowed(&self) -> &'static [HardwareRegion] {
        self.allowed
    }

    /// Width pinned by this profile, if any.
    #[must_use]
    pub const fn fixed_width(&self) -> Option<AccessWidth> {
        self.fixed_width
    }

    /// Width actually used when the caller requested `requested`.
    #[must_use]
    pub const fn effective_width(&self, requested: AccessWidth) -> AccessWidth {
        match self.fixed_width {
            Some(width) => width,
            None => requested,
        }
    }

    /// Returns `true` when `region_base` is a whitelisted block base.
    #[must_use]
    pub fn permits_base(&self, region_base: u32) -> bool {
        self.allowed
            .iter()
            .any(|region| region.base() == region_base)
    }
}
