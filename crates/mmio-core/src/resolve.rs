//! Address validation and translation into a mapped-window region.
//!
//! Resolution is a pure function from user text to a `(region_base,
//! region_offset)` pair. It never touches the physical-memory device.

use crate::error::{ResolveError, ValueParseError};
use crate::region::{
    ResolverProfile, LEGACY_VIRTUAL_BITS, REGION_BASE_MASK, REGION_OFFSET_MASK,
};
use crate::width::AccessWidth;

/// A whitelisted window base plus the in-window byte offset of the
/// requested register.
///
/// Invariants established by [`resolve`]: the base is a whitelisted
/// 20-bit-aligned block base, the offset is below one region granule,
/// and `base + offset` is aligned to the access width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatedRegion {
    /// 20-bit-aligned hardware window base.
    pub region_base: u32,
    /// Byte offset of the register within the window.
    pub region_offset: u32,
}

impl ValidatedRegion {
    /// Absolute physical address of the register.
    #[must_use]
    pub const fn absolute(self) -> u32 {
        self.region_base + self.region_offset
    }
}

/// Record of the legacy virtual-range fix-up applied during resolution.
///
/// Kept separate from the rejection path so callers (and tests) can
/// observe the advisory independently of whether resolution succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyFixup {
    /// Address exactly as parsed from user text.
    pub original: u32,
    /// Address after clearing bits 30-31.
    pub masked: u32,
}

/// Successful resolution: the validated region plus any advisory fix-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Validated window base and register offset.
    pub region: ValidatedRegion,
    /// Present when bits 30-31 were set and had to be cleared.
    pub legacy_fixup: Option<LegacyFixup>,
}

fn parse_hex_u32(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    // strtoul semantics: convert the longest leading run of hex digits
    // and ignore whatever follows. An empty run fails.
    let run = digits
        .find(|ch: char| !ch.is_ascii_hexdigit())
        .unwrap_or(digits.len());
    u32::from_str_radix(&digits[..run], 16).ok()
}

/// Resolves user-supplied address text into a validated window region.
///
/// The fixed steps: parse base-16, check alignment against the
/// profile's effective width on the raw value, clear the legacy
/// SDK/libogc bits 30-31 (recording an advisory when that changes the
/// value), split into base and offset, and check the base against the
/// profile whitelist.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidAddress`] for unparseable text or the
/// sentinel values `0` and `0xFFFFFFFF`, [`ResolveError::MisalignedAddress`]
/// when the raw address is not a multiple of the access width, and
/// [`ResolveError::UnknownRegion`] when the base is not whitelisted.
pub fn resolve(
    profile: &ResolverProfile,
    address_text: &str,
    width: AccessWidth,
) -> Result<Resolution, ResolveError> {
    let parsed = parse_hex_u32(address_text)
        // Zero and ULONG_MAX are the strtoul failure sentinels.
        .filter(|value| *value != 0 && *value != u32::MAX)
        .ok_or_else(|| ResolveError::InvalidAddress {
            text: address_text.to_owned(),
        })?;

    let width = profile.effective_width(width);
    if parsed & width.alignment_mask() != 0 {
        return Err(ResolveError::MisalignedAddress {
            text: address_text.to_owned(),
            width,
        });
    }

    let (value, legacy_fixup) = if parsed & LEGACY_VIRTUAL_BITS == 0 {
        (parsed, None)
    } else {
        let masked = parsed & !LEGACY_VIRTUAL_BITS;
        (
            masked,
            Some(LegacyFixup {
                original: parsed,
                masked,
            }),
        )
    };

    let region_base = value & REGION_BASE_MASK;
    let region_offset = value & REGION_OFFSET_MASK;
    if !profile.permits_base(region_base) {
        return Err(ResolveError::UnknownRegion { region_base });
    }

    Ok(Resolution {
        region: ValidatedRegion {
            region_base,
            region_offset,
        },
        legacy_fixup,
    })
}

/// Parses write-value text as base-16.
///
/// Unlike addresses, `0` and `0xFFFFFFFF` are legal values. No width
/// check is performed here: a value wider than the access width is
/// truncated by the width-typed store.
///
/// # Errors
///
/// Returns [`ValueParseError`] when the text has no leading hex digits
/// or the converted value does not fit in 32 bits.
pub fn parse_value(text: &str) -> Result<u32, ValueParseError> {
    parse_hex_u32(text).ok_or_else(|| ValueParseError {
        text: text.to_owned(),
    })
}
