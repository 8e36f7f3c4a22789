//! Access widths for width-typed hardware register accesses.

use crate::error::WidthParseError;

/// Byte width of one hardware register access.
///
/// Exactly three widths are legal; the tool never performs a wider or
/// narrower access than the one named here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AccessWidth {
    /// Single-byte access.
    Byte = 1,
    /// 16-bit halfword access.
    Half = 2,
    /// 32-bit word access.
    Word = 4,
}

impl AccessWidth {
    /// Parses the CLI `length` argument (decimal `1`, `2`, or `4`).
    ///
    /// # Errors
    ///
    /// Returns [`WidthParseError`] for any other text.
    pub fn from_cli_arg(text: &str) -> Result<Self, WidthParseError> {
        match text.trim() {
            "1" => Ok(Self::Byte),
            "2" => Ok(Self::Half),
            "4" => Ok(Self::Word),
            _ => Err(WidthParseError {
                text: text.to_owned(),
            }),
        }
    }

    /// Number of bytes moved by one access at this width.
    #[must_use]
    pub const fn bytes(self) -> u32 {
        self as u32
    }

    /// Low address bits that must be zero for an aligned access.
    #[must_use]
    pub const fn alignment_mask(self) -> u32 {
        self.bytes() - 1
    }

    /// Mask truncating a 32-bit value to this width.
    #[must_use]
    pub const fn value_mask(self) -> u32 {
        match self {
            Self::Byte => 0x0000_00FF,
            Self::Half => 0x0000_FFFF,
            Self::Word => 0xFFFF_FFFF,
        }
    }

    /// Hex digit count used when reporting a value of this width.
    #[must_use]
    pub const fn hex_digits(self) -> usize {
        match self {
            Self::Byte => 2,
            Self::Half => 4,
            Self::Word => 8,
        }
    }
}
