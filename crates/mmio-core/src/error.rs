//! Error taxonomy for address resolution and argument parsing.
//!
//! Every rejection carries the offending literal input so the CLI can
//! echo it back verbatim. All of these are terminal for one invocation;
//! there is no retry path.

use thiserror::Error;

use crate::width::AccessWidth;

/// Rejection classes produced by address resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Text did not parse to a usable 32-bit physical address: empty,
    /// non-hex, out of range, or one of the `strtoul` sentinel values
    /// (`0` and `0xFFFFFFFF`).
    #[error("Invalid address \"{text}\"")]
    InvalidAddress {
        /// Offending address text.
        text: String,
    },
    /// Address is not a multiple of the requested access width.
    #[error("Misaligned address \"{text}\" is not allowed")]
    MisalignedAddress {
        /// Offending address text.
        text: String,
        /// Width the alignment was checked against.
        width: AccessWidth,
    },
    /// The 20-bit-aligned base is not a whitelisted register block.
    #[error("Refusing to touch unknown register range: {region_base:#010X}!  Typo?")]
    UnknownRegion {
        /// Rejected region base.
        region_base: u32,
    },
}

/// Rejected CLI `length` argument text.
///
/// Printed as-is, without the `ERROR:` prefix the other rejections get.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid length: \"{text}\"")]
pub struct WidthParseError {
    /// Offending length text.
    pub text: String,
}

/// Rejected write-value text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value \"{text}\"")]
pub struct ValueParseError {
    /// Offending value text.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::{ResolveError, ValueParseError, WidthParseError};
    use crate::width::AccessWidth;

    #[test]
    fn rejections_echo_the_offending_input() {
        let invalid = ResolveError::InvalidAddress {
            text: "zzz".to_owned(),
        };
        assert_eq!(invalid.to_string(), "Invalid address \"zzz\"");

        let misaligned = ResolveError::MisalignedAddress {
            text: "0D000003".to_owned(),
            width: AccessWidth::Word,
        };
        assert_eq!(
            misaligned.to_string(),
            "Misaligned address \"0D000003\" is not allowed"
        );

        let unknown = ResolveError::UnknownRegion {
            region_base: 0x0D90_0000,
        };
        assert_eq!(
            unknown.to_string(),
            "Refusing to touch unknown register range: 0x0D900000!  Typo?"
        );
    }

    #[test]
    fn argument_errors_echo_the_offending_input() {
        let width = WidthParseError {
            text: "3".to_owned(),
        };
        assert_eq!(width.to_string(), "Invalid length: \"3\"");

        let value = ValueParseError {
            text: "0xGG".to_owned(),
        };
        assert_eq!(value.to_string(), "invalid value \"0xGG\"");
    }
}
