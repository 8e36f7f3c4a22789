//! Command-line argument shapes for the two tool variants.
//!
//! General variant: `mmio-tool <mode> <address> <length> [value]`.
//! Fixed-width variant: `mmio-tool32 <mode> <address> [value]`.
//! `value` is required for writes and forbidden for reads.

use std::ffi::OsString;

use mmio_core::{parse_value, AccessWidth, ValueParseError, WidthParseError};
use thiserror::Error;

/// Requested operation for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Load and report one register value.
    Read,
    /// Store one (possibly width-truncated) value.
    Write(u32),
}

/// One fully parsed tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Address text exactly as supplied; resolution echoes it verbatim.
    pub address_text: String,
    /// Requested access width.
    pub width: AccessWidth,
    /// Read, or write with the parsed value.
    pub operation: Operation,
}

/// Outcome of argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedArgs {
    /// A runnable invocation.
    Invocation(Invocation),
    /// `-h`/`--help` was requested.
    Help,
}

/// Argument-shape rejections; all print the usage text and exit 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// Wrong number of arguments for the mode.
    #[error("wrong number of arguments")]
    WrongArity,
    /// Mode token was neither `r` nor `w`.
    #[error("Invalid mode \"{text}\"")]
    InvalidMode {
        /// Offending mode text.
        text: String,
    },
    /// Length token was not one of `1`, `2`, `4`.
    #[error(transparent)]
    InvalidLength(#[from] WidthParseError),
    /// Write value did not parse as base-16.
    #[error(transparent)]
    InvalidValue(#[from] ValueParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Read,
    Write,
}

fn parse_mode(text: &str) -> Result<Mode, UsageError> {
    match text {
        "r" => Ok(Mode::Read),
        "w" => Ok(Mode::Write),
        other => Err(UsageError::InvalidMode {
            text: other.to_owned(),
        }),
    }
}

fn finish_operation(mode: Mode, value_text: Option<&String>) -> Result<Operation, UsageError> {
    match (mode, value_text) {
        (Mode::Read, None) => Ok(Operation::Read),
        (Mode::Write, Some(text)) => Ok(Operation::Write(parse_value(text)?)),
        // Value present on read, or absent on write.
        (Mode::Read, Some(_)) | (Mode::Write, None) => Err(UsageError::WrongArity),
    }
}

fn collect(args: impl Iterator<Item = OsString>) -> Vec<String> {
    args.map(|arg| arg.to_string_lossy().into_owned()).collect()
}

fn is_help(args: &[String]) -> bool {
    args.first()
        .is_some_and(|first| first == "-h" || first == "--help")
}

/// Parses general-variant arguments: `<mode> <address> <length> [value]`.
///
/// # Errors
///
/// Returns [`UsageError`] for wrong arity, an unknown mode, an illegal
/// length, or an unparseable write value.
pub fn parse_general(args: impl Iterator<Item = OsString>) -> Result<ParsedArgs, UsageError> {
    let args = collect(args);
    if is_help(&args) {
        return Ok(ParsedArgs::Help);
    }
    if args.len() < 3 || args.len() > 4 {
        return Err(UsageError::WrongArity);
    }

    let mode = parse_mode(&args[0])?;
    let width = AccessWidth::from_cli_arg(&args[2])?;
    let operation = finish_operation(mode, args.get(3))?;

    Ok(ParsedArgs::Invocation(Invocation {
        address_text: args[1].clone(),
        width,
        operation,
    }))
}

/// Parses fixed-width-variant arguments: `<mode> <address> [value]`.
///
/// The width is always [`AccessWidth::Word`]; the resolver profile pins
/// it regardless.
///
/// # Errors
///
/// Returns [`UsageError`] for wrong arity, an unknown mode, or an
/// unparseable write value.
pub fn parse_word_only(args: impl Iterator<Item = OsString>) -> Result<ParsedArgs, UsageError> {
    let args = collect(args);
    if is_help(&args) {
        return Ok(ParsedArgs::Help);
    }
    if args.len() < 2 || args.len() > 3 {
        return Err(UsageError::WrongArity);
    }

    let mode = parse_mode(&args[0])?;
    let operation = finish_operation(mode, args.get(2))?;

    Ok(ParsedArgs::Invocation(Invocation {
        address_text: args[1].clone(),
        width: AccessWidth::Word,
        operation,
    }))
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use mmio_core::AccessWidth;

    use super::{parse_general, parse_word_only, Invocation, Operation, ParsedArgs, UsageError};

    fn general(args: &[&str]) -> Result<ParsedArgs, UsageError> {
        parse_general(args.iter().map(OsString::from))
    }

    fn word_only(args: &[&str]) -> Result<ParsedArgs, UsageError> {
        parse_word_only(args.iter().map(OsString::from))
    }

    #[test]
    fn parses_a_general_read() {
        let parsed = general(&["r", "0D800000", "4"]).expect("read must parse");
        assert_eq!(
            parsed,
            ParsedArgs::Invocation(Invocation {
                address_text: "0D800000".to_owned(),
                width: AccessWidth::Word,
                operation: Operation::Read,
            })
        );
    }

    #[test]
    fn parses_a_general_write() {
        let parsed = general(&["w", "0C000010", "1", "FF"]).expect("write must parse");
        assert_eq!(
            parsed,
            ParsedArgs::Invocation(Invocation {
                address_text: "0C000010".to_owned(),
                width: AccessWidth::Byte,
                operation: Operation::Write(0xFF),
            })
        );
    }

    #[test]
    fn rejects_wrong_argument_counts() {
        assert_eq!(general(&[]), Err(UsageError::WrongArity));
        assert_eq!(general(&["r"]), Err(UsageError::WrongArity));
        assert_eq!(general(&["w", "0D000000"]), Err(UsageError::WrongArity));
        assert_eq!(
            general(&["r", "0D000000", "4", "FF", "extra"]),
            Err(UsageError::WrongArity)
        );
    }

    #[test]
    fn rejects_value_arity_mismatches() {
        // Value forbidden for reads.
        assert_eq!(
            general(&["r", "0D000000", "4", "FF"]),
            Err(UsageError::WrongArity)
        );
        // Value required for writes.
        assert_eq!(
            general(&["w", "0D000000", "4"]),
            Err(UsageError::WrongArity)
        );
    }

    #[test]
    fn rejects_unknown_modes() {
        assert_eq!(
            general(&["x", "0D000000", "4"]),
            Err(UsageError::InvalidMode {
                text: "x".to_owned()
            })
        );
        assert_eq!(
            general(&["R", "0D000000", "4"]),
            Err(UsageError::InvalidMode {
                text: "R".to_owned()
            })
        );
    }

    #[test]
    fn rejects_illegal_lengths() {
        assert!(matches!(
            general(&["r", "0D000000", "3"]),
            Err(UsageError::InvalidLength(_))
        ));
        assert!(matches!(
            general(&["r", "0D000000", "word"]),
            Err(UsageError::InvalidLength(_))
        ));
    }

    #[test]
    fn rejects_unparseable_write_values() {
        assert!(matches!(
            general(&["w", "0D000000", "4", "junk"]),
            Err(UsageError::InvalidValue(_))
        ));
    }

    #[test]
    fn parses_help_flags() {
        assert_eq!(general(&["--help"]), Ok(ParsedArgs::Help));
        assert_eq!(general(&["-h"]), Ok(ParsedArgs::Help));
        assert_eq!(word_only(&["--help"]), Ok(ParsedArgs::Help));
    }

    #[test]
    fn word_only_variant_takes_no_length() {
        let parsed = word_only(&["r", "0D800000"]).expect("read must parse");
        assert_eq!(
            parsed,
            ParsedArgs::Invocation(Invocation {
                address_text: "0D800000".to_owned(),
                width: AccessWidth::Word,
                operation: Operation::Read,
            })
        );

        let parsed = word_only(&["w", "0D800000", "CAFE"]).expect("write must parse");
        assert!(matches!(
            parsed,
            ParsedArgs::Invocation(Invocation {
                operation: Operation::Write(0xCAFE),
                ..
            })
        ));

        assert_eq!(
            word_only(&["r", "0D800000", "4"]),
            Err(UsageError::WrongArity)
        );
        assert_eq!(word_only(&["w", "0D800000"]), Err(UsageError::WrongArity));
    }
}
