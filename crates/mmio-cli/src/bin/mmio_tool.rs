//! General-variant CLI: one read or write of 1, 2, or 4 bytes at a
//! whitelisted hardware register address.

use std::env;

use libc as _;
use mmio_cli::app::run;
use mmio_cli::args::{parse_general, ParsedArgs, UsageError};
use mmio_core::ResolverProfile;
use nix as _;
#[cfg(test)]
use tempfile as _;
use thiserror as _;

const USAGE_TEXT: &str = concat!(
    "\
Usage: mmio-tool <mode> <address> <length> [value]

Options:
	MODE:		Required.  Either 'r' or 'w', for read, or write.

	ADDRESS:	Required.  Hexadecimal address to access.

	LENGTH:		Required.  Valid values: 1, 2, 4

	VALUE:		Required for write, forbidden for read.
			The value to write to the provided address.

Environment:
	MMIO_TOOL_DEVICE:	Physical-memory device path (default: /dev/mem)

This is Wii-Linux mmio-tool v",
    env!("CARGO_PKG_VERSION"),
    "\n",
);

fn main() {
    let exit_code = match parse_general(env::args_os().skip(1)) {
        Ok(ParsedArgs::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParsedArgs::Invocation(invocation)) => {
            match run(&ResolverProfile::GENERAL, &invocation) {
                Ok(()) => 0,
                Err(err) if err.prints_usage() => {
                    println!("ERROR: {err}");
                    println!("{USAGE_TEXT}");
                    1
                }
                Err(err) => {
                    eprintln!("ERROR: {err}");
                    1
                }
            }
        }
        // Arity and mode mistakes get the usage text alone.
        Err(UsageError::WrongArity | UsageError::InvalidMode { .. }) => {
            println!("{USAGE_TEXT}");
            1
        }
        // The length rejection carries no ERROR prefix.
        Err(err @ UsageError::InvalidLength(_)) => {
            println!("{err}");
            println!("{USAGE_TEXT}");
            1
        }
        Err(err) => {
            println!("ERROR: {err}");
            println!("{USAGE_TEXT}");
            1
        }
    };
    std::process::exit(exit_code);
}
