//! Fixed-width-variant CLI: one 32-bit read or write at a whitelisted
//! hardware register address. No GX EFB range, no length argument.

use std::env;

use libc as _;
use mmio_cli::app::run;
use mmio_cli::args::{parse_word_only, ParsedArgs, UsageError};
use mmio_core::ResolverProfile;
use nix as _;
#[cfg(test)]
use tempfile as _;
use thiserror as _;

const USAGE_TEXT: &str = concat!(
    "\
Usage: mmio-tool32 <mode> <address> [value]

Options:
	MODE:		Required.  Either 'r' or 'w', for read, or write.

	ADDRESS:	Required.  Hexadecimal address to access.
			Accesses are always 32 bits wide.

	VALUE:		Required for write, forbidden for read.
			The value to write to the provided address.

Environment:
	MMIO_TOOL_DEVICE:	Physical-memory device path (default: /dev/mem)

This is Wii-Linux mmio-tool32 v",
    env!("CARGO_PKG_VERSION"),
    "\n",
);

fn main() {
    let exit_code = match parse_word_only(env::args_os().skip(1)) {
        Ok(ParsedArgs::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParsedArgs::Invocation(invocation)) => {
            match run(&ResolverProfile::WORD_ONLY, &invocation) {
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
        // Arity and mode mistakes get the usage text alone. This
        // variant takes no length argument, so only the write value
        // can fail to parse here.
        Err(UsageError::WrongArity | UsageError::InvalidMode { .. }) => {
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
