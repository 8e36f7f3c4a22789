//! One-shot invocation flow: resolve, map, access, report.

use mmio_core::{read_register, resolve, write_register, ResolveError, ResolverProfile};
use thiserror::Error;

use crate::args::{Invocation, Operation};
use crate::device::{DeviceError, PhysicalMemory};

/// Failure classes for one invocation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Address validation rejected the request; usage text follows.
    #[error(transparent)]
    Rejected(#[from] ResolveError),
    /// Device open or mapping failed; only the OS diagnostic is shown.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl AppError {
    /// Whether the CLI should print the usage text after this error.
    #[must_use]
    pub const fn prints_usage(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Executes one parsed invocation against `profile`.
///
/// Resolution happens before the device is touched; the mapping is
/// created immediately before the single access and dropped immediately
/// after, on success and failure alike. Result and advisory lines go to
/// standard output.
///
/// # Errors
///
/// Returns [`AppError::Rejected`] for validation failures and
/// [`AppError::Device`] for open/map failures.
pub fn run(profile: &ResolverProfile, invocation: &Invocation) -> Result<(), AppError> {
    let resolution = resolve(profile, &invocation.address_text, invocation.width)?;
    if resolution.legacy_fixup.is_some() {
        println!("WARN: Attempting to touch address in SDK/libogc virtual range, fixing...");
    }

    let width = profile.effective_width(invocation.width);
    let address = resolution.region.absolute();
    let offset = resolution.region.region_offset;

    let device = PhysicalMemory::open(&PhysicalMemory::device_path())?;
    let mut window = device.map_window(resolution.region.region_base)?;

    match invocation.operation {
        Operation::Read => {
            let value = read_register(&window, offset, width);
            println!(
                "0x{address:08X}: {value:0digits$X}",
                digits = width.hex_digits()
            );
        }
        Operation::Write(value) => {
            write_register(&mut window, offset, width, value);
            // The report echoes the value as given; the store itself
            // keeps only width-many bytes. Width digits are a minimum,
            // so an oversized value prints in full.
            println!(
                "Successfully wrote 0x{value:0digits$X} to 0x{address:08X}",
                digits = width.hex_digits()
            );
        }
    }

    Ok(())
}
