//! Physical-memory device capability: open, map, volatile access.
//!
//! The device is opened read-write with `O_SYNC` so register accesses
//! are not cached, and exactly one fixed-size window is mapped per
//! invocation. [`MappedWindow`] owns the mapping and releases it in
//! `Drop`, so every exit path, including early error returns, unmaps
//! before the handle closes.

use std::ffi::c_void;
use std::fs::{File, OpenOptions};
use std::io;
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::ptr::{self, NonNull};

use mmio_core::{RegisterWindow, MAP_WINDOW_BYTES, REGION_GRANULE_BYTES};
use nix::sys::mman::{mmap, munmap, MapFlags, ProtFlags};
use thiserror::Error;

/// Default physical-memory special file.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/mem";

/// Environment variable overriding the device path. Integration tests
/// point this at a sparse regular file standing in for `/dev/mem`.
pub const DEVICE_PATH_ENV: &str = "MMIO_TOOL_DEVICE";

const WINDOW_LEN: NonZeroUsize = match NonZeroUsize::new(MAP_WINDOW_BYTES) {
    Some(len) => len,
    None => panic!("mapped window length must be non-zero"),
};

/// Fatal device-layer failures. Both abort the invocation with the
/// underlying OS diagnostic; neither leaves a mapping behind.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The physical-memory device could not be opened read-write.
    #[error("open failed: {path}: {source}")]
    DeviceUnavailable {
        /// Device path that failed to open.
        path: PathBuf,
        /// Underlying OS diagnostic.
        source: io::Error,
    },
    /// The fixed-size window could not be mapped at the region base.
    #[error("mmap failed at {region_base:#010X}: {source}")]
    MapFailed {
        /// Requested window base.
        region_base: u32,
        /// Underlying OS diagnostic.
        source: nix::Error,
    },
}

/// Open read-write handle to the physical-memory device.
#[derive(Debug)]
pub struct PhysicalMemory {
    file: File,
}

impl PhysicalMemory {
    /// Resolves the device path: environment override, then `/dev/mem`.
    #[must_use]
    pub fn device_path() -> PathBuf {
        std::env::var_os(DEVICE_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_DEVICE_PATH), PathBuf::from)
    }

    /// Opens the device for simultaneous read/write with `O_SYNC`
    /// (uncached-consistency) semantics.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::DeviceUnavailable`] when the open fails.
    pub fn open(path: &Path) -> Result<Self, DeviceError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)
            .map_err(|source| DeviceError::DeviceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { file })
    }

    /// Maps one fixed-size window at `region_base`, shareable and
    /// read-write. The returned window borrows the device so the
    /// handle outlives the mapping.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::MapFailed`] when the kernel rejects the
    /// mapping.
    pub fn map_window(&self, region_base: u32) -> Result<MappedWindow<'_>, DeviceError> {
        let offset = libc::off_t::try_from(region_base).map_err(|_| DeviceError::MapFailed {
            region_base,
            source: nix::errno::Errno::EOVERFLOW,
        })?;
        // SAFETY: length is a non-zero constant, the fd is valid, and
        // the mapping is exclusively owned by the returned window.
        let base = unsafe {
            mmap(
                None,
                WINDOW_LEN,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_SHARED,
                &self.file,
                offset,
            )
        }
        .map_err(|source| DeviceError::MapFailed {
            region_base,
            source,
        })?;
        Ok(MappedWindow {
            base,
            region_base,
            _device: PhantomData,
        })
    }
}

/// RAII mapping of one fixed-size window over the device.
///
/// Accesses are volatile so register loads and stores are never elided
/// or widened by the compiler. `Drop` unmaps unconditionally.
#[derive(Debug)]
pub struct MappedWindow<'dev> {
    base: NonNull<c_void>,
    region_base: u32,
    _device: PhantomData<&'dev PhysicalMemory>,
}

impl MappedWindow<'_> {
    /// Window base this mapping is anchored at.
    #[must_use]
    pub const fn region_base(&self) -> u32 {
        self.region_base
    }

    fn register_ptr(&self, offset: u32, width_bytes: u32) -> *mut u8 {
        // The resolver guarantees this; the assert is the last fence
        // before raw hardware.
        assert!(
            offset < REGION_GRANULE_BYTES && width_bytes <= REGION_GRANULE_BYTES - offset,
            "register offset {offset:#X} outside the validated window"
        );
        // SAFETY: offset stays inside the mapped window length.
        unsafe { self.base.as_ptr().cast::<u8>().add(offset as usize) }
    }
}

impl RegisterWindow for MappedWindow<'_> {
    fn load8(&self, offset: u32) -> u8 {
        // SAFETY: pointer is inside the live mapping, width-checked.
        unsafe { ptr::read_volatile(self.register_ptr(offset, 1)) }
    }

    fn load16(&self, offset: u32) -> u16 {
        // SAFETY: as above; offset is halfword-aligned by the resolver.
        unsafe { ptr::read_volatile(self.register_ptr(offset, 2).cast::<u16>()) }
    }

    fn load32(&self, offset: u32) -> u32 {
        // SAFETY: as above; offset is word-aligned by the resolver.
        unsafe { ptr::read_volatile(self.register_ptr(offset, 4).cast::<u32>()) }
    }

    fn store8(&mut self, offset: u32, value: u8) {
        // SAFETY: pointer is inside the live mapping, width-checked.
        unsafe { ptr::write_volatile(self.register_ptr(offset, 1), value) };
    }

    fn store16(&mut self, offset: u32, value: u16) {
        // SAFETY: as above; offset is halfword-aligned by the resolver.
        unsafe { ptr::write_volatile(self.register_ptr(offset, 2).cast::<u16>(), value) };
    }

    fn store32(&mut self, offset: u32, value: u32) {
        // SAFETY: as above; offset is word-aligned by the resolver.
        unsafe { ptr::write_volatile(self.register_ptr(offset, 4).cast::<u32>(), value) };
    }
}

impl Drop for MappedWindow<'_> {
    fn drop(&mut self) {
        // SAFETY: base/length describe exactly the mapping created in
        // map_window; the pointer is never used after this.
        if let Err(err) = unsafe { munmap(self.base, MAP_WINDOW_BYTES) } {
            eprintln!("WARN: munmap failed: {err}");
        }
    }
}
