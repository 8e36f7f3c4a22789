//! Width-typed load/store dispatch over a mapped register window.

use crate::region::REGION_GRANULE_BYTES;
use crate::width::AccessWidth;

/// Byte-addressable view over one mapped hardware window.
///
/// Implementors expose native-endian typed loads and stores at byte
/// offsets the resolver has already bounds- and alignment-checked. The
/// CLI supplies the real device-backed implementation; tests use
/// [`BufferWindow`].
pub trait RegisterWindow {
    /// Loads one byte at `offset`.
    fn load8(&self, offset: u32) -> u8;
    /// Loads one native-endian halfword at `offset`.
    fn load16(&self, offset: u32) -> u16;
    /// Loads one native-endian word at `offset`.
    fn load32(&self, offset: u32) -> u32;
    /// Stores one byte at `offset`.
    fn store8(&mut self, offset: u32, value: u8);
    /// Stores one native-endian halfword at `offset`.
    fn store16(&mut self, offset: u32, value: u16);
    /// Stores one native-endian word at `offset`.
    fn store32(&mut self, offset: u32, value: u32);
}

/// Reads one register at `offset`, zero-extending to 32 bits.
///
/// The dispatch is exhaustive over the three legal widths and no case
/// touches more bytes than its width names.
#[must_use]
pub fn read_register<W: RegisterWindow + ?Sized>(
    window: &W,
    offset: u32,
    width: AccessWidth,
) -> u32 {
    match width {
        AccessWidth::Byte => u32::from(window.load8(offset)),
        AccessWidth::Half => u32::from(window.load16(offset)),
        AccessWidth::Word => window.load32(offset),
    }
}

/// Writes one register at `offset`, truncating `value` to `width`.
///
/// Returns the value actually stored. Narrow-store semantics: bits
/// above the width are discarded, not rejected.
#[allow(clippy::cast_possible_truncation)]
pub fn write_register<W: RegisterWindow + ?Sized>(
    window: &mut W,
    offset: u32,
    width: AccessWidth,
    value: u32,
) -> u32 {
    match width {
        AccessWidth::Byte => window.store8(offset, value as u8),
        AccessWidth::Half => window.store16(offset, value as u16),
        AccessWidth::Word => window.store32(offset, value),
    }
    value & width.value_mask()
}

/// Plain memory-backed window covering one region granule.
///
/// Stands in for the device mapping in host-side tests, where real
/// hardware side effects cannot be asserted.
#[derive(Debug, Clone)]
pub struct BufferWindow {
    bytes: Box<[u8]>,
}

impl BufferWindow {
    /// Allocates a zeroed window of one region granule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: vec![0; REGION_GRANULE_BYTES as usize].into_boxed_slice(),
        }
    }

    /// Raw view of the backing bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for BufferWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn index(offset: u32) -> usize {
    offset as usize
}

impl RegisterWindow for BufferWindow {
    fn load8(&self, offset: u32) -> u8 {
        self.bytes[index(offset)]
    }

    fn load16(&self, offset: u32) -> u16 {
        let i = index(offset);
        let mut raw = [0_u8; 2];
        raw.copy_from_slice(&self.bytes[i..i + 2]);
        u16::from_ne_bytes(raw)
    }

    fn load32(&self, offset: u32) -> u32 {
        let i = index(offset);
        let mut raw = [0_u8; 4];
        raw.copy_from_slice(&self.bytes[i..i + 4]);
        u32::from_ne_bytes(raw)
    }

    fn store8(&mut self, offset: u32, value: u8) {
        self.bytes[index(offset)] = value;
    }

    fn store16(&mut self, offset: u32, value: u16) {
        let i = index(offset);
        self.bytes[i..i + 2].copy_from_slice(&value.to_ne_bytes());
    }

    fn store32(&mut self, offset: u32, value: u32) {
        let i = index(offset);
        self.bytes[i..i + 4].copy_from_slice(&value.to_ne_bytes());
    }
}
