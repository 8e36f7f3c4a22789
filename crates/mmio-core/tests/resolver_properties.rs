//! Property coverage for address classification and window accesses.

#![allow(clippy::pedantic, clippy::nursery)]

use mmio_core::{
    read_register, resolve, write_register, AccessWidth, BufferWindow, ResolveError,
    ResolverProfile, LEGACY_VIRTUAL_BITS, REGION_BASE_MASK, REGION_GRANULE_BYTES,
    REGION_OFFSET_MASK,
};
use proptest::prelude::*;
use rstest as _;
use thiserror as _;

fn any_width() -> impl Strategy<Value = AccessWidth> {
    prop_oneof![
        Just(AccessWidth::Byte),
        Just(AccessWidth::Half),
        Just(AccessWidth::Word),
    ]
}

/// Mirror of the documented classification rules, used as the model.
fn classify(profile: &ResolverProfile, address: u32, width: AccessWidth) -> Option<&'static str> {
    let width = profile.effective_width(width);
    if address == 0 || address == u32::MAX {
        return Some("invalid");
    }
    if address & width.alignment_mask() != 0 {
        return Some("misaligned");
    }
    let masked = address & !LEGACY_VIRTUAL_BITS;
    if !profile.permits_base(masked & REGION_BASE_MASK) {
        return Some("unknown");
    }
    None
}

proptest! {
    #[test]
    fn classification_matches_the_model(address in any::<u32>(), width in any_width()) {
        for profile in [ResolverProfile::GENERAL, ResolverProfile::WORD_ONLY] {
            let text = format!("{address:08X}");
            let outcome = resolve(&profile, &text, width);
            match classify(&profile, address, width) {
                Some("invalid") => {
                    prop_assert_eq!(outcome, Err(ResolveError::InvalidAddress { text }));
                }
                Some("misaligned") => {
                    let misaligned = matches!(outcome, Err(ResolveError::MisalignedAddress { .. }));
                    prop_assert!(misaligned, "expected misaligned rejection for {}", text);
                }
                Some("unknown") => {
                    let unknown = matches!(outcome, Err(ResolveError::UnknownRegion { .. }));
                    prop_assert!(unknown, "expected unknown-region rejection for {}", text);
                }
                _ => {
                    let resolution = outcome.expect("model says this address resolves");
                    let masked = address & !LEGACY_VIRTUAL_BITS;
                    prop_assert_eq!(resolution.region.region_base, masked & REGION_BASE_MASK);
                    prop_assert_eq!(resolution.region.region_offset, masked & REGION_OFFSET_MASK);
                    prop_assert!(resolution.region.region_offset < REGION_GRANULE_BYTES);
                    prop_assert_eq!(
                        resolution.legacy_fixup.is_some(),
                        address & LEGACY_VIRTUAL_BITS != 0
                    );
                }
            }
        }
    }

    #[test]
    fn fixup_preserves_everything_below_the_top_two_bits(
        address in 1_u32..u32::MAX,
        width in any_width(),
    ) {
        let text = format!("{address:08X}");
        if let Ok(resolution) = resolve(&ResolverProfile::GENERAL, &text, width) {
            let folded = address & !LEGACY_VIRTUAL_BITS;
            prop_assert_eq!(
                resolution.region.absolute(),
                folded & (REGION_BASE_MASK | REGION_OFFSET_MASK)
            );
            if let Some(fixup) = resolution.legacy_fixup {
                prop_assert_eq!(fixup.original, address);
                prop_assert_eq!(fixup.masked, folded);
            }
        }
    }

    #[test]
    fn write_then_read_returns_the_truncated_value(
        slot in 0_u32..(REGION_GRANULE_BYTES / 4 - 1),
        value in any::<u32>(),
        width in any_width(),
    ) {
        let offset = slot * 4;
        let mut window = BufferWindow::new();
        let stored = write_register(&mut window, offset, width, value);
        prop_assert_eq!(stored, value & width.value_mask());
        prop_assert_eq!(read_register(&window, offset, width), stored);
    }

    #[test]
    fn stores_touch_exactly_width_bytes(
        slot in 1_u32..(REGION_GRANULE_BYTES / 4 - 1),
        width in any_width(),
    ) {
        let offset = slot * 4;
        let mut window = BufferWindow::new();
        write_register(&mut window, offset, width, u32::MAX);
        let touched = window.bytes().iter().filter(|byte| **byte != 0).count();
        prop_assert_eq!(touched, width.bytes() as usize);
        let first = window.bytes().iter().position(|byte| *byte != 0);
        prop_assert_eq!(first, Some(offset as usize));
    }
}
