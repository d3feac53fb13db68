//! Process-wide editor defaults
//!
//! Holds the palette new editors start with. The value can be set once,
//! before or after editors are created; editors read it at construction and
//! never observe later changes.

use std::sync::OnceLock;

use crate::palette::PaletteId;

static DEFAULT_PALETTE: OnceLock<PaletteId> = OnceLock::new();

/// Set the process default palette.
///
/// Returns `Err` with the palette already in effect if it was set before.
pub fn init_default_palette(id: PaletteId) -> Result<(), PaletteId> {
    DEFAULT_PALETTE.set(id).map_err(|_| default_palette())?;
    tracing::debug!("default palette set to {:?}", id);
    Ok(())
}

/// The palette new editors start with (Dark unless initialised otherwise)
pub fn default_palette() -> PaletteId {
    DEFAULT_PALETTE.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_is_init_once() {
        // Tests share the process, so only the second call's outcome is fixed.
        let _ = init_default_palette(PaletteId::Dark);
        let current = default_palette();
        assert_eq!(init_default_palette(PaletteId::Light), Err(current));
        assert_eq!(default_palette(), current);
    }
}
