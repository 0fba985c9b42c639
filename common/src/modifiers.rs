//! Explicit modifier state and the four-line modifier block.
//!
//! [`ModFlags`] mirrors the HID modifier byte. Left and right variants of a
//! key collapse into one displayed [`Modifier`].
//!
//! The block always lists the modifiers in [`Modifier::DISPLAY_ORDER`]. A held
//! modifier shows its label; a released one shows the same number of blanks,
//! so the block keeps one footprint whatever is held and nothing around it
//! shifts when a key goes down.

use heapless::String;

use crate::config::MODIFIER_BLOCK_LEN;

/// Text of the rendered modifier block.
pub type ModifierBlock = String<MODIFIER_BLOCK_LEN>;

/// HID modifier byte.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModFlags(u8);

impl ModFlags {
    pub const NONE: Self = Self(0);
    pub const LCTL: Self = Self(0x01);
    pub const LSFT: Self = Self(0x02);
    pub const LALT: Self = Self(0x04);
    pub const LGUI: Self = Self(0x08);
    pub const RCTL: Self = Self(0x10);
    pub const RSFT: Self = Self(0x20);
    pub const RALT: Self = Self(0x40);
    pub const RGUI: Self = Self(0x80);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self { Self(bits) }

    #[inline]
    pub const fn union(
        self,
        other: Self,
    ) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn difference(
        self,
        other: Self,
    ) -> Self {
        Self(self.0 & !other.0)
    }

    /// True if any bit of `other` is set.
    #[inline]
    pub const fn intersects(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    /// Whether either side of `modifier` is held.
    #[inline]
    pub const fn is_held(
        self,
        modifier: Modifier,
    ) -> bool {
        self.intersects(modifier.mask())
    }
}

/// A displayed modifier, both sides merged.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modifier {
    Shift,
    Ctrl,
    Gui,
    Alt,
}

impl Modifier {
    /// Top-to-bottom order of the modifier block.
    pub const DISPLAY_ORDER: [Self; 4] = [Self::Shift, Self::Ctrl, Self::Gui, Self::Alt];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Shift => "SHIFT",
            Self::Ctrl => "CTRL",
            Self::Gui => "GUI",
            Self::Alt => "ALT",
        }
    }

    /// Left and right bits of this modifier.
    pub const fn mask(self) -> ModFlags {
        match self {
            Self::Shift => ModFlags::LSFT.union(ModFlags::RSFT),
            Self::Ctrl => ModFlags::LCTL.union(ModFlags::RCTL),
            Self::Gui => ModFlags::LGUI.union(ModFlags::RGUI),
            Self::Alt => ModFlags::LALT.union(ModFlags::RALT),
        }
    }
}

/// Build the four-line block for `mods`.
///
/// Released modifiers become blanks as wide as their label. Lines are joined
/// with `\n`, no trailing separator.
pub fn compose_modifier_block(mods: ModFlags) -> ModifierBlock {
    let mut block = ModifierBlock::new();
    for (line, modifier) in Modifier::DISPLAY_ORDER.into_iter().enumerate() {
        if line > 0 {
            let _ = block.push('\n');
        }
        let label = modifier.label();
        if mods.is_held(modifier) {
            let _ = block.push_str(label);
        } else {
            for _ in 0..label.len() {
                let _ = block.push(' ');
            }
        }
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_and_right_collapse() {
        assert!(ModFlags::LSFT.is_held(Modifier::Shift));
        assert!(ModFlags::RSFT.is_held(Modifier::Shift));
        assert!(ModFlags::RGUI.is_held(Modifier::Gui));
        assert!(!ModFlags::LALT.is_held(Modifier::Ctrl));
    }

    #[test]
    fn test_block_shift_ctrl() {
        let mods = ModFlags::LSFT.union(ModFlags::RCTL);
        assert_eq!(compose_modifier_block(mods).as_str(), "SHIFT\nCTRL\n   \n   ");
    }

    #[test]
    fn test_block_nothing_held() {
        assert_eq!(compose_modifier_block(ModFlags::NONE).as_str(), "     \n    \n   \n   ");
    }

    #[test]
    fn test_block_everything_held() {
        assert_eq!(
            compose_modifier_block(ModFlags::from_bits(0xFF)).as_str(),
            "SHIFT\nCTRL\nGUI\nALT"
        );
    }

    #[test]
    fn test_block_length_is_constant() {
        let expected = compose_modifier_block(ModFlags::NONE).len();
        for bits in 0..=u8::MAX {
            let block = compose_modifier_block(ModFlags::from_bits(bits));
            assert_eq!(block.len(), expected, "Block length changed for mods {bits:#04x}");
        }
    }

    #[test]
    fn test_difference_clears_bits() {
        let mods = ModFlags::LSFT.union(ModFlags::LALT).difference(ModFlags::LSFT);
        assert_eq!(mods, ModFlags::LALT);
        assert!(ModFlags::NONE.is_empty());
    }
}
