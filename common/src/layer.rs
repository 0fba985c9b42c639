//! Active layer label.

use core::fmt::Write;

use heapless::String;

use crate::config::MAX_LAYER_LABEL_LEN;
use crate::host::KeyboardState;

/// Display text of the top layer.
pub type LayerLabel = String<MAX_LAYER_LABEL_LEN>;

/// Highest active layer and its configured name, if any.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LayerState<'a> {
    pub index: u8,
    pub name: Option<&'a str>,
}

impl<'a> LayerState<'a> {
    /// Read the topmost active layer from the keymap.
    ///
    /// Several layers can be active at once; only the highest one is shown,
    /// so this never looks at which layer an event toggled.
    pub fn current(host: &'a dyn KeyboardState) -> Self {
        let index = host.highest_active_layer();
        Self {
            index,
            name: host.layer_name(index),
        }
    }

    /// The name if there is one, else the index. Names longer than
    /// [`MAX_LAYER_LABEL_LEN`] bytes are cut at the last whole char that fits.
    pub fn label(&self) -> LayerLabel {
        let mut label = LayerLabel::new();
        match self.name {
            Some(name) if !name.is_empty() => {
                for c in name.chars() {
                    if label.push(c).is_err() {
                        break;
                    }
                }
            }
            _ => {
                let _ = write!(label, "{}", self.index);
            }
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeKeyboard;

    #[test]
    fn test_label_prefers_name() {
        let layer = LayerState {
            index: 3,
            name: Some("Nav"),
        };
        assert_eq!(layer.label().as_str(), "Nav");
    }

    #[test]
    fn test_label_falls_back_to_index() {
        let layer = LayerState { index: 7, name: None };
        assert_eq!(layer.label().as_str(), "7");
    }

    #[test]
    fn test_empty_name_falls_back_to_index() {
        let layer = LayerState {
            index: 12,
            name: Some(""),
        };
        assert_eq!(layer.label().as_str(), "12", "Label must never be blank");
    }

    #[test]
    fn test_long_name_is_truncated() {
        let layer = LayerState {
            index: 1,
            name: Some("Navigation And Media"),
        };
        let label = layer.label();
        assert_eq!(label.len(), MAX_LAYER_LABEL_LEN);
        assert_eq!(label.as_str(), "Navigation");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let layer = LayerState {
            index: 1,
            name: Some("ÄÄÄÄÄÄÄÄÄÄ"),
        };
        // Each char is two bytes, so only five fit.
        assert_eq!(layer.label().as_str(), "ÄÄÄÄÄ");
    }

    #[test]
    fn test_current_reads_highest_layer() {
        let mut keyboard = FakeKeyboard::new();
        keyboard.layer = 2;
        keyboard.layer_names[2] = Some("Sym");
        let layer = LayerState::current(&keyboard);
        assert_eq!(layer.index, 2);
        assert_eq!(layer.name, Some("Sym"));
    }
}
