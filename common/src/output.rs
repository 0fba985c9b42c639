//! Active output endpoint (USB or a BLE profile).

use core::fmt::Write;

use heapless::String;

use crate::config::OUTPUT_LABEL_LEN;

/// Display text of the output endpoint.
pub type OutputLabel = String<OUTPUT_LABEL_LEN>;

/// Where HID reports are currently sent.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endpoint {
    #[default]
    Usb,
    /// Zero-based BLE profile slot.
    Ble { profile: u8, connected: bool },
}

impl Endpoint {
    /// `USB`, `BT<n>` or `BT<n>?` when the profile has no live connection.
    /// Profiles are shown one-based.
    pub fn label(&self) -> OutputLabel {
        let mut label = OutputLabel::new();
        match *self {
            Self::Usb => {
                let _ = label.push_str("USB");
            }
            Self::Ble { profile, connected } => {
                let _ = write!(label, "BT{}", u16::from(profile) + 1);
                if !connected {
                    let _ = label.push('?');
                }
            }
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usb_label() {
        assert_eq!(Endpoint::Usb.label().as_str(), "USB");
    }

    #[test]
    fn test_ble_labels_are_one_based() {
        let connected = Endpoint::Ble {
            profile: 0,
            connected: true,
        };
        let waiting = Endpoint::Ble {
            profile: 2,
            connected: false,
        };
        assert_eq!(connected.label().as_str(), "BT1");
        assert_eq!(waiting.label().as_str(), "BT3?");
    }

    #[test]
    fn test_highest_profile_fits() {
        let endpoint = Endpoint::Ble {
            profile: u8::MAX,
            connected: false,
        };
        assert_eq!(endpoint.label().as_str(), "BT256?");
    }
}
