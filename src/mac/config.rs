
use ieee802154::mac::{PanId, ShortAddress};

use crate::attr::{DevMode, ExtendedAddr, EADDR_LEN};

/// Short address value indicating no short address is assigned
pub const SADDR_UNSPEC: ShortAddress = ShortAddress(0xffff);

/// Unspecified PAN ID (not associated)
pub const PANID_UNSPEC: PanId = PanId(0xffff);

/// Initial MAC address and mode state
#[derive(Clone, PartialEq, Debug)]
pub struct MacConfig {
    pub pan_id: PanId,

    /// Short address, [`SADDR_UNSPEC`] if not yet assigned
    pub short_address: ShortAddress,

    /// Extended (EUI-64) address bytes, held as given
    pub extended_address: ExtendedAddr,

    pub devmode: DevMode,
}

impl Default for MacConfig {
    fn default() -> Self {
        Self {
            pan_id: PANID_UNSPEC,
            short_address: SADDR_UNSPEC,
            extended_address: [0u8; EADDR_LEN],
            devmode: DevMode::Endpoint,
        }
    }
}

impl MacConfig {
    pub fn new(pan_id: u16, extended_address: ExtendedAddr) -> Self {
        Self {
            pan_id: PanId(pan_id),
            extended_address,
            ..Default::default()
        }
    }
}
