//! Software PHY PIB
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte
//
// Holds radio-owned attributes for transceivers that do not keep them in
// hardware, and mirrors the MAC address / mode state for frame filtering.

use core::convert::TryFrom;

use crate::log::{debug, trace};

use crate::attr::{Attr, AttrValue, MacAttr};
use crate::channels;
use crate::delegate::RadioDelegate;
use crate::error::PibError;
use crate::mac::{MacConfig, MacState};

/// 2.45 GHz O-QPSK synchronisation header duration in symbols
pub const SHR_DURATION: u32 = 10;

/// 2.45 GHz O-QPSK symbols per octet
pub const SYMBOLS_PER_OCTET: u32 = 2;

/// aMaxPHYPacketSize
pub const MAX_PHY_PACKET_SIZE: u32 = 127;

/// Maximum frame duration in symbols
pub const MAX_FRAME_DURATION: u32 = SHR_DURATION + (MAX_PHY_PACKET_SIZE + 1) * SYMBOLS_PER_OCTET;

/// Maximum value of macMaxFrameRetries
pub const MAX_FRAME_RETRIES: u8 = 7;

/// Clear Channel Assessment modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CcaMode {
    /// Energy above threshold
    Energy = 1,
    /// Carrier sense only
    CarrierSense = 2,
    /// Carrier sense with energy above threshold
    CarrierSenseEnergy = 3,
}

/// Radio payload for attributes held in a [`PhyPib`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyValue {
    /// Channel index
    Channel(u8),
    /// Channel page
    Page(u8),
    /// Supported channel bitmap
    ChannelMask(u32),
    /// Transmit power in dBm
    TxPower(i32),
    CcaMode(CcaMode),
    /// Duration in symbols
    Symbols(u32),
    /// FCS length in bytes
    FcsLen(u8),
    Flag(bool),
    Count(u8),
}

/// Initial PHY PIB state
#[derive(Debug, Clone, PartialEq)]
pub struct PhyConfig {
    pub channel: u8,
    pub page: u8,
    /// Transmit power in dBm
    pub tx_power: i32,
    pub cca_mode: CcaMode,
    pub fcs_len: u8,
    pub max_frame_retries: u8,
    pub promiscuous: bool,
    pub rx_on_when_idle: bool,
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self {
            channel: 26,
            page: 0,
            tx_power: 0,
            cca_mode: CcaMode::Energy,
            fcs_len: 2,
            max_frame_retries: 3,
            promiscuous: false,
            rx_on_when_idle: false,
        }
    }
}

/// PHY PIB held in software
#[derive(Debug, Clone, PartialEq)]
pub struct PhyPib {
    config: PhyConfig,
    mirror: MacState,
}

impl PhyPib {
    /// Create a PHY PIB with a default MAC mirror
    pub fn new(config: PhyConfig) -> Self {
        Self::with_mirror(config, MacConfig::default().into())
    }

    /// Create a PHY PIB mirroring the provided MAC state, for use with a
    /// [`MacPib`](crate::mac::MacPib) built from the same state
    pub fn with_mirror(config: PhyConfig, mirror: MacState) -> Self {
        Self {
            config,
            mirror,
        }
    }

    pub fn config(&self) -> &PhyConfig {
        &self.config
    }

    /// Fetch the MAC address / mode state mirrored from the MAC
    pub fn mirror(&self) -> &MacState {
        &self.mirror
    }

    fn get_phy(&self, attr: Attr) -> Result<PhyValue, PibError> {
        let c = &self.config;

        let v = match attr {
            Attr::PhyChannel => PhyValue::Channel(c.channel),
            Attr::PhyChannelsSupported => {
                let m = channels::page_mask(c.page).ok_or(PibError::InvalidParameter)?;
                PhyValue::ChannelMask(m)
            },
            Attr::PhyCurrentPage => PhyValue::Page(c.page),
            Attr::PhyTxPower => PhyValue::TxPower(c.tx_power),
            Attr::PhyCcaMode => PhyValue::CcaMode(c.cca_mode),
            Attr::PhyMaxFrameDuration => PhyValue::Symbols(MAX_FRAME_DURATION),
            Attr::PhyShrDuration => PhyValue::Symbols(SHR_DURATION),
            Attr::PhySymbolsPerOctet => PhyValue::Symbols(SYMBOLS_PER_OCTET),
            Attr::PhyFcsLen => PhyValue::FcsLen(c.fcs_len),
            Attr::MacMaxFrameRetries => PhyValue::Count(c.max_frame_retries),
            Attr::MacPromiscuousMode => PhyValue::Flag(c.promiscuous),
            Attr::MacRxOnWhenIdle => PhyValue::Flag(c.rx_on_when_idle),
            _ => return Err(PibError::UnsupportedAttribute),
        };

        Ok(v)
    }

    fn set_phy(&mut self, attr: Attr, value: &PhyValue) -> Result<(), PibError> {
        let known = self.get_phy(attr).is_ok();
        let c = &mut self.config;

        match (attr, value) {
            (Attr::PhyChannel, PhyValue::Channel(ch)) => {
                if !channels::page_contains(c.page, *ch) {
                    return Err(PibError::InvalidParameter);
                }
                c.channel = *ch;
            },
            (Attr::PhyCurrentPage, PhyValue::Page(p)) => {
                // Keep the current channel valid on the new page
                if !channels::page_contains(*p, c.channel) {
                    return Err(PibError::InvalidParameter);
                }
                c.page = *p;
            },
            (Attr::PhyTxPower, PhyValue::TxPower(p)) => {
                // phyTXPower is a 6-bit signed value
                if !(-32..=31).contains(p) {
                    return Err(PibError::InvalidParameter);
                }
                c.tx_power = *p;
            },
            (Attr::PhyCcaMode, PhyValue::CcaMode(m)) => c.cca_mode = *m,
            (Attr::PhyFcsLen, PhyValue::FcsLen(l)) => {
                if *l != 2 && *l != 4 {
                    return Err(PibError::InvalidParameter);
                }
                c.fcs_len = *l;
            },
            (Attr::MacMaxFrameRetries, PhyValue::Count(n)) => {
                if *n > MAX_FRAME_RETRIES {
                    return Err(PibError::InvalidParameter);
                }
                c.max_frame_retries = *n;
            },
            (Attr::MacPromiscuousMode, PhyValue::Flag(f)) => c.promiscuous = *f,
            (Attr::MacRxOnWhenIdle, PhyValue::Flag(f)) => c.rx_on_when_idle = *f,

            (Attr::PhyChannelsSupported, _) | (Attr::PhyMaxFrameDuration, _) |
            (Attr::PhyShrDuration, _) | (Attr::PhySymbolsPerOctet, _) => {
                return Err(PibError::ReadOnly);
            },

            _ if known => return Err(PibError::InvalidParameter),
            _ => return Err(PibError::UnsupportedAttribute),
        }

        debug!("PHY PIB set {:?}: {:?}", attr, value);

        Ok(())
    }
}

impl Default for PhyPib {
    fn default() -> Self {
        Self::new(PhyConfig::default())
    }
}

impl RadioDelegate for PhyPib {
    type Payload = PhyValue;

    fn get_attr(&mut self, attr: Attr, value: &mut AttrValue<PhyValue>) -> Result<(), PibError> {
        if let Ok(a) = MacAttr::try_from(attr) {
            *value = self.mirror.read(a);
            return Ok(());
        }

        *value = AttrValue::Radio(self.get_phy(attr)?);

        Ok(())
    }

    fn set_attr(&mut self, attr: Attr, value: &AttrValue<PhyValue>) -> Result<(), PibError> {
        if let Ok(a) = MacAttr::try_from(attr) {
            trace!("Mirror {:?}", attr);
            return self.mirror.write(a, value);
        }

        match value {
            AttrValue::Radio(v) => self.set_phy(attr, v),
            _ if self.get_phy(attr).is_ok() => Err(PibError::InvalidParameter),
            _ => Err(PibError::UnsupportedAttribute),
        }
    }
}
