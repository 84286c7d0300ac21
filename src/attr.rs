//! PIB attribute identifiers and values
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

use core::convert::TryFrom;

use ieee802154::mac::{PanId, ShortAddress};

/// Length of an IEEE 802.15.4 extended (EUI-64) address in bytes
pub const EADDR_LEN: usize = 8;

/// Extended address as it is stored in the PIB
pub type ExtendedAddr = [u8; EADDR_LEN];

/// PIB attribute identifiers.
///
/// The identifier space is shared between the MAC and the radio,
/// [`Attr::owner`] determines which side services a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Attr {
    // PHY attributes
    PhyChannel,
    PhyChannelsSupported,
    PhyTxPower,
    PhyTxPowerTolerance,
    PhyCcaMode,
    PhyCurrentPage,
    PhyMaxFrameDuration,
    PhyShrDuration,
    PhySymbolsPerOctet,
    PhyFcsLen,

    // MAC attributes
    MacAckWaitDuration,
    MacAssociatedPan,
    MacAssociationPermit,
    MacAutoRequest,
    MacBattLifeExt,
    MacBattLifeExtPeriods,
    MacBeaconPayloadLength,
    MacBeaconOrder,
    MacBeaconTxTime,
    MacBsn,
    MacCoordExtendedAddr,
    MacCoordShortAddress,
    MacDsn,
    MacGtsPermit,
    MacMaxBe,
    MacMinBe,
    MacMaxCsmaBackoffs,
    MacMaxFrameRetries,
    MacMaxFrameTotalWaitTime,
    MacPromiscuousMode,
    MacResponseWaitTime,
    MacRxOnWhenIdle,
    MacSecurityEnabled,
    MacSuperframeOrder,
    MacSyncSymbolOffset,
    MacTimestampSupported,
    MacTransactionPersistenceTime,

    // MAC attributes held by the MAC itself
    MacPanId,
    MacShortAddress,
    MacExtendedAddr,
    MacDevMode,
}

/// Owner of a PIB attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Owner {
    /// Held in MAC state
    Mac(MacAttr),
    /// Held (or rejected) by the radio delegate
    Radio,
}

impl Attr {
    /// Classify an attribute by the side that stores it
    pub fn owner(&self) -> Owner {
        match MacAttr::try_from(*self) {
            Ok(a) => Owner::Mac(a),
            Err(_) => Owner::Radio,
        }
    }

    /// Check whether an attribute is held in MAC state
    pub fn is_mac_owned(&self) -> bool {
        matches!(self.owner(), Owner::Mac(_))
    }
}

/// Attributes stored in MAC state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacAttr {
    PanId,
    ShortAddress,
    ExtendedAddr,
    DevMode,
}

impl TryFrom<Attr> for MacAttr {
    type Error = Attr;

    fn try_from(a: Attr) -> Result<Self, Self::Error> {
        match a {
            Attr::MacPanId => Ok(MacAttr::PanId),
            Attr::MacShortAddress => Ok(MacAttr::ShortAddress),
            Attr::MacExtendedAddr => Ok(MacAttr::ExtendedAddr),
            Attr::MacDevMode => Ok(MacAttr::DevMode),
            _ => Err(a),
        }
    }
}

impl From<MacAttr> for Attr {
    fn from(a: MacAttr) -> Self {
        match a {
            MacAttr::PanId => Attr::MacPanId,
            MacAttr::ShortAddress => Attr::MacShortAddress,
            MacAttr::ExtendedAddr => Attr::MacExtendedAddr,
            MacAttr::DevMode => Attr::MacDevMode,
        }
    }
}

/// Device operating role
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DevMode {
    /// Plain device / endpoint
    Endpoint,
    /// Coordinator
    Coordinator,
    /// PAN coordinator
    PanCoordinator,
}

impl Default for DevMode {
    fn default() -> Self {
        DevMode::Endpoint
    }
}

/// PIB attribute value.
///
/// `P` is the payload type for radio-owned attributes, defined by the
/// radio delegate in use (see [`crate::delegate::RadioDelegate::Payload`]).
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue<P> {
    PanId(PanId),
    ShortAddr(ShortAddress),
    /// Extended address bytes, stored and returned as-is
    ExtendedAddr(ExtendedAddr),
    DevMode(DevMode),
    /// Radio specific payload
    Radio(P),
}

impl <P> AttrValue<P> {
    /// Check whether this value carries the variant expected for a MAC attribute
    pub fn matches(&self, attr: MacAttr) -> bool {
        match (attr, self) {
            (MacAttr::PanId, AttrValue::PanId(_)) => true,
            (MacAttr::ShortAddress, AttrValue::ShortAddr(_)) => true,
            (MacAttr::ExtendedAddr, AttrValue::ExtendedAddr(_)) => true,
            (MacAttr::DevMode, AttrValue::DevMode(_)) => true,
            _ => false,
        }
    }
}
