//! PIB crate prelude
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

pub use crate::attr::{Attr, AttrValue, DevMode, ExtendedAddr, MacAttr, Owner, EADDR_LEN};

pub use crate::error::PibError;

pub use crate::delegate::{RadioDelegate, NullDelegate};

pub use crate::mac::{MacPib, MacConfig, MacState};

pub use crate::phy::{PhyPib, PhyConfig, PhyValue, CcaMode};

pub use crate::radio_pib::RadioPib;

pub use ieee802154::mac::{Address as MacAddress, PanId, ShortAddress, ExtendedAddress};
