//! IEEE 802.15.4 MAC PIB attribute access
//!
//! [`MacPib`](mac::MacPib) provides MLME-GET / MLME-SET style access to the
//! PAN Information Base, holding address and mode attributes in the MAC and
//! passing all other attributes through to a [`RadioDelegate`](delegate::RadioDelegate).
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

#![no_std]

#[cfg(any(test, feature="std"))]
extern crate std;

pub mod attr;

pub mod error;

pub mod delegate;

pub mod mac;

pub mod channels;

pub mod phy;

pub mod radio_pib;

pub mod prelude;

/// Logging shim, `log` by default or `defmt` where enabled
#[cfg(not(feature = "defmt"))]
pub(crate) mod log {
    pub use ::log::{trace, debug, warn};
}

#[cfg(feature = "defmt")]
pub(crate) mod log {
    pub use ::defmt::{trace, debug, warn};
}
