//! Radio device backed PIB
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

use core::convert::TryFrom;
use core::fmt::Debug;

use crate::log::{debug, warn};

use crate::attr::{Attr, AttrValue};
use crate::channels::{self, Ch2450};
use crate::delegate::RadioDelegate;
use crate::error::PibError;
use crate::phy::{PhyConfig, PhyPib, PhyValue};

/// Radio delegate applying channel and power attributes to a `radio`
/// device, with all other attributes held in a [`PhyPib`].
pub struct RadioPib<R, C> {
    radio: R,
    pib: PhyPib,
    map_channel: fn(Ch2450) -> C,
}

impl <R, C, E> RadioPib<R, C>
where
    R: radio::Channel<Channel=C, Error=E> + radio::Power<Error=E>,
    C: Debug,
    E: Debug,
{
    /// Create a new radio PIB.
    ///
    /// `map_channel` converts 802.15.4 channels into the device channel type.
    pub fn new(radio: R, config: PhyConfig, map_channel: fn(Ch2450) -> C) -> Self {
        Self {
            radio,
            pib: PhyPib::new(config),
            map_channel,
        }
    }

    /// Apply the current channel and power to the radio device
    pub fn apply(&mut self) -> Result<(), PibError> {
        let c = self.pib.config().clone();

        self.apply_channel(c.page, c.channel)?;
        self.apply_power(c.tx_power)?;

        Ok(())
    }

    pub fn pib(&self) -> &PhyPib {
        &self.pib
    }

    pub fn free(self) -> (R, PhyPib) {
        (self.radio, self.pib)
    }

    fn apply_channel(&mut self, page: u8, ch: u8) -> Result<(), PibError> {
        let c = match Ch2450::new(ch) {
            Some(c) if channels::page_contains(page, ch) => c,
            _ => return Err(PibError::InvalidParameter),
        };

        debug!("Set radio channel {} ({} MHz)", ch, c.mhz());

        self.radio.set_channel(&(self.map_channel)(c)).map_err(|_e| {
            warn!("Radio set channel {} failed", ch);
            PibError::Radio
        })
    }

    fn apply_power(&mut self, dbm: i32) -> Result<(), PibError> {
        let p = match i8::try_from(dbm) {
            Ok(p) if (-32..=31).contains(&p) => p,
            _ => return Err(PibError::InvalidParameter),
        };

        debug!("Set radio power {} dBm", p);

        self.radio.set_power(p).map_err(|_e| {
            warn!("Radio set power {} dBm failed", p);
            PibError::Radio
        })
    }
}

impl <R, C, E> RadioDelegate for RadioPib<R, C>
where
    R: radio::Channel<Channel=C, Error=E> + radio::Power<Error=E>,
    C: Debug,
    E: Debug,
{
    type Payload = PhyValue;

    fn get_attr(&mut self, attr: Attr, value: &mut AttrValue<PhyValue>) -> Result<(), PibError> {
        self.pib.get_attr(attr, value)
    }

    fn set_attr(&mut self, attr: Attr, value: &AttrValue<PhyValue>) -> Result<(), PibError> {
        // Device first, so the PIB only records applied values
        match (attr, value) {
            (Attr::PhyChannel, AttrValue::Radio(PhyValue::Channel(ch))) => {
                let page = self.pib.config().page;
                self.apply_channel(page, *ch)?;
            },
            (Attr::PhyTxPower, AttrValue::Radio(PhyValue::TxPower(p))) => {
                self.apply_power(*p)?;
            },
            _ => (),
        }

        self.pib.set_attr(attr, value)
    }
}
