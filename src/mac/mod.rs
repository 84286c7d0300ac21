//! MAC PIB attribute store
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte
//
// MLME-GET and MLME-SET are defined as request / confirm pairs, here the
// confirm is the return value of the request.

use ieee802154::mac::{PanId, ShortAddress};
use strum::IntoEnumIterator;

use crate::log::{trace, debug, warn};

use crate::attr::{Attr, AttrValue, DevMode, ExtendedAddr, MacAttr, Owner};
use crate::delegate::RadioDelegate;
use crate::error::PibError;

pub mod config;
pub use config::{MacConfig, SADDR_UNSPEC, PANID_UNSPEC};

/// MAC address and mode state
#[derive(Debug, Clone, PartialEq)]
pub struct MacState {
    pub pan_id: PanId,
    pub short_address: ShortAddress,
    pub extended_address: ExtendedAddr,
    pub devmode: DevMode,
}

impl From<MacConfig> for MacState {
    fn from(c: MacConfig) -> Self {
        Self {
            pan_id: c.pan_id,
            short_address: c.short_address,
            extended_address: c.extended_address,
            devmode: c.devmode,
        }
    }
}

impl MacState {
    /// Read a MAC held attribute
    pub fn read<P>(&self, attr: MacAttr) -> AttrValue<P> {
        match attr {
            MacAttr::PanId => AttrValue::PanId(self.pan_id),
            MacAttr::ShortAddress => AttrValue::ShortAddr(self.short_address),
            MacAttr::ExtendedAddr => AttrValue::ExtendedAddr(self.extended_address),
            MacAttr::DevMode => AttrValue::DevMode(self.devmode),
        }
    }

    /// Write a MAC held attribute, the value must match the attribute
    pub fn write<P>(&mut self, attr: MacAttr, value: &AttrValue<P>) -> Result<(), PibError> {
        match (attr, value) {
            (MacAttr::PanId, AttrValue::PanId(p)) => self.pan_id = *p,
            (MacAttr::ShortAddress, AttrValue::ShortAddr(s)) => self.short_address = *s,
            (MacAttr::ExtendedAddr, AttrValue::ExtendedAddr(e)) => self.extended_address = *e,
            (MacAttr::DevMode, AttrValue::DevMode(m)) => self.devmode = *m,
            _ => return Err(PibError::InvalidParameter),
        }

        Ok(())
    }
}

/// MAC PIB, services MAC held attributes and passes everything else
/// through to the radio delegate.
#[derive(Debug, Clone, PartialEq)]
pub struct MacPib<D> {
    state: MacState,
    radio: D,
}

impl <D: RadioDelegate> MacPib<D> {
    /// Create a new PIB with the provided initial state and radio delegate.
    ///
    /// The radio is not told about the initial state, call
    /// [`MacPib::sync_radio`] where the radio does not already hold it.
    pub fn new(config: MacConfig, radio: D) -> Self {
        Self {
            state: config.into(),
            radio,
        }
    }

    /// Fetch an attribute value.
    ///
    /// On failure `value` is left as the radio delegate left it.
    pub fn get(&mut self, attr: Attr, value: &mut AttrValue<D::Payload>) -> Result<(), PibError> {
        match attr.owner() {
            Owner::Mac(a) => {
                *value = self.state.read(a);
                Ok(())
            },
            // The attribute may be handled solely by the radio
            Owner::Radio => {
                trace!("Get {:?} via radio", attr);
                self.radio.get_attr(attr, value)
            },
        }
    }

    /// Write an attribute value.
    ///
    /// MAC held attributes are committed locally then mirrored to the radio,
    /// the radio status is discarded for these and the call succeeds.
    ///
    /// A MAC held attribute with a value of the wrong variant is not stored,
    /// the request is passed to the radio and its status returned.
    pub fn set(&mut self, attr: Attr, value: &AttrValue<D::Payload>) -> Result<(), PibError> {
        let a = match attr.owner() {
            Owner::Mac(a) if value.matches(a) => a,
            Owner::Mac(_) => {
                warn!("Value mismatch for {:?}, passing to radio", attr);
                return self.radio.set_attr(attr, value);
            },
            Owner::Radio => {
                trace!("Set {:?} via radio", attr);
                return self.radio.set_attr(attr, value);
            },
        };

        self.state.write(a, value)?;

        debug!("Set MAC attribute {:?}", attr);

        // Tell the radio about the attribute
        if let Err(e) = self.radio.set_attr(attr, value) {
            warn!("Radio rejected mirrored attribute {:?}: {:?}", attr, e);
        }

        Ok(())
    }

    /// Re-apply all MAC held attributes to the radio (ie. following a
    /// radio reset), returning the first radio failure.
    pub fn sync_radio(&mut self) -> Result<(), PibError> {
        let mut res = Ok(());

        for a in MacAttr::iter() {
            let v = self.state.read(a);

            if let Err(e) = self.radio.set_attr(a.into(), &v) {
                warn!("Radio sync failed for {:?}: {:?}", Attr::from(a), e);
                if res.is_ok() {
                    res = Err(e);
                }
            }
        }

        res
    }

    pub fn pan_id(&self) -> PanId {
        self.state.pan_id
    }

    pub fn short_address(&self) -> ShortAddress {
        self.state.short_address
    }

    pub fn extended_address(&self) -> ExtendedAddr {
        self.state.extended_address
    }

    pub fn devmode(&self) -> DevMode {
        self.state.devmode
    }

    pub fn state(&self) -> &MacState {
        &self.state
    }

    /// Borrow the radio delegate
    pub fn radio(&self) -> &D {
        &self.radio
    }

    /// Mutably borrow the radio delegate
    pub fn radio_mut(&mut self) -> &mut D {
        &mut self.radio
    }

    /// Release the radio delegate
    pub fn free(self) -> D {
        self.radio
    }
}

#[cfg(test)]
mod test {
    use std::vec;

    use crate::delegate::mock::*;
    use super::*;

    fn setup() -> (MacPib<MockDelegate<u32>>, MockDelegate<u32>) {
        let _ = simplelog::SimpleLogger::init(log::LevelFilter::Debug, simplelog::Config::default());

        let radio = MockDelegate::new();
        let pib = MacPib::new(MacConfig::new(0x0100, [1, 2, 3, 4, 5, 6, 7, 8]), radio.clone());

        (pib, radio)
    }

    #[test]
    fn set_get_mac_attrs() {
        let (mut pib, mut radio) = setup();

        let values = [
            (Attr::MacPanId, AttrValue::PanId(PanId(0x1234))),
            (Attr::MacShortAddress, AttrValue::ShortAddr(ShortAddress(0xbeef))),
            (Attr::MacExtendedAddr, AttrValue::ExtendedAddr([0xde, 0xad, 0xbe, 0xef, 0x00, 0x11, 0x22, 0x33])),
            (Attr::MacDevMode, AttrValue::DevMode(DevMode::PanCoordinator)),
        ];

        for (a, v) in &values {
            radio.on_set(*a, Ok(()));

            assert_eq!(pib.set(*a, v), Ok(()));

            let mut out = AttrValue::Radio(0);
            assert_eq!(pib.get(*a, &mut out), Ok(()));
            assert_eq!(&out, v);
        }

        // Gets on MAC attributes never reach the radio
        let expected: vec::Vec<_> = values.iter().map(|(a, v)| Call::Set(*a, v.clone())).collect();
        assert_eq!(radio.calls(), expected);
    }

    #[test]
    fn pan_id_scenario() {
        let (mut pib, mut radio) = setup();

        assert_eq!(pib.set(Attr::MacPanId, &AttrValue::PanId(PanId(0x1234))), Ok(()));

        let mut out = AttrValue::Radio(0);
        assert_eq!(pib.get(Attr::MacPanId, &mut out), Ok(()));
        assert_eq!(out, AttrValue::PanId(PanId(0x1234)));

        assert_eq!(pib.set(Attr::MacShortAddress, &AttrValue::ShortAddr(ShortAddress(0xbeef))), Ok(()));

        radio.on_get(Attr::PhyCcaMode, Err(PibError::UnsupportedAttribute));

        let mut out = AttrValue::Radio(77);
        assert_eq!(pib.get(Attr::PhyCcaMode, &mut out), Err(PibError::UnsupportedAttribute));
        assert_eq!(out, AttrValue::Radio(77));
    }

    #[test]
    fn radio_attrs_passthrough() {
        let (mut pib, mut radio) = setup();
        let initial = pib.state().clone();

        radio.on_get(Attr::PhyChannel, Ok(AttrValue::Radio(15)));
        radio.on_set(Attr::PhyChannel, Err(PibError::InvalidParameter));
        radio.on_set(Attr::PhyTxPower, Ok(()));

        let mut out = AttrValue::Radio(0);
        assert_eq!(pib.get(Attr::PhyChannel, &mut out), Ok(()));
        assert_eq!(out, AttrValue::Radio(15));

        assert_eq!(pib.set(Attr::PhyChannel, &AttrValue::Radio(40)), Err(PibError::InvalidParameter));
        assert_eq!(pib.set(Attr::PhyTxPower, &AttrValue::Radio(3)), Ok(()));

        // Unconfigured attributes are unsupported by the mock
        assert_eq!(pib.set(Attr::MacDsn, &AttrValue::Radio(1)), Err(PibError::UnsupportedAttribute));

        assert_eq!(radio.calls(), &[
            Call::Get(Attr::PhyChannel),
            Call::Set(Attr::PhyChannel, AttrValue::Radio(40)),
            Call::Set(Attr::PhyTxPower, AttrValue::Radio(3)),
            Call::Set(Attr::MacDsn, AttrValue::Radio(1)),
        ]);

        assert_eq!(pib.state(), &initial);
    }

    #[test]
    fn mac_set_ignores_radio_failure() {
        let (mut pib, mut radio) = setup();

        radio.on_set(Attr::MacShortAddress, Err(PibError::Denied));

        let v = AttrValue::ShortAddr(ShortAddress(0x0042));
        assert_eq!(pib.set(Attr::MacShortAddress, &v), Ok(()));

        assert_eq!(radio.calls(), &[Call::Set(Attr::MacShortAddress, v)]);
        assert_eq!(pib.short_address(), ShortAddress(0x0042));
    }

    #[test]
    fn extended_addr_bytes_preserved() {
        let (mut pib, _radio) = setup();

        let eaddr = [0x00, 0xff, 0x01, 0xfe, 0x80, 0x7f, 0x10, 0xef];
        assert_eq!(pib.set(Attr::MacExtendedAddr, &AttrValue::ExtendedAddr(eaddr)), Ok(()));

        let mut out = AttrValue::Radio(0);
        assert_eq!(pib.get(Attr::MacExtendedAddr, &mut out), Ok(()));
        assert_eq!(out, AttrValue::ExtendedAddr(eaddr));
        assert_eq!(pib.extended_address(), eaddr);
    }

    #[test]
    fn repeated_set_idempotent() {
        let (mut pib, mut radio) = setup();
        radio.on_set(Attr::MacDevMode, Ok(()));

        let v = AttrValue::DevMode(DevMode::Coordinator);

        let r1 = pib.set(Attr::MacDevMode, &v);
        let s1 = pib.state().clone();
        let r2 = pib.set(Attr::MacDevMode, &v);

        assert_eq!(r1, r2);
        assert_eq!(pib.state(), &s1);
        assert_eq!(pib.devmode(), DevMode::Coordinator);
    }

    #[test]
    fn mismatched_value_passed_to_radio() {
        let (mut pib, mut radio) = setup();
        let initial = pib.state().clone();

        radio.on_set(Attr::MacDevMode, Err(PibError::InvalidParameter));

        let short = AttrValue::ShortAddr(ShortAddress(1));
        assert_eq!(pib.set(Attr::MacPanId, &short), Err(PibError::UnsupportedAttribute));
        assert_eq!(pib.set(Attr::MacDevMode, &AttrValue::Radio(1)), Err(PibError::InvalidParameter));

        assert_eq!(pib.state(), &initial);
        assert_eq!(radio.calls(), &[
            Call::Set(Attr::MacPanId, short),
            Call::Set(Attr::MacDevMode, AttrValue::Radio(1)),
        ]);
    }

    /// Delegate that panics on set, for checking what was committed before
    /// the radio was notified
    struct PanicDelegate;

    impl RadioDelegate for PanicDelegate {
        type Payload = ();

        fn get_attr(&mut self, _attr: Attr, _value: &mut AttrValue<()>) -> Result<(), PibError> {
            Err(PibError::UnsupportedAttribute)
        }

        fn set_attr(&mut self, attr: Attr, _value: &AttrValue<()>) -> Result<(), PibError> {
            panic!("radio notified of {:?}", attr);
        }
    }

    #[test]
    fn local_write_before_radio_notify() {
        let mut pib = MacPib::new(MacConfig::new(0x0100, [0u8; 8]), PanicDelegate);

        let values: [(Attr, AttrValue<()>); 4] = [
            (Attr::MacPanId, AttrValue::PanId(PanId(0x1234))),
            (Attr::MacShortAddress, AttrValue::ShortAddr(ShortAddress(0xbeef))),
            (Attr::MacExtendedAddr, AttrValue::ExtendedAddr([8, 7, 6, 5, 4, 3, 2, 1])),
            (Attr::MacDevMode, AttrValue::DevMode(DevMode::Coordinator)),
        ];

        for (a, v) in &values {
            let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| pib.set(*a, v)));
            assert!(r.is_err());

            let mut out = AttrValue::Radio(());
            assert_eq!(pib.get(*a, &mut out), Ok(()));
            assert_eq!(&out, v);
        }
    }

    #[test]
    fn sync_radio_mirrors_state() {
        let (mut pib, mut radio) = setup();

        radio.on_set(Attr::MacPanId, Ok(()));
        radio.on_set(Attr::MacShortAddress, Ok(()));
        radio.on_set(Attr::MacExtendedAddr, Err(PibError::TxActive));
        radio.on_set(Attr::MacDevMode, Ok(()));

        assert_eq!(pib.sync_radio(), Err(PibError::TxActive));

        assert_eq!(radio.calls(), &[
            Call::Set(Attr::MacPanId, AttrValue::PanId(PanId(0x0100))),
            Call::Set(Attr::MacShortAddress, AttrValue::ShortAddr(SADDR_UNSPEC)),
            Call::Set(Attr::MacExtendedAddr, AttrValue::ExtendedAddr([1, 2, 3, 4, 5, 6, 7, 8])),
            Call::Set(Attr::MacDevMode, AttrValue::DevMode(DevMode::Endpoint)),
        ]);
    }
}
