//! Radio delegate API
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

use crate::attr::{Attr, AttrValue};
use crate::error::PibError;

/// Radio delegate owns all PIB attributes not held by the MAC.
///
/// Delegates must accept the full [`Attr`] space, including MAC held
/// attributes (which are forwarded on set so the radio can mirror address
/// and mode state), and return [`PibError::UnsupportedAttribute`] for
/// identifiers they do not handle.
pub trait RadioDelegate {
    /// Payload type for radio-owned attribute values
    type Payload;

    /// Read an attribute into `value`
    fn get_attr(&mut self, attr: Attr, value: &mut AttrValue<Self::Payload>) -> Result<(), PibError>;

    /// Write an attribute
    fn set_attr(&mut self, attr: Attr, value: &AttrValue<Self::Payload>) -> Result<(), PibError>;
}

/// Borrowed delegates, for cases where the radio outlives the MAC
impl <D: RadioDelegate + ?Sized> RadioDelegate for &mut D {
    type Payload = D::Payload;

    fn get_attr(&mut self, attr: Attr, value: &mut AttrValue<Self::Payload>) -> Result<(), PibError> {
        (**self).get_attr(attr, value)
    }

    fn set_attr(&mut self, attr: Attr, value: &AttrValue<Self::Payload>) -> Result<(), PibError> {
        (**self).set_attr(attr, value)
    }
}

/// Delegate for radios without any attribute support
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NullDelegate;

impl RadioDelegate for NullDelegate {
    type Payload = ();

    fn get_attr(&mut self, _attr: Attr, _value: &mut AttrValue<()>) -> Result<(), PibError> {
        Err(PibError::UnsupportedAttribute)
    }

    fn set_attr(&mut self, _attr: Attr, _value: &AttrValue<()>) -> Result<(), PibError> {
        Err(PibError::UnsupportedAttribute)
    }
}

#[cfg(any(test, feature="mocks"))]
pub mod mock {
    use std::sync::{Arc, Mutex};
    use std::collections::HashMap;
    use std::vec::Vec;

    use crate::attr::{Attr, AttrValue};
    use crate::error::PibError;

    /// Delegate call, as recorded by [`MockDelegate`]
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call<P> {
        Get(Attr),
        Set(Attr, AttrValue<P>),
    }

    #[derive(Debug)]
    struct Inner<P> {
        get: HashMap<Attr, Result<AttrValue<P>, PibError>>,
        set: HashMap<Attr, Result<(), PibError>>,
        calls: Vec<Call<P>>,
    }

    /// Mock delegate to assist with testing.
    ///
    /// Clones share the same state, so a test can hold a handle while
    /// the MAC owns another. Unconfigured attributes are unsupported.
    #[derive(Clone, Debug)]
    pub struct MockDelegate<P>(Arc<Mutex<Inner<P>>>);

    impl <P: Clone> MockDelegate<P> {
        pub fn new() -> Self {
            Self(Arc::new(Mutex::new(Inner{
                get: HashMap::new(),
                set: HashMap::new(),
                calls: Vec::new(),
            })))
        }

        /// Configure the response to a get, `Ok` values are written out
        pub fn on_get(&mut self, attr: Attr, resp: Result<AttrValue<P>, PibError>) {
            self.0.lock().unwrap().get.insert(attr, resp);
        }

        /// Configure the response to a set
        pub fn on_set(&mut self, attr: Attr, resp: Result<(), PibError>) {
            self.0.lock().unwrap().set.insert(attr, resp);
        }

        /// Fetch calls made since creation or the last [`MockDelegate::clear`]
        pub fn calls(&self) -> Vec<Call<P>> {
            self.0.lock().unwrap().calls.clone()
        }

        pub fn clear(&mut self) {
            self.0.lock().unwrap().calls.clear();
        }
    }

    impl <P: Clone> super::RadioDelegate for MockDelegate<P> {
        type Payload = P;

        fn get_attr(&mut self, attr: Attr, value: &mut AttrValue<P>) -> Result<(), PibError> {
            let mut i = self.0.lock().unwrap();
            i.calls.push(Call::Get(attr));

            match i.get.get(&attr) {
                Some(Ok(v)) => {
                    *value = v.clone();
                    Ok(())
                },
                Some(Err(e)) => Err(*e),
                None => Err(PibError::UnsupportedAttribute),
            }
        }

        fn set_attr(&mut self, attr: Attr, value: &AttrValue<P>) -> Result<(), PibError> {
            let mut i = self.0.lock().unwrap();
            i.calls.push(Call::Set(attr, value.clone()));

            match i.set.get(&attr) {
                Some(r) => *r,
                None => Err(PibError::UnsupportedAttribute),
            }
        }
    }
}
