//! PIB access errors
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

/// Non-success status for a PIB get / set request.
///
/// These mirror the IEEE 802.15.4 MLME-GET / MLME-SET confirm statuses,
/// `Ok(())` takes the place of `SUCCESS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PibError {
    /// Attribute is not handled by this PIB
    UnsupportedAttribute,

    /// Value is out of range or does not match the attribute
    InvalidParameter,

    /// Attribute may be read but not written
    ReadOnly,

    /// Request was refused in the current operating state
    Denied,

    /// Transceiver is busy transmitting
    TxActive,

    /// Underlying radio device failed to apply the attribute
    Radio,
}
