//! 2.45 GHz O-QPSK channel helpers
//
// https://github.com/rust-iot/rust-lpwan
// Copyright 2021 Ryan Kurte

/// 2.45 GHz Channel Pages
pub const CHANNEL_PAGES_2450: &[&[u8]] = &[
    // Page 0
    &[11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26],
];

/// 2.4GHz channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ch2450(u8);

impl Ch2450 {
    /// Create a channel from a page 0 channel index
    pub fn new(index: u8) -> Option<Ch2450> {
        match index {
            11..=26 => Some(Ch2450(index)),
            _ => None,
        }
    }

    /// Fetch the channel index
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Fetch the channel centre frequency in MHz
    pub fn mhz(&self) -> u32 {
        2405 + 5 * (self.0 as u32 - 11)
    }

    /// Attempt to convert a channel frequency into a channel
    pub fn from_mhz(freq_mhz: u32) -> Option<Ch2450> {
        if freq_mhz < 2405 || (freq_mhz - 2405) % 5 != 0 {
            return None;
        }

        let index = (freq_mhz - 2405) / 5 + 11;
        if index > 26 {
            return None;
        }

        Ch2450::new(index as u8)
    }
}

/// Check whether a channel is available on a given page
pub fn page_contains(page: u8, channel: u8) -> bool {
    CHANNEL_PAGES_2450.get(page as usize)
        .map(|p| p.contains(&channel))
        .unwrap_or(false)
}

/// Compute the supported channel bitmap for a page (bit n set for channel n)
pub fn page_mask(page: u8) -> Option<u32> {
    CHANNEL_PAGES_2450.get(page as usize)
        .map(|p| p.iter().fold(0u32, |m, c| m | (1u32 << *c)))
}
