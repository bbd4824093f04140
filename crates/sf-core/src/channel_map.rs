//! Ambisonic channel map handling

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::order::AmbisonicOrder;

/// Assignment of input audio channels to ambisonic channel slots
///
/// Index `i` holds the input channel feeding ambisonic channel `i`
/// (W, Y, Z, X order for first-order streams). Invariants enforced at
/// construction: at least 4 entries, no duplicate indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct ChannelMap(Vec<usize>);

impl ChannelMap {
    /// Create a validated channel map
    pub fn new(channels: Vec<usize>) -> ConfigResult<Self> {
        if channels.len() < 4 {
            return Err(ConfigError::ChannelMapTooShort {
                got: channels.len(),
            });
        }
        for (i, &channel) in channels.iter().enumerate() {
            if channels[..i].contains(&channel) {
                return Err(ConfigError::DuplicateChannelIndex { index: channel });
            }
        }
        Ok(Self(channels))
    }

    /// Default first-order map: `[0, 1, 2, 3]`
    pub fn first_order() -> Self {
        Self(vec![0, 1, 2, 3])
    }

    /// Identity map sized for the given order
    pub fn identity(order: AmbisonicOrder) -> Self {
        Self((0..order.channel_count()).collect())
    }

    /// Reorder in place for Safari's multichannel decode order.
    ///
    /// Moves the entry at index 2 to index 0; entries 0 and 1 shift up one
    /// position, entries at index 3 and beyond stay put. This is a rotation
    /// of the head, not a swap: applying it twice does NOT restore the
    /// original order. Apply exactly once per desired logical order.
    pub fn reorder_for_safari(&mut self) {
        let front = self.0.remove(2);
        self.0.insert(0, front);
    }

    /// True when the map length matches the order's channel count
    pub fn matches_order(&self, order: AmbisonicOrder) -> bool {
        self.0.len() == order.channel_count()
    }

    /// Number of mapped channels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; maps shorter than 4 entries cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mapped input channel for an ambisonic channel slot
    pub fn get(&self, slot: usize) -> Option<usize> {
        self.0.get(slot).copied()
    }

    /// View as a slice
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self::first_order()
    }
}

impl TryFrom<Vec<usize>> for ChannelMap {
    type Error = ConfigError;

    fn try_from(channels: Vec<usize>) -> ConfigResult<Self> {
        Self::new(channels)
    }
}

impl From<ChannelMap> for Vec<usize> {
    fn from(map: ChannelMap) -> Vec<usize> {
        map.0
    }
}
