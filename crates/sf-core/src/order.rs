//! Ambisonic order

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Ambisonic order (determines spatial resolution and channel count)
///
/// Orders above third exist but no media element delivers enough channels
/// for them, so they are rejected rather than silently degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum AmbisonicOrder {
    /// First order (4 channels: W, Y, Z, X)
    First = 1,
    /// Second order (9 channels)
    Second = 2,
    /// Third order (16 channels)
    Third = 3,
}

impl AmbisonicOrder {
    /// Get channel count for this order
    pub fn channel_count(&self) -> usize {
        let n = *self as usize;
        (n + 1) * (n + 1)
    }

    /// Create from order number, rejecting anything outside 1-3
    pub fn from_order(order: usize) -> ConfigResult<Self> {
        match order {
            1 => Ok(AmbisonicOrder::First),
            2 => Ok(AmbisonicOrder::Second),
            3 => Ok(AmbisonicOrder::Third),
            _ => Err(ConfigError::InvalidAmbisonicOrder(order)),
        }
    }

    /// Get order number
    pub fn as_usize(&self) -> usize {
        *self as usize
    }

    /// True for orders decoded by the higher-order renderer path
    pub fn is_higher_order(&self) -> bool {
        !matches!(self, AmbisonicOrder::First)
    }
}

impl Default for AmbisonicOrder {
    fn default() -> Self {
        AmbisonicOrder::First
    }
}

impl TryFrom<usize> for AmbisonicOrder {
    type Error = ConfigError;

    fn try_from(order: usize) -> ConfigResult<Self> {
        Self::from_order(order)
    }
}

impl From<AmbisonicOrder> for usize {
    fn from(order: AmbisonicOrder) -> usize {
        order.as_usize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_count() {
        assert_eq!(AmbisonicOrder::First.channel_count(), 4);
        assert_eq!(AmbisonicOrder::Second.channel_count(), 9);
        assert_eq!(AmbisonicOrder::Third.channel_count(), 16);
    }

    #[test]
    fn test_from_order() {
        assert_eq!(AmbisonicOrder::from_order(1), Ok(AmbisonicOrder::First));
        assert_eq!(AmbisonicOrder::from_order(2), Ok(AmbisonicOrder::Second));
        assert_eq!(AmbisonicOrder::from_order(3), Ok(AmbisonicOrder::Third));
        assert_eq!(
            AmbisonicOrder::from_order(0),
            Err(ConfigError::InvalidAmbisonicOrder(0))
        );
        assert_eq!(
            AmbisonicOrder::from_order(4),
            Err(ConfigError::InvalidAmbisonicOrder(4))
        );
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let ok: AmbisonicOrder = serde_json::from_str("2").unwrap();
        assert_eq!(ok, AmbisonicOrder::Second);

        assert!(serde_json::from_str::<AmbisonicOrder>("7").is_err());
    }
}
