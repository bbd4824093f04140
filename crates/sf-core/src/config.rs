//! Renderer configuration and option overlay

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::channel_map::ChannelMap;
use crate::error::{ConfigError, ConfigResult};
use crate::order::AmbisonicOrder;

/// Effective renderer configuration
///
/// Built once per bridge by overlaying caller [`RendererOptions`] onto
/// defaults; never mutated after the renderer is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererConfig {
    /// Linear gain applied after decode (1.0 = unity)
    pub post_gain: f32,
    /// Ambisonic order of the input stream
    pub ambisonic_order: AmbisonicOrder,
    /// Input-channel to ambisonic-channel assignment
    pub channel_map: ChannelMap,
    /// Override base URL for self-hosted HRTF impulse-response assets
    #[serde(rename = "HRTFSetUrl", skip_serializing_if = "Option::is_none")]
    pub hrtf_set_url: Option<String>,
    /// Options this crate does not recognize, passed through to the
    /// renderer untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            post_gain: 1.0,
            ambisonic_order: AmbisonicOrder::First,
            channel_map: ChannelMap::first_order(),
            hrtf_set_url: None,
            extra: Map::new(),
        }
    }
}

impl RendererConfig {
    /// Overlay caller options onto defaults.
    ///
    /// Keys present in `options` win; absent keys keep their defaults.
    /// Fails fast on an out-of-range order or a channel map that is
    /// malformed or sized for a different order. When the caller omits the
    /// map, the default is the identity map for the requested order.
    pub fn from_options(options: &RendererOptions) -> ConfigResult<Self> {
        let ambisonic_order = match options.ambisonic_order {
            Some(order) => AmbisonicOrder::from_order(order)?,
            None => AmbisonicOrder::First,
        };

        let channel_map = match &options.channel_map {
            Some(channels) => {
                let map = ChannelMap::new(channels.clone())?;
                if !map.matches_order(ambisonic_order) {
                    return Err(ConfigError::ChannelCountMismatch {
                        got: map.len(),
                        expected: ambisonic_order.channel_count(),
                        order: ambisonic_order.as_usize(),
                    });
                }
                map
            }
            None => ChannelMap::identity(ambisonic_order),
        };

        let config = Self {
            post_gain: options.post_gain.unwrap_or(1.0),
            ambisonic_order,
            channel_map,
            hrtf_set_url: options.hrtf_set_url.clone(),
            extra: options.extra.clone(),
        };
        log::debug!(
            "effective renderer config: order={}, channels={}, post_gain={}",
            config.ambisonic_order.as_usize(),
            config.channel_map.len(),
            config.post_gain
        );
        Ok(config)
    }
}

/// Caller-supplied renderer options
///
/// Every field is optional; see [`RendererConfig::from_options`] for the
/// overlay semantics. Deserializes from the host's camelCase JSON
/// (`postGain`, `ambisonicOrder`, `channelMap`, `HRTFSetUrl`); unrecognized
/// keys land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererOptions {
    /// Linear post-decode gain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_gain: Option<f32>,
    /// Ambisonic order, validated against the supported 1-3 range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambisonic_order: Option<usize>,
    /// Channel map, validated at overlay time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_map: Option<Vec<usize>>,
    /// HRTF asset base URL override
    #[serde(rename = "HRTFSetUrl", skip_serializing_if = "Option::is_none")]
    pub hrtf_set_url: Option<String>,
    /// Unrecognized options, forwarded untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RendererOptions {
    /// Empty options; the overlay yields pure defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the post-decode gain (linear)
    pub fn with_post_gain(mut self, gain: f32) -> Self {
        self.post_gain = Some(gain);
        self
    }

    /// Set the post-decode gain in decibels (0 dB = unity)
    pub fn with_post_gain_db(mut self, db: f32) -> Self {
        self.post_gain = Some(10.0_f32.powf(db / 20.0));
        self
    }

    /// Set the ambisonic order
    pub fn with_ambisonic_order(mut self, order: usize) -> Self {
        self.ambisonic_order = Some(order);
        self
    }

    /// Set the channel map
    pub fn with_channel_map(mut self, channels: impl Into<Vec<usize>>) -> Self {
        self.channel_map = Some(channels.into());
        self
    }

    /// Set the HRTF asset base URL
    pub fn with_hrtf_set_url(mut self, url: impl Into<String>) -> Self {
        self.hrtf_set_url = Some(url.into());
        self
    }

    /// Attach an option this crate does not interpret
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::from_options(&RendererOptions::new()).unwrap();
        assert_eq!(config, RendererConfig::default());
        assert_eq!(config.post_gain, 1.0);
        assert_eq!(config.ambisonic_order, AmbisonicOrder::First);
        assert_eq!(config.channel_map.as_slice(), &[0, 1, 2, 3]);
        assert!(config.hrtf_set_url.is_none());
    }

    #[test]
    fn test_caller_keys_win_absent_keys_keep_defaults() {
        let options = RendererOptions::new().with_post_gain(0.5);
        let config = RendererConfig::from_options(&options).unwrap();
        assert_eq!(config.post_gain, 0.5);
        assert_eq!(config.ambisonic_order, AmbisonicOrder::First);
        assert_eq!(config.channel_map.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_post_gain_db() {
        let options = RendererOptions::new().with_post_gain_db(0.0);
        let config = RendererConfig::from_options(&options).unwrap();
        assert!((config.post_gain - 1.0).abs() < 1e-6);

        let options = RendererOptions::new().with_post_gain_db(-6.0);
        let config = RendererConfig::from_options(&options).unwrap();
        assert!((config.post_gain - 0.501187).abs() < 1e-4);
    }

    #[test]
    fn test_higher_order_defaults_map_to_order_size() {
        let options = RendererOptions::new().with_ambisonic_order(2);
        let config = RendererConfig::from_options(&options).unwrap();
        assert_eq!(config.channel_map.len(), 9);
    }

    #[test]
    fn test_order_out_of_range_fails_fast() {
        for order in [0, 4, 7] {
            let options = RendererOptions::new().with_ambisonic_order(order);
            assert_eq!(
                RendererConfig::from_options(&options),
                Err(ConfigError::InvalidAmbisonicOrder(order))
            );
        }
    }

    #[test]
    fn test_map_sized_for_wrong_order_fails_fast() {
        let options = RendererOptions::new()
            .with_ambisonic_order(2)
            .with_channel_map([0, 1, 2, 3]);
        assert_eq!(
            RendererConfig::from_options(&options),
            Err(ConfigError::ChannelCountMismatch {
                got: 4,
                expected: 9,
                order: 2,
            })
        );
    }

    #[test]
    fn test_unrecognized_options_pass_through() {
        let options = RendererOptions::new().with_extra("renderingMode", json!("bypass"));
        let config = RendererConfig::from_options(&options).unwrap();
        assert_eq!(config.extra.get("renderingMode"), Some(&json!("bypass")));
    }

    #[test]
    fn test_camel_case_json() {
        let options: RendererOptions = serde_json::from_value(json!({
            "postGain": 0.8,
            "ambisonicOrder": 1,
            "channelMap": [0, 1, 2, 3],
            "HRTFSetUrl": "https://cdn.example.com/hrtf/",
            "futureKnob": 42,
        }))
        .unwrap();

        assert_eq!(options.post_gain, Some(0.8));
        assert_eq!(options.ambisonic_order, Some(1));
        assert_eq!(
            options.hrtf_set_url.as_deref(),
            Some("https://cdn.example.com/hrtf/")
        );
        assert_eq!(options.extra.get("futureKnob"), Some(&json!(42)));

        let config = RendererConfig::from_options(&options).unwrap();
        assert_eq!(config.extra.get("futureKnob"), Some(&json!(42)));
    }
}
