//! Host audio-engine capability flags

use serde::{Deserialize, Serialize};

/// Capabilities of the hosting audio engine, detected once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostCapabilities {
    /// Host decodes multichannel media in Safari's channel order and needs
    /// the channel map rotated before it reaches the renderer
    pub needs_channel_reorder: bool,
}

impl HostCapabilities {
    /// Capabilities with an explicit reorder flag
    pub const fn new(needs_channel_reorder: bool) -> Self {
        Self {
            needs_channel_reorder,
        }
    }

    /// Native hosts deliver channels in stream order
    pub const fn native() -> Self {
        Self::new(false)
    }

    /// Detect from a browser user-agent string.
    ///
    /// Safari reports "Safari" while every Chromium-based engine also
    /// reports "Chrome", so the reorder applies to the former only.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let safari = user_agent.contains("Safari")
            && !user_agent.contains("Chrome")
            && !user_agent.contains("Chromium");
        Self::new(safari)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAFARI_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15";
    const CHROME_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

    #[test]
    fn test_safari_detection() {
        assert!(HostCapabilities::from_user_agent(SAFARI_UA).needs_channel_reorder);
    }

    #[test]
    fn test_chromium_reports_safari_but_is_not() {
        assert!(!HostCapabilities::from_user_agent(CHROME_UA).needs_channel_reorder);
    }

    #[test]
    fn test_native_default() {
        assert!(!HostCapabilities::native().needs_channel_reorder);
        assert_eq!(HostCapabilities::default(), HostCapabilities::native());
    }
}
