//! Media element handles

/// Handle to a playable media element owned by the host.
///
/// The host decodes and schedules the media; this crate only needs enough
/// identity to bind an audio source node to it. Spatial playback needs
/// native multichannel decode, 4 channels or more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaElement {
    label: String,
    channels: usize,
}

impl MediaElement {
    pub fn new(label: impl Into<String>, channels: usize) -> Self {
        Self {
            label: label.into(),
            channels,
        }
    }

    /// Host-side identifier, for logs and diagnostics
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Channels the element decodes
    pub fn channels(&self) -> usize {
        self.channels
    }
}
