//! Static capability advertisement and device registry information.

use serde::Serialize;

use crate::audio::{AudioChannels, AudioCodec, AudioFormat, AudioMetadata, BitDepth, SampleRate};
use crate::config::{language_in, DOMAIN, SUPPORTED_LANGUAGES};

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// What a provider accepts.  Advertised to the host, never negotiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub languages: &'static [&'static str],
    pub formats: &'static [AudioFormat],
    pub codecs: &'static [AudioCodec],
    pub bit_depths: &'static [BitDepth],
    pub sample_rates: &'static [SampleRate],
    pub channels: &'static [AudioChannels],
}

/// Uncompressed 16 kHz, 16-bit mono WAV in any supported language.
pub const VOXTRAL_CAPABILITIES: Capabilities = Capabilities {
    languages: SUPPORTED_LANGUAGES,
    formats: &[AudioFormat::Wav],
    codecs: &[AudioCodec::Pcm],
    bit_depths: &[BitDepth::Bits16],
    sample_rates: &[SampleRate::Hz16000],
    channels: &[AudioChannels::Mono],
};

impl Capabilities {
    /// `true` when a stream described by `metadata` matches the advertised
    /// shape.  A missing language hint is always acceptable.
    pub fn supports(&self, metadata: &AudioMetadata) -> bool {
        let language_ok = metadata
            .language
            .as_deref()
            .map_or(true, |lang| language_in(self.languages, lang));

        language_ok
            && self.bit_depths.iter().any(|b| b.bits() == metadata.bit_depth)
            && self.sample_rates.iter().any(|r| r.hz() == metadata.sample_rate)
            && self.channels.iter().any(|c| c.count() == metadata.channel_count)
    }
}

// ---------------------------------------------------------------------------
// DeviceInfo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceEntryType {
    /// A cloud service rather than physical hardware.
    Service,
}

/// Registry entry describing the service behind a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// `(domain, entry_id)` pairs identifying the device.
    pub identifiers: Vec<(String, String)>,
    pub manufacturer: String,
    pub model: String,
    pub entry_type: DeviceEntryType,
}

impl DeviceInfo {
    /// Device info for the hosted Mistral service behind `entry_id`.
    pub fn mistral_service(entry_id: &str) -> Self {
        Self {
            identifiers: vec![(DOMAIN.to_string(), entry_id.to_string())],
            manufacturer: "Mistral AI".into(),
            model: "La Plateforme".into(),
            entry_type: DeviceEntryType::Service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metadata_is_supported() {
        assert!(VOXTRAL_CAPABILITIES.supports(&AudioMetadata::default()));
    }

    #[test]
    fn language_hint_is_checked() {
        let mut m = AudioMetadata::default();
        m.language = Some("en-US".into());
        assert!(VOXTRAL_CAPABILITIES.supports(&m));

        m.language = Some("tlh".into());
        assert!(!VOXTRAL_CAPABILITIES.supports(&m));
    }

    #[test]
    fn narrowed_language_list_is_respected() {
        let french_only = Capabilities {
            languages: &["fr"],
            ..VOXTRAL_CAPABILITIES
        };
        let mut m = AudioMetadata::default();
        m.language = Some("fr_BE".into());
        assert!(french_only.supports(&m));

        m.language = Some("en".into());
        assert!(!french_only.supports(&m));
        assert!(VOXTRAL_CAPABILITIES.supports(&m));
    }

    #[test]
    fn unadvertised_shapes_are_rejected() {
        let stereo = AudioMetadata {
            channel_count: 2,
            ..AudioMetadata::default()
        };
        assert!(!VOXTRAL_CAPABILITIES.supports(&stereo));

        let hi_rate = AudioMetadata {
            sample_rate: 48_000,
            ..AudioMetadata::default()
        };
        assert!(!VOXTRAL_CAPABILITIES.supports(&hi_rate));

        let wide = AudioMetadata {
            bit_depth: 24,
            ..AudioMetadata::default()
        };
        assert!(!VOXTRAL_CAPABILITIES.supports(&wide));
    }

    #[test]
    fn device_info_identifies_entry() {
        let info = DeviceInfo::mistral_service("abc123");
        assert_eq!(info.identifiers, vec![(DOMAIN.to_string(), "abc123".to_string())]);
        assert_eq!(info.manufacturer, "Mistral AI");
        assert_eq!(info.model, "La Plateforme");
        assert_eq!(info.entry_type, DeviceEntryType::Service);
    }
}
