//! Integration-wide constants: defaults and static capability lists.

/// Integration domain, used as the entry title and device identifier scope.
pub const DOMAIN: &str = "mistral_ai_stt";

/// Base URL of the hosted Mistral API.
pub const DEFAULT_API_URL: &str = "https://api.mistral.ai";

/// Transcription model used when neither the entry data nor its options name one.
pub const DEFAULT_STT_MODEL: &str = "voxtral-mini-latest";

/// Sampling temperature sent with every request unless overridden per entry.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Models known to accept streamed transcription requests.
pub const SUPPORTED_MODELS: &[&str] = &["voxtral-mini-latest", "voxtral-mini-2507"];

/// ISO-639-1 codes advertised to the host as supported speech languages.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "af", "ar", "hy", "az", "be", "bs", "bg", "ca", "zh", "hr", "cs", "da", "nl", "en", "et",
    "fi", "fr", "gl", "de", "el", "he", "hi", "hu", "is", "id", "it", "ja", "kn", "kk", "ko",
    "lv", "lt", "mk", "ms", "mr", "mi", "ne", "no", "fa", "pl", "pt", "ro", "ru", "sr", "sk",
    "sl", "es", "sw", "sv", "tl", "ta", "th", "tr", "uk", "ur", "vi", "cy",
];

/// Returns `true` when `language` appears in [`SUPPORTED_LANGUAGES`].
///
/// Regional suffixes are ignored, so `"en-US"` and `"en_GB"` both match `"en"`.
pub fn is_supported_language(language: &str) -> bool {
    language_in(SUPPORTED_LANGUAGES, language)
}

/// Case-insensitive match of `language`'s primary subtag against `languages`.
pub fn language_in(languages: &[&str], language: &str) -> bool {
    let primary = language.split(['-', '_']).next().unwrap_or(language);
    languages.iter().any(|l| l.eq_ignore_ascii_case(primary))
}
