//! Voice profiles and per-provider voice catalogs.

pub mod profile;

pub use profile::VoiceProfile;

use std::collections::BTreeSet;

use crate::error::CoraError;

pub const OPENAI_PROVIDER: &str = "openai";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini-tts";
pub const ELEVEN_LABS_PROVIDER: &str = "11labs";
pub const ELEVEN_LABS_DEFAULT_MODEL: &str = "eleven_multilingual_v2";
pub const AZURE_PROVIDER: &str = "azure";

const OPENAI_VOICES: &[(&str, &str)] = &[
    ("fable", "fable"),
    ("verse", "verse"),
    ("sage", "sage"),
    ("onyx", "onyx"),
    ("marin", "marin"),
    ("cedar", "cedar"),
    ("ballad", "ballad"),
    ("shimmer", "shimmer"),
    ("coral", "coral"),
    ("ash", "ash"),
    ("nova", "nova"),
    ("echo", "echo"),
    ("alloy", "alloy"),
];

const ELEVEN_LABS_VOICES: &[(&str, &str)] = &[
    ("payne", "wPZU8v1TgihzaR9aQ8Wj"),
    ("will", "bIHbv24MWmeRgasZH58o"),
    ("manav", "2BsEFcU7jUhLaUwV4h7l"),
    ("alon", "MZb4jD8N3GIedB0K3Xoi"),
    ("alex_ozwyn", "ZncGbt9ecxkwpmaX6V9z"),
    ("christina", "2qfp6zPuviqeCOZIE9RZ"),
    ("jennifer", "TcAStCk0faGcHdNIFX23"),
    ("jessica", "cgSgspJ2msm6clMCkdW9"),
    ("edward", "2BJW5coyhAzSr8STdHbE"),
    ("annabell", "02y4x5i9YrzYlFvGo1pp"),
    ("greg", "kfAgTu73p0UPH0WkLC53"),
    ("clyde", "2EiwWnXFnvU5JabPnv8n"),
    ("jake", "yDUXXKsu0jF5vdJnWAPU"),
    ("kim", "LLEUnU5vlkaEV6dSdkOl"),
    ("chelsea", "NHRgOEwqx5WZNClv5sat"),
    ("dakota", "P7x743VjyZEOihNNygQ9"),
    ("david", "v9LgF91V36LGgbLX3iHW"),
    ("gigi", "jBpfuIE2acCO8z3wKNLl"),
    ("nikky", "lTvtSobl0SaWDikyBCB6"),
    ("clara", "Qggl4b0xRMiqOwhPtVWT"),
    ("jacob_eder", "0c14Fsfhfnl8M9pCB5pf"),
    ("carlose", "fsl9wxwCbGk0XzqV61Fj"),
    ("emily", "LcfcDJNUP1GQjkzn1xUU"),
    ("roger", "CwhRBWXzGAHq8TQ4Fs17"),
    ("bill", "pqHfZKP75CvOlQylNhV4"),
    ("paola", "uCn98X6tKa49TnMFbwg6"),
    ("karen", "jqVMajy0TkayOvIB8eCz"),
    ("freya", "jsCqWAovK2LkecY7zXl4"),
    ("mark", "UgBBYS2sOqTuMpoF3BR0"),
    ("storytime", "iUqOXhMfiOIbBejNtfLR"),
    ("ana_maria", "m7yTemJqdIqrcNleANfX"),
];

const AZURE_VOICES: &[(&str, &str)] = &[("ximena", "es-ES-XimenaNeural")];

/// Named voices for one provider, plus a default model applied to each.
///
/// ```
/// use cora::voices::VoiceCatalog;
///
/// let nova = VoiceCatalog::openai().voice("nova").unwrap();
/// assert_eq!(nova.payload()["voiceId"], "nova");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceCatalog {
    provider: String,
    default_model: Option<String>,
    voices: Vec<(String, String)>,
}

impl VoiceCatalog {
    /// Build a catalog, rejecting duplicate names or voice ids.
    pub fn new<N, I>(
        provider: impl Into<String>,
        default_model: Option<String>,
        entries: impl IntoIterator<Item = (N, I)>,
    ) -> Result<Self, CoraError>
    where
        N: Into<String>,
        I: Into<String>,
    {
        let voices = entries
            .into_iter()
            .map(|(name, id)| (name.into(), id.into()))
            .collect::<Vec<_>>();
        validate_voice_entries(&voices)?;
        Ok(Self {
            provider: provider.into(),
            default_model,
            voices,
        })
    }

    fn preset(provider: &str, default_model: Option<&str>, entries: &[(&str, &str)]) -> Self {
        Self {
            provider: provider.to_string(),
            default_model: default_model.map(str::to_string),
            voices: entries
                .iter()
                .map(|(name, id)| (name.to_string(), id.to_string()))
                .collect(),
        }
    }

    pub fn openai() -> Self {
        Self::preset(OPENAI_PROVIDER, Some(OPENAI_DEFAULT_MODEL), OPENAI_VOICES)
    }

    pub fn eleven_labs() -> Self {
        Self::preset(
            ELEVEN_LABS_PROVIDER,
            Some(ELEVEN_LABS_DEFAULT_MODEL),
            ELEVEN_LABS_VOICES,
        )
    }

    /// Azure voices carry no model.
    pub fn azure() -> Self {
        Self::preset(AZURE_PROVIDER, None, AZURE_VOICES)
    }

    /// Replace the model applied to catalog voices.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Add account-specific voices, rejecting any name or id already present.
    pub fn with_additional_voices<N, I>(
        mut self,
        additions: impl IntoIterator<Item = (N, I)>,
    ) -> Result<Self, CoraError>
    where
        N: Into<String>,
        I: Into<String>,
    {
        self.voices
            .extend(additions.into_iter().map(|(name, id)| (name.into(), id.into())));
        validate_voice_entries(&self.voices)?;
        Ok(self)
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn default_model(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    /// Voice names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.voices.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a voice by name.
    pub fn voice(&self, name: &str) -> Option<VoiceProfile> {
        self.voices
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, id)| self.custom(id, None, None))
    }

    /// A profile for a voice id that is not in the catalog.
    pub fn custom(&self, voice_id: &str, model: Option<&str>, speed: Option<f64>) -> VoiceProfile {
        VoiceProfile {
            provider: self.provider.clone(),
            voice_id: voice_id.to_string(),
            model: model
                .map(str::to_string)
                .or_else(|| self.default_model.clone()),
            speed,
        }
    }
}

fn validate_voice_entries(entries: &[(String, String)]) -> Result<(), CoraError> {
    let name_dupes = duplicates(entries.iter().map(|(name, _)| name.as_str()));
    let id_dupes = duplicates(entries.iter().map(|(_, id)| id.as_str()));
    if name_dupes.is_empty() && id_dupes.is_empty() {
        return Ok(());
    }

    let mut problems = Vec::new();
    if !name_dupes.is_empty() {
        problems.push(format!("names: {}", join(&name_dupes)));
    }
    if !id_dupes.is_empty() {
        problems.push(format!("voice_ids: {}", join(&id_dupes)));
    }
    Err(CoraError::invalid(format!(
        "Duplicate voice entries detected ({})",
        problems.join("; ")
    )))
}

fn duplicates<'a>(values: impl Iterator<Item = &'a str>) -> BTreeSet<&'a str> {
    let mut seen = BTreeSet::new();
    let mut dupes = BTreeSet::new();
    for value in values {
        if !seen.insert(value) {
            dupes.insert(value);
        }
    }
    dupes
}

fn join(values: &BTreeSet<&str>) -> String {
    values.iter().copied().collect::<Vec<_>>().join(", ")
}
