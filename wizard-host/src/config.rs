use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const NVIDIA_API_URL: &str = "https://integrate.api.nvidia.com/v1/chat/completions";

/// Catalogs of selectable models, as (label, model id) pairs.
pub const NVIDIA_MODELS: [(&str, &str); 3] = [
    ("DeepSeek-R1 (Slower, More Creative)", "deepseek-ai/deepseek-r1"),
    ("Llama 3.1 70B (Fast)", "meta/llama-3.1-70b-instruct"),
    ("Llama 3.1 8B (Fastest)", "meta/llama-3.1-8b-instruct"),
];
pub const GEMINI_MODELS: [(&str, &str); 4] = [
    ("Gemini 3.0 Flash - Best (20/day)", "gemini-3-flash-preview"),
    ("Gemini 2.5 Flash - Smart (20/day)", "gemini-2.5-flash"),
    ("Gemini 2.5 Flash Lite - Fast (20/day)", "gemini-2.5-flash-lite"),
    ("Gemma 3 27B - Unlimited (Lower Quality)", "gemma-3-27b-it"),
];

pub const DEFAULT_NVIDIA_MODEL: &str = "meta/llama-3.1-70b-instruct";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const GEMINI_KEY_FILE: &str = ".gemini_api_key";
const NVIDIA_KEY_FILE: &str = ".nvidia_api_key";
// Older installs kept a single key file for the then-only provider.
const LEGACY_KEY_FILE: &str = ".api_key";

/// Which commentary backend to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    Gemini,
    Nvidia,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Gemini => "Google Gemini (Free)",
            Provider::Nvidia => "NVIDIA",
        }
    }

    fn key_file(&self) -> &'static str {
        match self {
            Provider::Gemini => GEMINI_KEY_FILE,
            Provider::Nvidia => NVIDIA_KEY_FILE,
        }
    }
}

/// Commentary settings: the active provider, the model to ask for, and
/// where the per-provider API key files live.
#[derive(Debug, Clone)]
pub struct NarratorConfig {
    pub provider: Provider,
    pub gemini_model: String,
    pub nvidia_model: String,
    key_dir: PathBuf,
}

impl NarratorConfig {
    pub fn new(key_dir: impl Into<PathBuf>) -> Self {
        NarratorConfig {
            provider: Provider::default(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_owned(),
            nvidia_model: DEFAULT_NVIDIA_MODEL.to_owned(),
            key_dir: key_dir.into(),
        }
    }

    /// The model id that the active provider should be asked for.
    pub fn model(&self) -> &str {
        match self.provider {
            Provider::Gemini => &self.gemini_model,
            Provider::Nvidia => &self.nvidia_model,
        }
    }

    /// Read the stored API key for a provider, if any. For NVIDIA the
    /// legacy single-provider key file is consulted as a fallback.
    pub fn load_api_key(&self, provider: Provider) -> Option<String> {
        let mut path = self.key_dir.join(provider.key_file());
        if provider == Provider::Nvidia && !path.exists() {
            let legacy = self.key_dir.join(LEGACY_KEY_FILE);
            if legacy.exists() {
                path = legacy;
            }
        }
        read_key(&path)
    }

    /// Store an API key for a provider, overwriting any previous one.
    pub fn save_api_key(&self, provider: Provider, key: &str) -> io::Result<()> {
        fs::write(self.key_dir.join(provider.key_file()), key)
    }
}

fn read_key(path: &Path) -> Option<String> {
    let key = fs::read_to_string(path).ok()?;
    let key = key.trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = NarratorConfig::new(dir.path());
        assert_eq!(config.load_api_key(Provider::Gemini), None);

        config.save_api_key(Provider::Gemini, "g-key\n").unwrap();
        config.save_api_key(Provider::Nvidia, "n-key").unwrap();
        assert_eq!(config.load_api_key(Provider::Gemini).as_deref(), Some("g-key"));
        assert_eq!(config.load_api_key(Provider::Nvidia).as_deref(), Some("n-key"));
    }

    #[test]
    fn test_nvidia_falls_back_to_legacy_key_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".api_key"), "old-key").unwrap();
        let config = NarratorConfig::new(dir.path());
        assert_eq!(config.load_api_key(Provider::Nvidia).as_deref(), Some("old-key"));
        // Gemini never had a legacy file
        assert_eq!(config.load_api_key(Provider::Gemini), None);

        // a provider-specific file wins over the legacy one
        config.save_api_key(Provider::Nvidia, "new-key").unwrap();
        assert_eq!(config.load_api_key(Provider::Nvidia).as_deref(), Some("new-key"));
    }

    #[test]
    fn test_active_model_follows_provider() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = NarratorConfig::new(dir.path());
        assert_eq!(config.model(), DEFAULT_GEMINI_MODEL);
        config.provider = Provider::Nvidia;
        assert_eq!(config.model(), DEFAULT_NVIDIA_MODEL);
    }
}
