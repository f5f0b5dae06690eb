//! Configuration loader with multi-source merging

use super::file_config::{ConfigError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Environment variable overriding the default model id.
pub const MODEL_ENV: &str = "ZSH_TIP_MODEL";

const APP_DIR: &str = "zsh-tips-agent";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `model_override` (the `--model` flag)
    /// 2. Explicit config path (if provided); must exist
    /// 3. Global config, see [`global_config_path`](Self::global_config_path)
    /// 4. `ZSH_TIP_MODEL`
    /// 5. Default values
    pub fn load(
        config_path: Option<&Path>,
        model_override: Option<&str>,
    ) -> Result<FileConfig, ConfigError> {
        Self::load_from(
            MODEL_ENV,
            Self::global_config_path().as_deref(),
            config_path,
            model_override,
        )
    }

    fn load_from(
        model_env: &str,
        global_path: Option<&Path>,
        config_path: Option<&Path>,
        model_override: Option<&str>,
    ) -> Result<FileConfig, ConfigError> {
        let model_key = model_env.to_string();
        let mut figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(
                Env::raw()
                    .filter(move |key| key.as_str().eq_ignore_ascii_case(&model_key))
                    .map(|_| "model_id".into()),
            );

        if let Some(path) = global_path {
            figment = Self::merge_file(figment, path);
        }

        if let Some(path) = config_path {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = Self::merge_file(figment, path);
        }

        if let Some(model) = model_override.map(str::trim).filter(|m| !m.is_empty()) {
            figment = figment.merge(Serialized::default("model_id", model));
        }

        let config: FileConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// JSON unless the extension says TOML.
    fn merge_file(figment: Figment, path: &Path) -> Figment {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => figment.merge(Toml::file(path)),
            _ => figment.merge(Json::file(path)),
        }
    }

    /// Candidate global config files, in lookup order
    ///
    /// `~/.local/share/zsh-tips-agent/config.json`, then `config.toml` in
    /// the same directory, then `config.json` next to the executable.
    pub fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(home) = dirs::home_dir() {
            let dir = home.join(".local").join("share").join(APP_DIR);
            candidates.push(dir.join("config.json"));
            candidates.push(dir.join("config.toml"));
        }
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(dir.join("config.json"));
        }
        candidates
    }

    /// The first existing global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_candidates().into_iter().find(|p| p.is_file())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>, model_override: Option<&str>) {
        println!("Configuration sources (in priority order):");

        match model_override {
            Some(model) => println!("  [SET  ] --model: {}", model),
            None => println!("  [     ] --model"),
        }

        if let Some(path) = config_path {
            let mark = if path.is_file() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] --config: {}", mark, path.display());
        }

        let active = Self::global_config_path();
        for candidate in Self::global_candidates() {
            if active.as_ref() == Some(&candidate) {
                println!("  [FOUND] Global:  {}", candidate.display());
            } else {
                println!("  [     ] Global:  {}", candidate.display());
            }
        }

        match std::env::var(MODEL_ENV) {
            Ok(value) => println!("  [SET  ] {}: {}", MODEL_ENV, value),
            Err(_) => println!("  [     ] {}", MODEL_ENV),
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const UNSET_ENV: &str = "ZSH_TIP_MODEL_LOADER_TEST_UNSET";

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_from(UNSET_ENV, None, None, None).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_json_then_explicit_toml() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            &dir,
            "config.json",
            r#"{"model_id": "llama3.1", "model_params": {"temperature": 0.3}, "context_tokens": 2048}"#,
        );
        let explicit = write(
            &dir,
            "override.toml",
            "model_id = \"qwen2.5\"\n\n[agent]\nmax_tool_turns = 5\n",
        );

        let config =
            ConfigLoader::load_from(UNSET_ENV, Some(&global), Some(&explicit), None).unwrap();

        assert_eq!(config.model_id, "qwen2.5");
        assert_eq!(config.context_tokens, 2048);
        assert_eq!(config.model_params["temperature"], 0.3);
        assert_eq!(config.agent.max_tool_turns, 5);
        assert_eq!(config.agent.max_protocol_violations, 3);
    }

    #[test]
    fn test_model_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(&dir, "config.json", r#"{"model_id": "llama3.1"}"#);

        let config =
            ConfigLoader::load_from(UNSET_ENV, Some(&global), None, Some("phi4")).unwrap();
        assert_eq!(config.model_id, "phi4");
    }

    #[test]
    fn test_env_overrides_default_but_not_file() {
        let var = "ZSH_TIP_MODEL_LOADER_TEST_SET";
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var(var, "mistral") };

        let config = ConfigLoader::load_from(var, None, None, None).unwrap();
        assert_eq!(config.model_id, "mistral");

        let dir = tempfile::tempdir().unwrap();
        let global = write(&dir, "config.json", r#"{"model_id": "llama3.1"}"#);
        let config = ConfigLoader::load_from(var, Some(&global), None, None).unwrap();
        assert_eq!(config.model_id, "llama3.1");

        unsafe { std::env::remove_var(var) };
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = ConfigLoader::load_from(UNSET_ENV, None, Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_missing_global_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.json");
        assert!(ConfigLoader::load_from(UNSET_ENV, Some(&missing), None, None).is_ok());
    }

    #[test]
    fn test_malformed_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write(&dir, "config.json", "{ not json");
        let err = ConfigLoader::load_from(UNSET_ENV, None, Some(&broken), None).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let config = write(&dir, "config.json", r#"{"evidence": {"timeout_secs": 0}}"#);
        let err = ConfigLoader::load_from(UNSET_ENV, None, Some(&config), None).unwrap_err();
        assert!(matches!(err, ConfigError::Zero(_)));
    }

    #[test]
    fn test_global_candidates_under_share_dir() {
        let candidates = ConfigLoader::global_candidates();
        assert!(
            candidates
                .iter()
                .any(|p| p.ends_with(".local/share/zsh-tips-agent/config.json"))
        );
    }
}
