use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/bmd/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmdConfig {
    /// Maximum concurrent tasks per fan-out stage (resolve, download, rename).
    pub max_concurrent_tasks: usize,
    /// Number of leading words kept when shortening a downloaded file name.
    pub name_words: usize,
    /// Target bitrate for audio extraction, in kbit/s.
    pub audio_bitrate_kbps: u32,
    /// Resolution ceiling (height in pixels) for the preferred video profile.
    pub video_height_cap: u32,
    /// Socket timeout forwarded to the fetch tool, in seconds.
    pub socket_timeout_secs: u64,
}

impl Default for BmdConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: 8,
            name_words: 6,
            audio_bitrate_kbps: 192,
            video_height_cap: 1080,
            socket_timeout_secs: 30,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bmd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BmdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BmdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: BmdConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = BmdConfig::default();
        assert_eq!(cfg.max_concurrent_tasks, 8);
        assert_eq!(cfg.name_words, 6);
        assert_eq!(cfg.audio_bitrate_kbps, 192);
        assert_eq!(cfg.video_height_cap, 1080);
        assert_eq!(cfg.socket_timeout_secs, 30);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = BmdConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: BmdConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.max_concurrent_tasks, cfg.max_concurrent_tasks);
        assert_eq!(parsed.name_words, cfg.name_words);
        assert_eq!(parsed.audio_bitrate_kbps, cfg.audio_bitrate_kbps);
        assert_eq!(parsed.video_height_cap, cfg.video_height_cap);
        assert_eq!(parsed.socket_timeout_secs, cfg.socket_timeout_secs);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            max_concurrent_tasks = 2
            name_words = 4
            audio_bitrate_kbps = 128
            video_height_cap = 720
            socket_timeout_secs = 10
        "#;
        let cfg: BmdConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.max_concurrent_tasks, 2);
        assert_eq!(cfg.name_words, 4);
        assert_eq!(cfg.audio_bitrate_kbps, 128);
        assert_eq!(cfg.video_height_cap, 720);
        assert_eq!(cfg.socket_timeout_secs, 10);
    }
}
