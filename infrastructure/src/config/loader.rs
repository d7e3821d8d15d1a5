//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "perspective-council";
const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./council.toml` or `./.council.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/perspective-council/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();
        Self::load_from(global.as_deref(), project.as_deref(), config_path.map(|p| p.as_path()))
    }

    /// Merge defaults with the given files, later sources winning
    fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            debug!("Merging config file {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/perspective-council/config.toml if set,
    /// otherwise falls back to ~/.config/perspective-council/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./council.toml or ./.council.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::StrategyKind;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.detection.sensitivity, 0.3);
        assert_eq!(config.synthesis.strategy, "consensus");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("perspective-council"));
    }

    #[test]
    fn test_later_sources_win() {
        let dir = tempfile::tempdir().unwrap();
        let global = write_toml(
            &dir,
            "global.toml",
            "[detection]\nsensitivity = 0.8\n\n[synthesis]\nstrategy = \"weighted\"\n",
        );
        let explicit = write_toml(&dir, "explicit.toml", "[synthesis]\nstrategy = \"facilitator\"\n");

        let config = ConfigLoader::load_from(Some(&global), None, Some(&explicit)).unwrap();

        assert_eq!(config.detection.sensitivity, 0.8);
        assert_eq!(config.synthesis.parse_strategy().0, StrategyKind::Facilitator);
    }

    #[test]
    fn test_partial_heuristics_keep_other_tables() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_toml(
            &dir,
            "council.toml",
            "[heuristics]\nanalytical_traits = [\"methodical\"]\n",
        );

        let config = ConfigLoader::load_from(None, Some(&project), None).unwrap();

        assert_eq!(config.heuristics.analytical_traits, vec!["methodical"]);
        assert!(!config.heuristics.assertive_traits.is_empty());
        assert!(!config.heuristics.phrase_groups.is_empty());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write_toml(&dir, "broken.toml", "[detection]\nsensitivity = \"high\"\n");
        assert!(ConfigLoader::load_from(None, None, Some(&broken)).is_err());
    }
}
