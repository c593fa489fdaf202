//! Loads settings and suggestion data before the terminal is taken over.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;

use super::args::AppArgs;
use crate::compose::Directory;
use crate::typeahead::TypeaheadSettings;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Settings from `--config`, if given, with command-line flags on top.
pub fn load_settings(args: &AppArgs) -> Result<TypeaheadSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            info!("Loading typeahead settings from {}", path.display());
            read_json(path)?
        }
        None => TypeaheadSettings::default(),
    };

    if let Some(items) = args.items {
        settings.items = items;
    }
    if let Some(min_length) = args.min_length {
        settings.min_length = min_length;
    }
    if args.dropup {
        settings.dropup = true;
    }
    Ok(settings)
}

pub fn load_directory(path: Option<&Path>) -> Result<Directory> {
    match path {
        Some(path) => {
            info!("Loading suggestions from {}", path.display());
            read_json(path)
        }
        None => Ok(Directory::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("chat-typeahead-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn file_values_are_overridden_by_flags() {
        let path = temp_file(
            "settings.json",
            r#"{ "items": 3, "min_length": 2, "natural_search": true }"#,
        );
        let args = AppArgs::try_parse_from([
            "chat-typeahead",
            "--config",
            path.to_str().unwrap(),
            "--items",
            "5",
        ])
        .unwrap();

        let settings = load_settings(&args).unwrap();
        assert_eq!(settings.items, 5);
        assert_eq!(settings.min_length, 2);
        assert!(settings.natural_search);
        assert!(settings.tab_is_enter);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn broken_files_name_the_path() {
        let path = temp_file("broken.json", "{ not json");
        let err = load_directory(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
        fs::remove_file(path).unwrap();

        let missing = load_directory(Some(Path::new("/nonexistent/candidates.json")));
        assert!(missing.is_err());
    }

    #[test]
    fn no_file_means_defaults() {
        assert_eq!(load_directory(None).unwrap(), Directory::default());
    }
}
