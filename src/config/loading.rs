use std::{
    fs,
    path::{Path, PathBuf},
};

use toml::{Table, Value};
use tracing::{debug, instrument};

use crate::core::{ClockError, Result};

use super::Config;

const IMPORT_PREFIX: char = '@';

impl Config {
    /// Loads a configuration file together with the files it imports.
    ///
    /// Top-level keys starting with `@` name files to import, relative to
    /// `path`. Imported tables are merged in order, and the main file is
    /// merged last so its values win.
    ///
    /// # Errors
    /// Returns an error if any file cannot be read or parsed, if the merged
    /// result does not match the configuration schema, or if a clock option is
    /// out of range.
    #[instrument]
    pub fn load_with_imports(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let mut main: Table =
            toml::from_str(&content).map_err(|e| ClockError::toml_parse(e, Some(path)))?;

        let import_keys: Vec<String> = main
            .keys()
            .filter(|key| key.starts_with(IMPORT_PREFIX))
            .cloned()
            .collect();

        let mut merged = Table::new();
        for key in import_keys {
            main.remove(&key);
            let import_path = Self::resolve_import_path(path, &key[1..])?;
            debug!(path = %import_path.display(), "importing config file");
            merge_tables(&mut merged, Self::load_import_file(&import_path)?);
        }
        merge_tables(&mut merged, main);

        let config: Config = Value::Table(merged)
            .try_into()
            .map_err(|e| ClockError::toml_parse(e, Some(path)))?;
        config.clock.validate()?;
        Ok(config)
    }

    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_default() -> Result<Config> {
        let path = super::ConfigPaths::main_config()?;
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        Self::load_with_imports(&path)
    }

    /// Resolves an import relative to the importing file, adding `.toml` when
    /// no extension is given.
    ///
    /// # Errors
    /// Returns `ClockError::ImportError` if `base_path` has no parent directory.
    pub fn resolve_import_path(base_path: &Path, import_path: &str) -> Result<PathBuf> {
        let parent = base_path
            .parent()
            .ok_or_else(|| ClockError::import("importing file has no parent", base_path))?;

        let mut import_pathbuf = PathBuf::from(import_path);
        if import_pathbuf.extension().is_none() {
            import_pathbuf.set_extension("toml");
        }

        Ok(parent.join(import_pathbuf))
    }

    fn load_import_file(path: &Path) -> Result<Table> {
        let content = fs::read_to_string(path).map_err(|e| ClockError::import(e, path))?;

        toml::from_str(&content).map_err(|e| ClockError::toml_parse(e, Some(path)))
    }
}

/// Deep-merges `overlay` into `base`; overlay values win on conflict.
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, overlay_value) in overlay {
        match (base.get_mut(&key), overlay_value) {
            (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
                merge_tables(base_table, overlay_table);
            }
            (_, overlay_value) => {
                base.insert(key, overlay_value);
            }
        }
    }
}
