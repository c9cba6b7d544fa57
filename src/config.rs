use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::assembler::RecordAssembler;
use crate::catalog::{Defaults, FieldCatalog};
use crate::normalize::value::{BooleanMatching, ValueNormalizer};

/// Root configuration structure, deserialized from `.listing-importer/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Constant fields added to every record.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Cell interpretation options.
    #[serde(default)]
    pub normalize: NormalizeConfig,
    /// Extra source columns per canonical field, tried after the built-in ones.
    #[serde(default)]
    pub synonyms: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_price_currency")]
    pub price_currency: String,
    #[serde(default = "default_fees_currency")]
    pub fees_currency: String,
    #[serde(default = "default_timestamp_field")]
    pub timestamp_field: String,
}

fn default_price_currency() -> String {
    "USD".to_string()
}

fn default_fees_currency() -> String {
    "ARS".to_string()
}

fn default_timestamp_field() -> String {
    "processed_at".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            price_currency: default_price_currency(),
            fees_currency: default_fees_currency(),
            timestamp_field: default_timestamp_field(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NormalizeConfig {
    /// `substring` (default) or `token`.
    #[serde(default)]
    pub boolean_matching: BooleanMatching,
}

impl Config {
    /// Build the catalog: the built-in fields plus configured extra synonyms.
    /// Synonyms for a field the catalog does not know are rejected.
    pub fn catalog(&self) -> Result<FieldCatalog> {
        let mut catalog = FieldCatalog::builtin();
        for (field, extra) in &self.synonyms {
            if !catalog.extend_synonyms(field, extra) {
                bail!("[synonyms] names unknown field `{}`", field);
            }
        }
        Ok(catalog)
    }

    pub fn defaults(&self) -> Defaults {
        Defaults::new(
            &self.defaults.price_currency,
            &self.defaults.fees_currency,
            &self.defaults.timestamp_field,
        )
    }

    pub fn assembler(&self) -> Result<RecordAssembler> {
        Ok(RecordAssembler::new(self.catalog()?, self.defaults())
            .with_normalizer(ValueNormalizer::new(self.normalize.boolean_matching)))
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<work_dir>/.listing-importer/config.toml`
/// 3. `~/.config/listing-importer/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(work_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = work_dir.join(".listing-importer").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("listing-importer")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::default();
        assert_eq!(cfg.defaults(), Defaults::default());
        assert_eq!(cfg.normalize.boolean_matching, BooleanMatching::Substring);
        assert_eq!(cfg.catalog().unwrap(), FieldCatalog::builtin());
    }

    #[test]
    fn test_parse_full_config() {
        let cfg: Config = toml::from_str(
            r#"
[defaults]
price_currency = "ARS"
timestamp_field = "imported_at"

[normalize]
boolean_matching = "token"

[synonyms]
price = ["importe", "precio_ars"]
rooms = ["cuartos"]
"#,
        )
        .unwrap();

        assert_eq!(cfg.defaults.price_currency, "ARS");
        assert_eq!(cfg.defaults.fees_currency, "ARS");
        assert_eq!(cfg.defaults.timestamp_field, "imported_at");
        assert_eq!(cfg.normalize.boolean_matching, BooleanMatching::Token);

        let catalog = cfg.catalog().unwrap();
        assert_eq!(
            catalog.get("price").unwrap().synonyms,
            vec!["precio", "precio_usd", "valor", "price", "importe", "precio_ars"]
        );
        assert!(catalog.get("rooms").unwrap().synonyms.contains(&"cuartos".to_string()));
    }

    #[test]
    fn test_unknown_synonym_field_rejected() {
        let cfg: Config = toml::from_str("[synonyms]\ngarden = [\"jardin\"]\n").unwrap();
        assert!(cfg.catalog().is_err());
    }

    #[test]
    fn test_load_from_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".listing-importer")).unwrap();
        std::fs::write(
            dir.path().join(".listing-importer").join("config.toml"),
            "[defaults]\nfees_currency = \"USD\"\n",
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.defaults.fees_currency, "USD");
        assert_eq!(cfg.defaults.price_currency, "USD");
    }

    #[test]
    fn test_override_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[normalize]\nboolean_matching = \"token\"\n").unwrap();

        let cfg = load_config(dir.path(), Some(&path)).unwrap();
        assert_eq!(cfg.normalize.boolean_matching, BooleanMatching::Token);
    }
}
