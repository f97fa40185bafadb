//! Per-aircraft tariffs: the embedded default table and the persisted store
//! of rates the user has entered.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Store location used when none is given.
pub const DEFAULT_TARIFF_STORE_PATH: &str = "data/tariffs.json";

/// Errors writing the tariff store.
#[derive(Debug, Error)]
pub enum TariffStoreError {
    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Default rate for one aircraft.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AircraftTariff {
    /// Aircraft label as shown in the selector.
    pub label: String,
    /// Price per kilometre.
    pub tariff_per_km: f64,
}

/// Default rates by aircraft, in selector order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TariffTable {
    aircraft: Vec<AircraftTariff>,
}

const TARIFFS_TOML: &str = include_str!("../aircraft/tariffs.toml");

impl TariffTable {
    /// The table compiled into the binary.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (a compile-time guarantee
    /// since the file is embedded).
    #[must_use]
    pub fn embedded() -> Self {
        toml::de::from_str(TARIFFS_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded aircraft tariffs: {e}"))
    }

    /// Builds a table from explicit entries.
    #[must_use]
    pub const fn new(aircraft: Vec<AircraftTariff>) -> Self {
        Self { aircraft }
    }

    /// Default rate for `label`, if the aircraft is known.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.aircraft
            .iter()
            .find(|a| a.label == label)
            .map(|a| a.tariff_per_km)
    }

    /// All entries in selector order.
    pub fn iter(&self) -> impl Iterator<Item = &AircraftTariff> {
        self.aircraft.iter()
    }

    /// Number of aircraft.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }
}

/// Rates the user has saved, keyed by aircraft label and persisted as one
/// JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct TariffStore {
    path: PathBuf,
    rates: BTreeMap<String, f64>,
}

impl TariffStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. So is a file that is not a JSON
    /// object; entries that are not positive numbers (or numeric strings)
    /// are skipped. Neither case is an error.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let rates = match fs::read_to_string(&path) {
            Ok(data) => parse_rates(&path, &data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No tariff store at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                log::warn!("Could not read tariff store {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, rates }
    }

    /// An empty store that will be written to `path` on [`Self::save`].
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rates: BTreeMap::new(),
        }
    }

    /// Where the store is persisted.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved rate for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.rates.get(label).copied()
    }

    /// Records a rate for `label`. Non-positive or non-finite rates remove
    /// the entry instead.
    pub fn set(&mut self, label: &str, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.rates.insert(label.to_string(), rate);
        } else {
            self.rates.remove(label);
        }
    }

    /// Number of saved rates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Writes the store, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// * If the directory or file cannot be written
    /// * If the rates fail to serialize
    pub fn save(&self) -> Result<(), TariffStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.rates)?;
        fs::write(&self.path, json)?;
        log::debug!(
            "Saved {} tariff(s) to {}",
            self.rates.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn parse_rates(path: &Path, data: &str) -> BTreeMap<String, f64> {
    let object = match serde_json::from_str::<serde_json::Value>(data) {
        Ok(serde_json::Value::Object(object)) => object,
        Ok(_) => {
            log::warn!(
                "Tariff store {} is not a JSON object; ignoring it",
                path.display()
            );
            return BTreeMap::new();
        }
        Err(e) => {
            log::warn!("Tariff store {} is corrupted: {e}", path.display());
            return BTreeMap::new();
        }
    };

    object
        .into_iter()
        .filter_map(|(label, value)| {
            let rate = match &value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => crate::coerce::positive(Some(s.as_str())),
                _ => None,
            };
            match rate.filter(|r| r.is_finite() && *r > 0.0) {
                Some(rate) => Some((label, rate)),
                None => {
                    log::warn!("Skipping unusable saved tariff for {label:?}: {value}");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("charter_quote_tariffs_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn embedded_table_has_default_rates() {
        let table = TariffTable::embedded();
        assert_eq!(table.len(), 6);
        assert_eq!(table.get("Hawker 400"), Some(36.0));
        assert_eq!(table.get("King Air C90"), Some(30.0));
        assert_eq!(table.get("Sêneca IV"), Some(22.0));
        assert_eq!(table.get("Cirrus SR22"), Some(15.0));
        assert_eq!(table.get("Learjet 45"), None);
        assert_eq!(
            table.iter().next().map(|a| a.label.as_str()),
            Some("Hawker 400")
        );
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = scratch("missing");
        let store = TariffStore::load(dir.join("tariffs.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupted_file_is_empty_store() {
        let dir = scratch("corrupted");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tariffs.json");

        fs::write(&path, "{not json").unwrap();
        assert!(TariffStore::load(&path).is_empty());

        fs::write(&path, "[36]").unwrap();
        assert!(TariffStore::load(&path).is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn skips_unusable_entries() {
        let dir = scratch("entries");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tariffs.json");
        fs::write(
            &path,
            r#"{"Phenom 100": 40, "Hawker 400": "38,5", "Citation II": "x", "King Air C90": -1}"#,
        )
        .unwrap();

        let store = TariffStore::load(&path);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("Phenom 100"), Some(40.0));
        assert_eq!(store.get("Hawker 400"), Some(38.5));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_creates_directory_and_reloads() {
        let dir = scratch("save");
        let path = dir.join("nested").join("tariffs.json");

        let mut store = TariffStore::empty(&path);
        store.set("Phenom 100", 41.0);
        store.set("Cirrus SR22", 0.0);
        store.save().unwrap();

        let reloaded = TariffStore::load(&path);
        assert_eq!(reloaded.get("Phenom 100"), Some(41.0));
        assert_eq!(reloaded.get("Cirrus SR22"), None);
        assert_eq!(reloaded, store);

        let _ = fs::remove_dir_all(&dir);
    }
}
