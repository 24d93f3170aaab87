// Storage module - JSON document holding every platform

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{LedgerError, Result};
use crate::ledger::{Ledger, Platform};

/// Name of the document inside the data directory
pub const STORE_FILE_NAME: &str = "platforms.json";

/// File-backed store for a [`Ledger`].
///
/// The document is a JSON array of platform objects. There is no locking:
/// two processes saving the same file will overwrite each other.
#[derive(Debug, Clone)]
pub struct PlatformStore {
    path: PathBuf,
}

impl PlatformStore {
    /// Store at `<data_dir>/platforms.json`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(STORE_FILE_NAME),
        }
    }

    /// Store at an explicit file path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger, degrading a malformed document to an empty ledger.
    ///
    /// A missing file is a first run and also yields an empty ledger.
    /// Other I/O failures are returned.
    pub fn load(&self) -> Result<Ledger> {
        match self.load_strict() {
            Err(LedgerError::CorruptStore { path, source }) => {
                warn!(
                    "Ignoring unreadable store at {:?} ({}); starting with no platforms",
                    path, source
                );
                Ok(Ledger::new())
            }
            other => other,
        }
    }

    /// Load the ledger, reporting a malformed document as
    /// [`LedgerError::CorruptStore`].
    pub fn load_strict(&self) -> Result<Ledger> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No store at {:?}, starting empty", self.path);
                return Ok(Ledger::new());
            }
            Err(e) => return Err(LedgerError::Io(e)),
        };

        let platforms: Vec<Platform> =
            serde_json::from_slice(&contents).map_err(|source| LedgerError::CorruptStore {
                path: self.path.clone(),
                source,
            })?;

        info!("Loaded {} platforms from {:?}", platforms.len(), self.path);
        Ok(Ledger::from_platforms(platforms))
    }

    /// Write every platform to the document.
    ///
    /// The data is written to a sibling temp file and renamed into place, so a
    /// successful call never leaves a half-written document behind.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let write_failed = |source: std::io::Error| LedgerError::StoreWriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_failed)?;
        }

        let platforms: Vec<&Platform> = ledger.platforms().collect();
        let json = serde_json::to_string_pretty(&platforms)
            .map_err(|e| write_failed(std::io::Error::other(e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).map_err(write_failed)?;
        file.write_all(json.as_bytes()).map_err(write_failed)?;
        file.sync_all().map_err(write_failed)?;
        drop(file);
        fs::rename(&tmp_path, &self.path).map_err(write_failed)?;

        info!("Saved {} platforms to {:?}", ledger.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = PlatformStore::new(dir.path().join("data"));
        assert!(store.load().unwrap().is_empty());
        assert!(store.load_strict().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = PlatformStore::new(dir.path().join("nested").join("data"));

        let mut ledger = Ledger::new();
        ledger.add_platform("Vault", dec!(100), dec!(5)).unwrap();
        ledger.deposit("Vault", dec!(50)).unwrap();
        ledger.apply_interest("Vault").unwrap();

        store.save(&ledger).unwrap();
        assert!(store.path().exists());
        assert!(!store.path().with_extension("json.tmp").exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn test_document_uses_plain_numbers() {
        let dir = TempDir::new().unwrap();
        let store = PlatformStore::new(dir.path());
        let mut ledger = Ledger::new();
        ledger.add_platform("Vault", dec!(12.5), dec!(3)).unwrap();
        ledger.withdraw("Vault", dec!(2.5)).unwrap();
        store.save(&ledger).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let entry = &raw[0];
        assert_eq!(entry["name"], "Vault");
        assert_eq!(entry["balance"].as_f64(), Some(10.0));
        assert_eq!(entry["interest_rate"].as_f64(), Some(3.0));
        assert_eq!(entry["history"][0]["type"], "Withdrawal");
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains(r#""balance": 10.00"#));
        assert_eq!(entry["history"][0]["amount"].as_f64(), Some(-2.5));
        assert_eq!(entry["history"][0]["balance"].as_f64(), Some(10.0));
        assert!(entry["history"][0]["timestamp"].is_string());
    }

    #[test]
    fn test_corrupt_file_is_lossy_by_default() {
        let dir = TempDir::new().unwrap();
        let store = PlatformStore::new(dir.path());
        fs::write(store.path(), "[{\"name\": \"Vault\", ").unwrap();

        assert!(store.load().unwrap().is_empty());
        assert!(matches!(
            store.load_strict(),
            Err(LedgerError::CorruptStore { .. })
        ));
    }

    #[test]
    fn test_loads_documents_with_naive_timestamps() {
        let dir = TempDir::new().unwrap();
        let store = PlatformStore::new(dir.path());
        fs::write(
            store.path(),
            r#"[{"name": "Vault", "balance": 150.0, "interest_rate": 5.0,
                "history": [{"type": "Deposit", "amount": 50.0, "balance": 150.0,
                             "timestamp": "2024-03-01T10:15:30.123456"}]}]"#,
        )
        .unwrap();

        let ledger = store.load_strict().unwrap();
        let vault = ledger.get("Vault").unwrap();
        assert_eq!(vault.balance(), dec!(150));
        assert_eq!(vault.history().len(), 1);
        assert_eq!(vault.history()[0].balance_after, dec!(150));
    }

    #[test]
    fn test_missing_history_defaults_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = PlatformStore::new(dir.path());
        fs::write(
            store.path(),
            r#"[{"name": "Vault", "balance": 0, "interest_rate": 0}]"#,
        )
        .unwrap();

        let ledger = store.load_strict().unwrap();
        assert!(ledger.get("Vault").unwrap().history().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_corrupt_not_io() {
        let dir = TempDir::new().unwrap();
        let store = PlatformStore::new(dir.path());
        fs::write(store.path(), b"[\xff\xfe garbage").unwrap();

        assert!(store.load().unwrap().is_empty());
        assert!(matches!(
            store.load_strict(),
            Err(LedgerError::CorruptStore { .. })
        ));
    }

    #[test]
    fn test_offset_timestamps_load() {
        let dir = TempDir::new().unwrap();
        let store = PlatformStore::new(dir.path());
        fs::write(
            store.path(),
            r#"[{"name": "Vault", "balance": 50, "interest_rate": 1,
                "history": [{"type": "Deposit", "amount": 50, "balance": 50,
                             "timestamp": "2024-03-01T10:15:30Z"}]}]"#,
        )
        .unwrap();

        let ledger = store.load_strict().unwrap();
        assert_eq!(ledger.get("Vault").unwrap().history().len(), 1);
    }

    #[test]
    fn test_invalid_platform_makes_document_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = PlatformStore::new(dir.path());
        fs::write(
            store.path(),
            r#"[{"name": "", "balance": -50.0, "interest_rate": -5.0}]"#,
        )
        .unwrap();

        assert!(matches!(
            store.load_strict(),
            Err(LedgerError::CorruptStore { .. })
        ));
        assert!(store.load().unwrap().is_empty());
    }
}
