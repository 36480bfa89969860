use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Persistent country-name to ISO-3 code mapping.
///
/// Backing store is a flat UTF-8 text file, one `CODE:NAME` record per line,
/// split on the first colon only. The file is meant to stay hand-editable,
/// so every mutation re-reads it and rewrites it whole; at country scale the
/// cost is irrelevant. There is no locking discipline — last writer wins.
pub struct CodeRegistry {
    path: PathBuf,
}

impl CodeRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing file and build the name -> code mapping.
    ///
    /// A missing file is a hard error, not an empty registry: silently
    /// mapping nothing would poison every downstream figure. Iteration order
    /// of the returned map matches file order.
    pub fn load(&self) -> Result<IndexMap<String, String>> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::storage(&self.path, e.to_string()))?;

        let mut codes = IndexMap::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            let Some((code, name)) = line.split_once(':') else {
                return Err(Error::storage(
                    &self.path,
                    format!("line {} is not a CODE:NAME record: {:?}", idx + 1, raw),
                ));
            };
            codes.insert(name.to_string(), code.to_string());
        }
        Ok(codes)
    }

    /// Add or replace the code for a country.
    ///
    /// Codes are unique across the whole registry, so this fails with
    /// [`Error::DuplicateCode`] if any entry already carries `code` — the
    /// error names every holder, since a hand-edited file may contain more
    /// than one. The file is untouched on failure. On success the whole file
    /// is rewritten: existing entries keep their order, a new country is
    /// appended last.
    pub fn add(&self, name: &str, code: &str) -> Result<()> {
        let mut codes = self.load()?;

        let holders: Vec<String> = codes
            .iter()
            .filter(|(_, c)| c.as_str() == code)
            .map(|(n, _)| n.clone())
            .collect();
        if !holders.is_empty() {
            return Err(Error::DuplicateCode {
                code: code.to_string(),
                names: holders,
            });
        }

        codes.insert(name.to_string(), code.to_string());
        self.rewrite(&codes)?;
        info!("Added <{}:{}> to the registry.", code, name);
        Ok(())
    }

    /// Remove every entry carrying `code` and rewrite the file.
    ///
    /// In a well-maintained registry at most one entry matches, but a
    /// corrupted file may hold several; all of them go. An absent code is a
    /// no-op and leaves the file byte-identical (no rewrite at all, so even
    /// hand-edited spacing survives).
    pub fn remove(&self, code: &str) -> Result<()> {
        let mut codes = self.load()?;

        let before = codes.len();
        codes.retain(|_, c| c.as_str() != code);
        if codes.len() == before {
            return Ok(());
        }

        self.rewrite(&codes)?;
        info!("Removed <{}> from the registry.", code);
        Ok(())
    }

    /// Create the backing file seeded with [`SEED_CODES`]. Refuses to clobber
    /// an existing file unless `force` is set.
    pub fn init(&self, force: bool) -> Result<()> {
        if self.path.exists() && !force {
            return Err(Error::storage(
                &self.path,
                "file already exists (use force to overwrite)",
            ));
        }
        let seeded: IndexMap<String, String> = SEED_CODES
            .iter()
            .map(|(code, name)| (name.to_string(), code.to_string()))
            .collect();
        self.rewrite(&seeded)?;
        info!("Seeded registry with {} entries.", seeded.len());
        Ok(())
    }

    fn rewrite(&self, codes: &IndexMap<String, String>) -> Result<()> {
        let mut out = String::new();
        for (name, code) in codes {
            // `write!` to a String cannot fail
            let _ = writeln!(out, "{}:{}", code, name);
        }
        fs::write(&self.path, out).map_err(|e| Error::storage(&self.path, e.to_string()))
    }
}

/// Starter `(code, name)` pairs written by [`CodeRegistry::init`]. Not a full
/// ISO 3166-1 table — the registry exists precisely so operators can extend
/// it — just enough to make a fresh install useful.
pub const SEED_CODES: &[(&str, &str)] = &[
    ("AUS", "Australia"),
    ("AUT", "Austria"),
    ("BEL", "Belgium"),
    ("BRA", "Brazil"),
    ("CAN", "Canada"),
    ("CHE", "Switzerland"),
    ("CHN", "China"),
    ("CZE", "Czechia"),
    ("DEU", "Germany"),
    ("DNK", "Denmark"),
    ("ESP", "Spain"),
    ("FIN", "Finland"),
    ("FRA", "France"),
    ("GBR", "United Kingdom"),
    ("GRC", "Greece"),
    ("HUN", "Hungary"),
    ("IND", "India"),
    ("IRL", "Ireland"),
    ("ITA", "Italy"),
    ("JPN", "Japan"),
    ("KOR", "South Korea"),
    ("MEX", "Mexico"),
    ("NLD", "Netherlands"),
    ("NOR", "Norway"),
    ("POL", "Poland"),
    ("PRT", "Portugal"),
    ("ROU", "Romania"),
    ("SWE", "Sweden"),
    ("USA", "United States"),
    ("ZAF", "South Africa"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn registry_with(lines: &str) -> (TempDir, CodeRegistry) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iso3.registry");
        fs::write(&path, lines).unwrap();
        (dir, CodeRegistry::new(path))
    }

    #[test]
    fn test_load_builds_name_to_code_mapping() {
        let (_dir, reg) = registry_with("FRA:France\nUSA:United States\n");
        let codes = reg.load().unwrap();
        assert_eq!(codes.get("France").map(String::as_str), Some("FRA"));
        assert_eq!(codes.get("United States").map(String::as_str), Some("USA"));
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn test_load_splits_on_first_colon_only() {
        let (_dir, reg) = registry_with("COD:Congo: DR\n");
        let codes = reg.load().unwrap();
        assert_eq!(codes.get("Congo: DR").map(String::as_str), Some("COD"));
    }

    #[test]
    fn test_load_missing_file_is_storage_error() {
        let reg = CodeRegistry::new(PathBuf::from("/nonexistent/iso3.registry"));
        assert!(matches!(reg.load(), Err(Error::Storage { .. })));
    }

    #[test]
    fn test_load_rejects_line_without_colon() {
        let (_dir, reg) = registry_with("FRA:France\ngarbage\n");
        let err = reg.load().unwrap_err();
        match err {
            Error::Storage { reason, .. } => assert!(reason.contains("line 2")),
            other => panic!("expected Storage, got {:?}", other),
        }
    }

    #[test]
    fn test_add_then_load_round_trips() {
        let (_dir, reg) = registry_with("FRA:France\n");
        reg.add("Germany", "DEU").unwrap();
        let codes = reg.load().unwrap();
        assert_eq!(codes.get("Germany").map(String::as_str), Some("DEU"));
    }

    #[test]
    fn test_add_appends_and_preserves_order() {
        let (_dir, reg) = registry_with("FRA:France\nUSA:United States\n");
        reg.add("Germany", "DEU").unwrap();
        let content = fs::read_to_string(reg.path()).unwrap();
        assert_eq!(content, "FRA:France\nUSA:United States\nDEU:Germany\n");
    }

    #[test]
    fn test_add_replaces_code_for_existing_country_in_place() {
        let (_dir, reg) = registry_with("FRA:France\nUSA:United States\n");
        reg.add("France", "FXX").unwrap();
        let content = fs::read_to_string(reg.path()).unwrap();
        assert_eq!(content, "FXX:France\nUSA:United States\n");
    }

    #[test]
    fn test_add_duplicate_code_fails_and_leaves_file_untouched() {
        let (_dir, reg) = registry_with("FRA:France\nUSA:United States\n");
        let before = fs::read(reg.path()).unwrap();

        let err = reg.add("Frankreich", "FRA").unwrap_err();
        match err {
            Error::DuplicateCode { code, names } => {
                assert_eq!(code, "FRA");
                assert_eq!(names, vec!["France".to_string()]);
            }
            other => panic!("expected DuplicateCode, got {:?}", other),
        }

        assert_eq!(fs::read(reg.path()).unwrap(), before);
    }

    #[test]
    fn test_add_duplicate_reports_every_holder_of_a_corrupt_store() {
        let (_dir, reg) = registry_with("FRA:France\nFRA:Gaul\n");
        let err = reg.add("Frankreich", "FRA").unwrap_err();
        match err {
            Error::DuplicateCode { names, .. } => {
                assert_eq!(names, vec!["France".to_string(), "Gaul".to_string()]);
            }
            other => panic!("expected DuplicateCode, got {:?}", other),
        }
    }

    #[test]
    fn test_add_same_pair_again_is_still_a_duplicate() {
        // The uniqueness check runs on the code alone, before the key is
        // consulted — re-adding an existing pair is rejected too.
        let (_dir, reg) = registry_with("FRA:France\n");
        assert!(matches!(
            reg.add("France", "FRA"),
            Err(Error::DuplicateCode { .. })
        ));
    }

    #[test]
    fn test_remove_drops_entry_and_rewrites() {
        let (_dir, reg) = registry_with("FRA:France\nUSA:United States\n");
        reg.remove("FRA").unwrap();
        let codes = reg.load().unwrap();
        assert!(!codes.values().any(|c| c == "FRA"));
        let content = fs::read_to_string(reg.path()).unwrap();
        assert_eq!(content, "USA:United States\n");
    }

    #[test]
    fn test_remove_drops_every_match() {
        let (_dir, reg) = registry_with("FRA:France\nFRA:Gaul\nUSA:United States\n");
        reg.remove("FRA").unwrap();
        let content = fs::read_to_string(reg.path()).unwrap();
        assert_eq!(content, "USA:United States\n");
    }

    #[test]
    fn test_remove_absent_code_is_a_noop() {
        // Hand-edited spacing must survive: absence of a match skips the
        // rewrite entirely.
        let (_dir, reg) = registry_with("FRA:France\n  USA:United States\n");
        let before = fs::read(reg.path()).unwrap();
        reg.remove("XYZ").unwrap();
        assert_eq!(fs::read(reg.path()).unwrap(), before);
    }

    #[test]
    fn test_init_seeds_and_refuses_to_clobber() {
        let dir = TempDir::new().unwrap();
        let reg = CodeRegistry::new(dir.path().join("iso3.registry"));
        reg.init(false).unwrap();

        let codes = reg.load().unwrap();
        assert_eq!(codes.get("France").map(String::as_str), Some("FRA"));
        assert_eq!(codes.len(), SEED_CODES.len());

        assert!(matches!(reg.init(false), Err(Error::Storage { .. })));
        assert!(reg.init(true).is_ok());
    }
}
