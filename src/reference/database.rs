use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::builtin::TestDefinition;
use super::{normalize_label, ReferenceError};

/// Physiological range given to tests that only exist in the override table.
pub const OPEN_VALID_RANGE: (f64, f64) = (0.0, 99999.0);

/// One test as known to the database: identification, sanity bounds and
/// clinical reference range. `low == high == 0` means no clinical range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceEntry {
    pub key: String,
    pub aliases: Vec<String>,
    pub valid: (f64, f64),
    pub low: f64,
    pub high: f64,
    pub unit: String,
}

impl ReferenceEntry {
    fn from_definition(def: &TestDefinition) -> Self {
        Self {
            key: def.key.to_string(),
            aliases: def.aliases.iter().map(|a| a.to_string()).collect(),
            valid: def.valid,
            low: 0.0,
            high: 0.0,
            unit: String::new(),
        }
    }

    pub fn has_clinical_range(&self) -> bool {
        self.high > 0.0
    }

    /// Inclusive physiological bound check.
    pub fn is_plausible(&self, value: f64) -> bool {
        value >= self.valid.0 && value <= self.valid.1
    }
}

/// Canonical test key → reference entry, in insertion order:
/// built-in definitions first, override-only tests after.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDatabase {
    entries: Vec<ReferenceEntry>,
    index: HashMap<String, usize>,
}

/// Column positions in the override table header.
struct OverrideColumns {
    name: usize,
    low: Option<usize>,
    high: Option<usize>,
    unit: Option<usize>,
}

impl OverrideColumns {
    fn from_headers(headers: &StringRecord) -> Result<Self, ReferenceError> {
        let position = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim_matches('\u{feff}').trim().eq_ignore_ascii_case(wanted))
        };
        let name = position("testname").ok_or(ReferenceError::MissingColumn("testname"))?;
        Ok(Self {
            name,
            low: position("lowvalue"),
            high: position("uppervalue"),
            unit: position("unit"),
        })
    }
}

impl ReferenceDatabase {
    /// Database holding only the given definitions, clinical ranges zeroed.
    pub fn from_definitions(definitions: &[TestDefinition]) -> Self {
        let mut db = Self::default();
        for def in definitions {
            db.push(ReferenceEntry::from_definition(def));
        }
        db
    }

    /// Build from the default table plus an optional override file.
    ///
    /// An absent, unreadable or headerless override file leaves the
    /// defaults in place; this never fails.
    pub fn build(definitions: &[TestDefinition], override_path: Option<&Path>) -> Self {
        let mut db = Self::from_definitions(definitions);

        let Some(path) = override_path else {
            return db;
        };
        if !path.exists() {
            debug!(path = %path.display(), "No reference table, using built-in defaults");
            return db;
        }

        match std::fs::File::open(path)
            .map_err(ReferenceError::from)
            .and_then(|file| db.apply_overrides(file))
        {
            Ok(applied) => {
                info!(path = %path.display(), applied, total = db.len(), "Loaded reference table");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Reference table unusable, using built-in defaults");
            }
        }
        db
    }

    /// Merge rows of a `testname, lowvalue, uppervalue[, unit]` table.
    ///
    /// Rows with a blank name or non-numeric bounds are skipped. Returns the
    /// number of rows applied.
    pub fn apply_overrides<R: Read>(&mut self, reader: R) -> Result<usize, ReferenceError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let columns = OverrideColumns::from_headers(reader.headers()?)?;

        let mut applied = 0;
        for (row, record) in reader.records().enumerate() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    debug!(row, error = %e, "Skipping unreadable reference row");
                    continue;
                }
            };
            if self.apply_row(&record, &columns) {
                applied += 1;
            } else {
                debug!(row, "Skipping malformed reference row");
            }
        }
        Ok(applied)
    }

    fn apply_row(&mut self, record: &StringRecord, columns: &OverrideColumns) -> bool {
        let raw = record.get(columns.name).unwrap_or("").trim();
        if raw.is_empty() {
            return false;
        }

        let bound = |col: Option<usize>| -> Option<f64> {
            match col {
                // An absent column reads as zero, an unparseable cell rejects the row.
                None => Some(0.0),
                Some(i) => record.get(i).unwrap_or("").trim().parse::<f64>().ok(),
            }
        };
        let (Some(low), Some(high)) = (bound(columns.low), bound(columns.high)) else {
            return false;
        };
        let unit = columns
            .unit
            .and_then(|i| record.get(i))
            .map(|u| u.trim().to_string());

        let idx = match self.find_by_declared_name(raw) {
            Some(idx) => idx,
            None => {
                let alias = normalize_label(raw);
                let key = alias.to_uppercase();
                debug!(key = %key, "Adding override-only test");
                self.push(ReferenceEntry {
                    key,
                    aliases: vec![alias],
                    valid: OPEN_VALID_RANGE,
                    low: 0.0,
                    high: 0.0,
                    unit: String::new(),
                })
            }
        };

        let entry = &mut self.entries[idx];
        entry.low = low;
        entry.high = high;
        if let Some(unit) = unit {
            entry.unit = unit;
        }
        true
    }

    /// Entry whose alias or canonical key equals the declared name,
    /// ignoring case and whitespace runs.
    fn find_by_declared_name(&self, raw: &str) -> Option<usize> {
        let norm = normalize_label(raw);
        self.entries
            .iter()
            .position(|e| e.aliases.iter().any(|a| *a == norm) || e.key.eq_ignore_ascii_case(&norm))
    }

    fn push(&mut self, entry: ReferenceEntry) -> usize {
        let idx = self.entries.len();
        self.index.insert(entry.key.clone(), idx);
        self.entries.push(entry);
        idx
    }

    pub fn get(&self, key: &str) -> Option<&ReferenceEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
