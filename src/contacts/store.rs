//! CSV-backed contact store

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a contact store.
#[derive(Error, Debug)]
pub enum ContactStoreError {
    #[error("Failed to open contact store {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Contact store has no '{column}' column")]
    MissingColumn { column: String },

    #[error("Malformed contact store: {0}")]
    Malformed(#[from] csv::Error),
}

/// Normalize a phone number for lookups.
///
/// Numbers are compared as strings, so only surrounding whitespace is removed;
/// leading zeros, dashes and `+` prefixes stay significant.
pub fn normalize_phone(raw: &str) -> String {
    raw.trim().to_string()
}

/// A single customer row from the contact store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    /// Normalized phone number (lookup key)
    pub phone_number: String,

    /// Every other column, keyed by header
    pub fields: BTreeMap<String, String>,
}

impl ContactRecord {
    /// Value of an additional column, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Contact records in file order
#[derive(Debug, Clone)]
pub struct ContactStore {
    records: Vec<ContactRecord>,
}

impl ContactStore {
    /// Load a store from a CSV file with a header row.
    pub fn load(path: &Path, phone_column: &str) -> Result<Self, ContactStoreError> {
        let file = std::fs::File::open(path).map_err(|source| ContactStoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_reader(file, phone_column)?;
        tracing::debug!(
            "Loaded {} contacts from {}",
            store.records.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parse CSV data from any reader.
    pub fn from_reader<R: Read>(reader: R, phone_column: &str) -> Result<Self, ContactStoreError> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let phone_idx = headers
            .iter()
            .position(|h| h == phone_column.trim())
            .ok_or_else(|| ContactStoreError::MissingColumn {
                column: phone_column.to_string(),
            })?;

        let mut records = Vec::new();
        for row in csv.records() {
            let row = row?;

            let mut phone_number = String::new();
            let mut fields = BTreeMap::new();
            for (idx, (header, value)) in headers.iter().zip(row.iter()).enumerate() {
                if idx == phone_idx {
                    phone_number = normalize_phone(value);
                } else {
                    fields.insert(header.to_string(), value.to_string());
                }
            }

            records.push(ContactRecord {
                phone_number,
                fields,
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records whose normalized phone number equals the normalized input.
    pub fn matches<'a>(&'a self, phone: &str) -> impl Iterator<Item = &'a ContactRecord> + 'a {
        let wanted = normalize_phone(phone);
        self.records
            .iter()
            .filter(move |r| !wanted.is_empty() && r.phone_number == wanted)
    }

    /// First record in file order matching the phone number.
    pub fn find_by_phone(&self, phone: &str) -> Option<&ContactRecord> {
        let mut matches = self.matches(phone);
        let first = matches.next()?;

        let duplicates = matches.count();
        if duplicates > 0 {
            tracing::warn!(
                "{} contacts share phone number {}; using the first one",
                duplicates + 1,
                first.phone_number
            );
        }

        Some(first)
    }
}
