// File: crates/dash-core/src/countries.rs
// Summary: ISO3 code <-> display name resolver loaded from a two-column reference table.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;

/// Read-only after load. Unknown codes resolve to themselves.
#[derive(Clone, Debug, Default)]
pub struct CountryResolver {
    names: HashMap<String, String>,
    codes: HashMap<String, String>,
}

impl CountryResolver {
    pub fn new() -> Self { Self::default() }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resolver = Self::from_reader(std::fs::File::open(path)?)?;
        info!(path = %path.display(), entries = resolver.len(), "loaded country reference table");
        Ok(resolver)
    }

    /// First column is the code, second the display name; the header row is skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut out = Self::new();
        for (n, rec) in rdr.records().enumerate() {
            let rec = rec?;
            match (rec.get(0), rec.get(1)) {
                (Some(code), Some(name)) if !code.is_empty() && !name.is_empty() => out.insert(code, name),
                _ => warn!(row = n + 1, "skipping incomplete reference row"),
            }
        }
        Ok(out)
    }

    pub fn insert(&mut self, code: &str, name: &str) {
        let code = code.to_ascii_uppercase();
        self.codes.insert(name.to_lowercase(), code.clone());
        self.names.insert(code, name.to_string());
    }

    /// Display name for `code`, or the code itself when unknown.
    pub fn name_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.names
            .get(&code.to_ascii_uppercase())
            .map(String::as_str)
            .unwrap_or(code)
    }

    /// Canonical code for a code or display name (both case-insensitive).
    pub fn code_for(&self, input: &str) -> Option<String> {
        let input = input.trim();
        let upper = input.to_ascii_uppercase();
        if self.names.contains_key(&upper) {
            return Some(upper);
        }
        self.codes.get(&input.to_lowercase()).cloned()
    }

    /// `"Name (ISO3)"` for known codes, the bare code otherwise.
    pub fn label(&self, code: &str) -> String {
        match self.names.get(&code.to_ascii_uppercase()) {
            Some(name) => format!("{name} ({code})"),
            None => code.to_string(),
        }
    }

    pub fn len(&self) -> usize { self.names.len() }

    pub fn is_empty(&self) -> bool { self.names.is_empty() }
}
