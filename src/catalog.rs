//! Procedure catalog.
//!
//! Static lookup from free-text procedure phrases to canonical procedures.
//! Each entry carries an id, display name, grade, and a set of match keys
//! (canonical phrase, abbreviations, synonyms).
//!
//! # Matching
//!
//! Keys are matched case-insensitively and only on word boundaries, so
//! `"lp"` never fires inside `"help"`. When several keys could match the
//! same text, the longest key wins and consumes its span: `"suture removal"`
//! resolves to suture removal and the shorter `"suture"` key cannot fire
//! inside it. Text that matches nothing yields no procedure.

use crate::models::{Grade, Procedure};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Canonical procedure id.
    pub id: String,
    /// Display name.
    pub name: String,
    pub grade: Grade,
    /// Lowercased match keys.
    pub keys: Vec<String>,
}

impl CatalogEntry {
    /// Creates an entry; the lowercased display name is always a key.
    pub fn new(id: impl Into<String>, name: impl Into<String>, grade: Grade) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            keys: vec![name.to_lowercase()],
            name,
            grade,
        }
    }

    /// Adds abbreviations or synonyms.
    pub fn with_keys<'a>(mut self, keys: impl IntoIterator<Item = &'a str>) -> Self {
        for key in keys {
            let key = key.trim().to_lowercase();
            if !key.is_empty() && !self.keys.contains(&key) {
                self.keys.push(key);
            }
        }
        self
    }

    /// Builds a procedure instance from this entry.
    pub fn procedure(&self) -> Procedure {
        Procedure::new(&self.id, &self.name, self.grade)
    }
}

/// Procedure lookup table with longest-match-first text resolution.
#[derive(Debug, Clone)]
pub struct ProcedureCatalog {
    entries: Vec<CatalogEntry>,
    /// (key, entry index), longest key first.
    index: Vec<(String, usize)>,
}

/// A catalog match inside a text.
#[derive(Debug, Clone, PartialEq)]
struct Match {
    start: usize,
    key_len: usize,
    entry: usize,
}

impl ProcedureCatalog {
    /// Creates a catalog with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: Vec::new(),
        }
    }

    /// The built-in ward procedure catalog.
    pub fn builtin() -> Self {
        Self::empty()
            // Grade 1
            .with_entry(CatalogEntry::new("vitals", "Vital signs", Grade::One).with_keys([
                "vitals",
                "bp monitoring",
            ]))
            .with_entry(
                CatalogEntry::new("venipuncture", "Blood sampling", Grade::One)
                    .with_keys(["venipuncture", "blood sample"]),
            )
            .with_entry(
                CatalogEntry::new("wound_dressing", "Wound dressing", Grade::One)
                    .with_keys(["dressing"]),
            )
            .with_entry(
                CatalogEntry::new("nebulization", "Nebulization", Grade::One)
                    .with_keys(["nebulisation", "neb"]),
            )
            .with_entry(CatalogEntry::new("ecg", "ECG recording", Grade::One).with_keys(["ecg", "ekg"]))
            .with_entry(
                CatalogEntry::new("suture_removal", "Suture removal", Grade::One)
                    .with_keys(["stitch removal"]),
            )
            // Grade 2
            .with_entry(
                CatalogEntry::new("iv_cannulation", "IV cannulation", Grade::Two)
                    .with_keys(["cannulation", "iv line", "venflon"]),
            )
            .with_entry(
                CatalogEntry::new("ng_tube", "Nasogastric tube insertion", Grade::Two).with_keys([
                    "nasogastric tube",
                    "ng tube",
                    "ngt",
                    "ryles tube",
                ]),
            )
            .with_entry(
                CatalogEntry::new("urinary_catheterization", "Urinary catheterization", Grade::Two)
                    .with_keys([
                        "urinary catheterisation",
                        "catheterization",
                        "catheterisation",
                        "foley catheter",
                        "foley",
                        "catheter",
                    ]),
            )
            .with_entry(
                CatalogEntry::new("abg", "Arterial blood gas", Grade::Two).with_keys(["abg"]),
            )
            // Grade 3
            .with_entry(CatalogEntry::new("suturing", "Suturing", Grade::Three).with_keys(["suture"]))
            .with_entry(
                CatalogEntry::new("lumbar_puncture", "Lumbar puncture", Grade::Three)
                    .with_keys(["lp"]),
            )
            .with_entry(
                CatalogEntry::new("central_line", "Central line insertion", Grade::Three)
                    .with_keys(["central line", "central venous catheter", "cvc"]),
            )
            .with_entry(
                CatalogEntry::new("ascitic_tap", "Ascitic tap", Grade::Three)
                    .with_keys(["paracentesis"]),
            )
            .with_entry(
                CatalogEntry::new("pleural_tap", "Pleural tap", Grade::Three)
                    .with_keys(["thoracentesis"]),
            )
    }

    /// Adds an entry and rebuilds the match index.
    pub fn with_entry(mut self, entry: CatalogEntry) -> Self {
        self.entries.push(entry);
        self.rebuild_index();
        self
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .flat_map(|(i, e)| e.keys.iter().map(move |k| (k.clone(), i)))
            .collect();
        // Longest first; ties by key text so the order is reproducible.
        self.index
            .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds an entry by procedure id.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Builds a procedure by id.
    pub fn procedure(&self, id: &str) -> Option<Procedure> {
        self.get(id).map(CatalogEntry::procedure)
    }

    /// Resolves a fragment to the procedure matched by the longest key.
    ///
    /// Returns `None` when nothing in the text matches.
    pub fn resolve(&self, text: &str) -> Option<Procedure> {
        self.find_matches(text)
            .into_iter()
            .max_by(|a, b| a.key_len.cmp(&b.key_len).then_with(|| b.start.cmp(&a.start)))
            .map(|m| self.entries[m.entry].procedure())
    }

    /// Resolves every procedure mentioned in the text, in text order.
    pub fn resolve_all(&self, text: &str) -> Vec<Procedure> {
        self.find_matches(text)
            .into_iter()
            .map(|m| self.entries[m.entry].procedure())
            .collect()
    }

    /// Longest-first scan; each accepted match consumes its span.
    fn find_matches(&self, text: &str) -> Vec<Match> {
        let haystack = text.to_lowercase();
        let mut matches: Vec<Match> = Vec::new();

        for (key, entry) in &self.index {
            let mut from = 0;
            while let Some(pos) = haystack[from..].find(key.as_str()) {
                let start = from + pos;
                let end = start + key.len();
                let overlaps = matches
                    .iter()
                    .any(|m| start < m.start + m.key_len && m.start < end);
                if !overlaps && on_word_boundary(&haystack, start, end) {
                    matches.push(Match {
                        start,
                        key_len: key.len(),
                        entry: *entry,
                    });
                }
                from = end;
            }
        }

        matches.sort_by_key(|m| m.start);
        matches
    }
}

impl Default for ProcedureCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn on_word_boundary(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
