//! Note table — symbolic note names mapped to fundamental frequencies.

use std::collections::BTreeMap;

/// Names that denote a rest (0 Hz).
pub const REST_NAMES: [&str; 3] = ["rest", "R", "-"];

/// One octave of the C major scale, C4 to C5.
const MAJOR_SCALE: [(&str, f64); 8] = [
    ("C4", 261.63),
    ("D4", 293.66),
    ("E4", 329.63),
    ("F4", 349.23),
    ("G4", 392.00),
    ("A4", 440.00),
    ("B4", 493.88),
    ("C5", 523.25),
];

/// Immutable-by-convention mapping from note name to frequency in Hz.
///
/// Built once at startup; lookups are case-sensitive ("C4", not "c4").
#[derive(Debug, Clone, PartialEq)]
pub struct NoteTable {
    notes: BTreeMap<String, f64>,
}

impl NoteTable {
    /// An empty table. Only rest names resolve.
    pub fn empty() -> Self {
        Self {
            notes: BTreeMap::new(),
        }
    }

    /// The built-in table: C4, D4, E4, F4, G4, A4, B4, C5.
    pub fn major_scale() -> Self {
        let mut table = Self::empty();
        for (name, hz) in MAJOR_SCALE {
            table.insert(name, hz);
        }
        table
    }

    /// Add or replace a note.
    pub fn insert(&mut self, name: impl Into<String>, frequency_hz: f64) {
        self.notes.insert(name.into(), frequency_hz);
    }

    /// Resolve a note name to its frequency. Rest names resolve to `0.0`.
    pub fn lookup(&self, name: &str) -> Option<f64> {
        if REST_NAMES.contains(&name) {
            return Some(0.0);
        }
        self.notes.get(name).copied()
    }

    /// Iterate over `(name, frequency)` pairs in ascending frequency order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        let mut entries: Vec<(&str, f64)> =
            self.notes.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.1.total_cmp(&b.1));
        entries.into_iter()
    }

    /// Number of pitched notes in the table.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the table has no pitched notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        Self::major_scale()
    }
}
