//! Van der Waals radius lookup.
//!
//! Radii follow Bondi (1964) where available and Alvarez/Mantina-style values
//! for the remaining elements. All values are in Ångströms.

use crate::error::{Result, SurfaceError};
use std::collections::HashMap;

/// Embedded element radii (Å).
const EMBEDDED_VDW_RADII: &[(&str, f64)] = &[
    // Main group
    ("H", 1.20),
    ("He", 1.40),
    ("Li", 1.82),
    ("Be", 2.00),
    ("B", 1.92),
    ("C", 1.70),
    ("N", 1.55),
    ("O", 1.52),
    ("F", 1.47),
    ("Ne", 1.54),
    ("Na", 2.27),
    ("Mg", 1.73),
    ("Al", 1.84),
    ("Si", 2.10),
    ("P", 1.80),
    ("S", 1.80),
    ("Cl", 1.75),
    ("Ar", 1.88),
    ("K", 2.75),
    ("Ca", 2.31),
    ("Ga", 1.87),
    ("Ge", 2.11),
    ("As", 1.85),
    ("Se", 1.90),
    ("Br", 1.85),
    ("Kr", 2.02),
    ("Rb", 3.03),
    ("Sr", 2.49),
    ("In", 1.93),
    ("Sn", 2.17),
    ("Sb", 2.06),
    ("Te", 2.06),
    ("I", 1.98),
    ("Xe", 2.16),
    ("Cs", 3.43),
    ("Ba", 2.68),
    ("Tl", 1.96),
    ("Pb", 2.02),
    ("Bi", 2.07),
    ("Fr", 3.48),
    ("Ra", 2.83),
    // Transition metals
    ("Ti", 2.15),
    ("Mn", 2.05),
    ("Fe", 2.00),
    ("Ni", 1.63),
    ("Cu", 1.95),
    ("Zn", 2.10),
    ("Pd", 1.63),
    ("Ag", 1.72),
    ("Cd", 1.58),
    ("Pt", 1.75),
    ("Au", 1.66),
    ("Hg", 2.05),
    // Actinides
    ("U", 1.86),
];

/// Immutable element → radius table.
///
/// Built once and shared by reference; lookups never mutate it, so one table
/// can serve every worker thread.
#[derive(Clone, Debug)]
pub struct RadiusTable {
    radii: HashMap<String, f64>,
}

impl Default for RadiusTable {
    fn default() -> Self {
        Self::embedded()
    }
}

impl RadiusTable {
    /// Table holding the embedded reference radii.
    pub fn embedded() -> Self {
        Self::from_entries(
            EMBEDDED_VDW_RADII
                .iter()
                .map(|&(symbol, radius)| (symbol.to_string(), radius)),
        )
    }

    /// Build a table from `(symbol, radius)` pairs.
    /// Later entries win when a symbol appears twice.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            radii: entries
                .into_iter()
                .map(|(symbol, radius)| (normalize_symbol(&symbol), radius))
                .collect(),
        }
    }

    /// Look up the radius of `symbol`.
    ///
    /// Matching is case-insensitive (`CL`, `cl` and `Cl` are the same element).
    /// Unknown symbols are an error rather than falling back to a default radius.
    pub fn resolve(&self, symbol: &str) -> Result<f64> {
        self.radii
            .get(&normalize_symbol(symbol))
            .copied()
            .ok_or_else(|| SurfaceError::UnknownElement(symbol.to_string()))
    }

    /// Number of elements in the table.
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}

/// Canonical element capitalisation: first letter upper case, rest lower case.
pub fn normalize_symbol(symbol: &str) -> String {
    let symbol = symbol.trim();
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
