//! Atoms with resolved radii and the molecule they form.

use crate::error::{Result, SurfaceError};
use crate::radii::RadiusTable;
use crate::xyz::XyzRecord;
use nalgebra::Point3;
use tracing::debug;

/// An atom with its van der Waals radius already resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    symbol: String,
    position: Point3<f64>,
    radius: f64,
}

impl Atom {
    /// Create an atom from an explicit radius (Å).
    pub fn new(symbol: impl Into<String>, position: Point3<f64>, radius: f64) -> Self {
        Self {
            symbol: symbol.into(),
            position,
            radius,
        }
    }

    /// Element symbol as given in the input
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Centre of the atom in Å
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Unscaled van der Waals radius in Å
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Ordered, non-empty list of atoms.
///
/// Atom order is the input order and determines the order of the generated
/// surface points.
#[derive(Clone, Debug, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
}

impl Molecule {
    /// Wrap a list of atoms, checking that it is non-empty, every position is
    /// finite and every radius is positive.
    pub fn new(atoms: Vec<Atom>) -> Result<Self> {
        if atoms.is_empty() {
            return Err(SurfaceError::EmptyMolecule);
        }
        for atom in &atoms {
            if let Some(&value) = atom.position.coords.iter().find(|c| !c.is_finite()) {
                return Err(SurfaceError::InvalidParameter {
                    name: "position",
                    value,
                });
            }
        }
        if let Some(atom) = atoms
            .iter()
            .find(|a| !(a.radius.is_finite() && a.radius > 0.0))
        {
            return Err(SurfaceError::InvalidParameter {
                name: "radius",
                value: atom.radius,
            });
        }
        Ok(Self { atoms })
    }

    /// Resolve the radius of every record against `table`.
    ///
    /// The first unknown symbol aborts the whole conversion.
    pub fn from_records(records: &[XyzRecord], table: &RadiusTable) -> Result<Self> {
        let atoms = records
            .iter()
            .map(|r| {
                table
                    .resolve(&r.symbol)
                    .map(|radius| Atom::new(r.symbol.clone(), r.position, radius))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("Resolved radii for {} atoms", atoms.len());
        Self::new(atoms)
    }

    /// Atoms in input order
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Number of atoms
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Always false for a constructed molecule
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Largest unscaled radius in the molecule
    pub fn max_radius(&self) -> f64 {
        self.atoms.iter().map(Atom::radius).fold(0.0, f64::max)
    }
}
