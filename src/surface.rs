//! Surface point set assembled from the per-atom results.

use crate::sampling::CandidatePoint;
use nalgebra::Point3;

/// A candidate point that survived the burial test.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfacePoint {
    /// Position on the owner's scaled sphere
    pub position: Point3<f64>,
    /// Index of the owning atom in the molecule
    pub atom_index: usize,
}

impl From<CandidatePoint> for SurfacePoint {
    fn from(c: CandidatePoint) -> Self {
        Self {
            position: c.position,
            atom_index: c.atom_index,
        }
    }
}

/// Exposed surface points of a molecule.
///
/// Points are grouped by owning atom in atom order, and each group keeps the
/// order in which its points were sampled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface {
    points: Vec<SurfacePoint>,
}

impl Surface {
    /// All points in output order
    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether every point was buried
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over `(position, atom_index)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Point3<f64>, usize)> {
        self.points.iter().map(|p| (&p.position, p.atom_index))
    }

    /// Points owned by `atom_index`
    pub fn atom_points(&self, atom_index: usize) -> &[SurfacePoint] {
        let start = self.points.partition_point(|p| p.atom_index < atom_index);
        let end = self.points.partition_point(|p| p.atom_index <= atom_index);
        &self.points[start..end]
    }
}

/// Concatenate per-atom point groups into a [`Surface`].
///
/// `groups` must be in atom order; points are neither filtered nor reordered.
pub fn assemble(groups: Vec<Vec<SurfacePoint>>) -> Surface {
    let mut points: Vec<SurfacePoint> = Vec::with_capacity(groups.iter().map(Vec::len).sum());
    for group in groups {
        if let (Some(prev), Some(next)) = (points.last(), group.first()) {
            debug_assert!(
                prev.atom_index < next.atom_index,
                "point groups must be in atom order"
            );
        }
        points.extend(group);
    }
    Surface { points }
}

/// Point counts of a surface run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceStats {
    /// Atoms in the molecule
    pub n_atoms: usize,
    /// Points sampled before the burial test
    pub n_candidates: usize,
    /// Points kept on the surface
    pub n_points: usize,
    /// Points removed as buried
    pub n_buried: usize,
    /// Exposed area estimate in Å²: each atom contributes the kept fraction
    /// of its scaled sphere area
    pub exposed_area: f64,
}

impl SurfaceStats {
    /// Add the counts of one atom with scaled radius `radius`.
    pub fn add_atom(&mut self, radius: f64, n_candidates: usize, n_points: usize) {
        self.n_atoms += 1;
        self.n_candidates += n_candidates;
        self.n_points += n_points;
        self.n_buried += n_candidates - n_points;
        if n_candidates > 0 {
            let area = 4.0 * std::f64::consts::PI * radius * radius;
            self.exposed_area += area * n_points as f64 / n_candidates as f64;
        }
    }
}
