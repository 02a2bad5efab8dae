//! Removal of candidate points buried inside neighbouring atoms.
//!
//! A candidate owned by atom `i` is buried when it lies strictly inside the
//! scaled sphere of some other atom `j`, i.e. `|p - c_j| < scale * r_j - ε`.
//! Only atoms whose scaled spheres intersect the owner's sphere can bury any of
//! its points, so neighbours are pre-selected through an R*-tree on atom centres.

use crate::molecule::Molecule;
use crate::sampling::CandidatePoint;
use crate::settings::SurfaceSettings;
use crate::surface::SurfacePoint;
use nalgebra::Point3;
use rstar::primitives::GeomWithData;
use rstar::RTree;
use tracing::{trace, warn};

/// Centres closer than this (Å) are reported as coincident
const COINCIDENT_DISTANCE: f64 = 1e-4;

type IndexedCenter = GeomWithData<[f64; 3], usize>;

/// Burial test over one molecule.
pub struct OcclusionFilter<'a> {
    molecule: &'a Molecule,
    settings: &'a SurfaceSettings,
    tree: RTree<IndexedCenter>,
    max_scaled_radius: f64,
}

impl<'a> OcclusionFilter<'a> {
    /// Index the atom centres of `molecule`.
    pub fn new(molecule: &'a Molecule, settings: &'a SurfaceSettings) -> Self {
        let centers: Vec<IndexedCenter> = molecule
            .atoms()
            .iter()
            .enumerate()
            .map(|(i, atom)| {
                let p = atom.position();
                IndexedCenter::new([p.x, p.y, p.z], i)
            })
            .collect();
        let tree = RTree::bulk_load(centers);

        for (i, atom) in molecule.atoms().iter().enumerate() {
            let p = atom.position();
            let d2 = COINCIDENT_DISTANCE * COINCIDENT_DISTANCE;
            for other in tree.locate_within_distance([p.x, p.y, p.z], d2) {
                if other.data > i {
                    warn!(
                        "Atoms {} and {} share the same position; they produce overlapping or duplicate surface points",
                        i, other.data
                    );
                }
            }
        }

        Self {
            molecule,
            settings,
            tree,
            max_scaled_radius: settings.scale * molecule.max_radius(),
        }
    }

    /// Atoms other than `atom_index` whose scaled spheres reach the scaled
    /// sphere of `atom_index`, sorted by index.
    pub fn neighbors(&self, atom_index: usize) -> Vec<usize> {
        let atoms = self.molecule.atoms();
        let atom = &atoms[atom_index];
        let center = atom.position();
        let reach = self.settings.scale * atom.radius() + self.max_scaled_radius;

        let mut neighbors: Vec<usize> = self
            .tree
            .locate_within_distance([center.x, center.y, center.z], reach * reach)
            .map(|c| c.data)
            .filter(|&j| {
                if j == atom_index {
                    return false;
                }
                let other = &atoms[j];
                let contact = self.settings.scale * (atom.radius() + other.radius());
                nalgebra::distance(&center, &other.position()) <= contact
            })
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    /// Whether `point` lies strictly inside the scaled sphere of any atom in `neighbors`.
    pub fn is_buried(&self, point: &Point3<f64>, neighbors: &[usize]) -> bool {
        let atoms = self.molecule.atoms();
        neighbors.iter().any(|&j| {
            let limit = self.settings.scale * atoms[j].radius() - self.settings.tolerance;
            limit > 0.0 && nalgebra::distance_squared(point, &atoms[j].position()) < limit * limit
        })
    }

    /// Keep the unburied candidates of a single atom, preserving their order.
    pub fn filter_atom(
        &self,
        atom_index: usize,
        candidates: Vec<CandidatePoint>,
    ) -> Vec<SurfacePoint> {
        let neighbors = self.neighbors(atom_index);
        let n_candidates = candidates.len();
        let kept: Vec<SurfacePoint> = candidates
            .into_iter()
            .filter(|c| !self.is_buried(&c.position, &neighbors))
            .map(SurfacePoint::from)
            .collect();
        trace!(
            "Atom {atom_index}: {} neighbour(s), kept {}/{} points",
            neighbors.len(),
            kept.len(),
            n_candidates
        );
        kept
    }

    /// Keep the unburied points of a mixed candidate list, preserving order.
    ///
    /// Each candidate is tested against the neighbours of its own atom.
    pub fn filter(&self, candidates: Vec<CandidatePoint>) -> Vec<SurfacePoint> {
        let mut owner = None;
        let mut neighbors = Vec::new();
        let mut kept = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if owner != Some(candidate.atom_index) {
                owner = Some(candidate.atom_index);
                neighbors = self.neighbors(candidate.atom_index);
            }
            if !self.is_buried(&candidate.position, &neighbors) {
                kept.push(SurfacePoint::from(candidate));
            }
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::Atom;
    use crate::sampling::sample_atom;

    fn molecule(atoms: &[(f64, f64, f64, f64)]) -> Molecule {
        Molecule::new(
            atoms
                .iter()
                .map(|&(x, y, z, r)| Atom::new("X", Point3::new(x, y, z), r))
                .collect(),
        )
        .unwrap()
    }

    /// Burial test against every other atom without any pruning.
    fn brute_force(molecule: &Molecule, settings: &SurfaceSettings) -> Vec<SurfacePoint> {
        let atoms = molecule.atoms();
        let mut kept = Vec::new();
        for (i, atom) in atoms.iter().enumerate() {
            for c in sample_atom(i, atom, settings) {
                let buried = atoms.iter().enumerate().any(|(j, other)| {
                    j != i
                        && nalgebra::distance(&c.position, &other.position())
                            < settings.scale * other.radius() - settings.tolerance
                });
                if !buried {
                    kept.push(SurfacePoint::from(c));
                }
            }
        }
        kept
    }

    fn filter_all(molecule: &Molecule, settings: &SurfaceSettings) -> Vec<SurfacePoint> {
        let filter = OcclusionFilter::new(molecule, settings);
        let candidates = molecule
            .atoms()
            .iter()
            .enumerate()
            .flat_map(|(i, a)| sample_atom(i, a, settings))
            .collect();
        filter.filter(candidates)
    }

    #[test]
    fn test_single_atom_keeps_everything() {
        let mol = molecule(&[(0.0, 0.0, 0.0, 1.88)]);
        let settings = SurfaceSettings::default();
        let filter = OcclusionFilter::new(&mol, &settings);

        assert!(filter.neighbors(0).is_empty());
        let candidates = sample_atom(0, &mol.atoms()[0], &settings);
        let n = candidates.len();
        assert_eq!(filter.filter_atom(0, candidates).len(), n);
    }

    #[test]
    fn test_overlapping_pair() {
        let mol = molecule(&[(0.0, 0.0, 0.0, 1.0), (1.2, 0.0, 0.0, 1.0)]);
        let settings = SurfaceSettings::default();
        let filter = OcclusionFilter::new(&mol, &settings);

        assert_eq!(filter.neighbors(0), vec![1]);
        assert_eq!(filter.neighbors(1), vec![0]);

        for i in 0..2 {
            let candidates = sample_atom(i, &mol.atoms()[i], &settings);
            let other = mol.atoms()[1 - i].position();
            let expected: Vec<_> = candidates
                .iter()
                .filter(|c| nalgebra::distance(&c.position, &other) >= 1.0 - settings.tolerance)
                .cloned()
                .map(SurfacePoint::from)
                .collect();
            let n_raw = candidates.len();
            let kept = filter.filter_atom(i, candidates);

            assert_eq!(kept, expected);
            assert!(kept.len() < n_raw, "Atom {i} lost no points");
        }
    }

    #[test]
    fn test_distant_pair() {
        let mol = molecule(&[(0.0, 0.0, 0.0, 1.0), (2.5, 0.0, 0.0, 1.0)]);
        let settings = SurfaceSettings::default();
        let filter = OcclusionFilter::new(&mol, &settings);

        assert!(filter.neighbors(0).is_empty());
        assert!(filter.neighbors(1).is_empty());
        let kept = filter_all(&mol, &settings);
        assert_eq!(kept.len(), 2 * crate::sampling::point_count(1.0, &settings));
    }

    #[test]
    fn test_tangent_point_survives() {
        // Spheres touch at (1, 0, 0)
        let mol = molecule(&[(0.0, 0.0, 0.0, 1.0), (2.0, 0.0, 0.0, 1.0)]);
        let settings = SurfaceSettings::default();
        let filter = OcclusionFilter::new(&mol, &settings);

        assert_eq!(filter.neighbors(0), vec![1]);
        assert!(!filter.is_buried(&Point3::new(1.0, 0.0, 0.0), &[1]));
        assert!(filter.is_buried(&Point3::new(1.01, 0.0, 0.0), &[1]));
    }

    #[test]
    fn test_scale_controls_overlap() {
        let mol = molecule(&[(0.0, 0.0, 0.0, 1.0), (3.0, 0.0, 0.0, 1.0)]);

        let settings = SurfaceSettings::new(1.0, 2.0);
        assert!(OcclusionFilter::new(&mol, &settings).neighbors(0).is_empty());

        let settings = SurfaceSettings::new(2.0, 2.0);
        assert_eq!(OcclusionFilter::new(&mol, &settings).neighbors(0), vec![1]);
    }

    #[test]
    fn test_matches_brute_force() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/benzene.xyz");
        let records = crate::xyz::read_xyz_file(&path).unwrap();
        let mol = Molecule::from_records(&records, &crate::radii::RadiusTable::default()).unwrap();

        for (scale, density) in [(1.0, 1.0), (1.2, 3.0), (0.6, 5.0)] {
            let settings = SurfaceSettings::new(scale, density);
            assert_eq!(
                filter_all(&mol, &settings),
                brute_force(&mol, &settings),
                "Mismatch at scale {scale}, density {density}"
            );
        }
    }

    #[test]
    fn test_retained_points_not_inside_other_spheres() {
        let mol = molecule(&[
            (0.0, 0.0, 0.0, 1.7),
            (1.4, 0.0, 0.0, 1.2),
            (0.0, 1.5, 0.3, 1.52),
            (-1.1, -0.9, 0.0, 1.2),
        ]);
        let settings = SurfaceSettings::new(1.0, 4.0);
        for p in filter_all(&mol, &settings) {
            for (j, atom) in mol.atoms().iter().enumerate() {
                let d = nalgebra::distance(&p.position, &atom.position());
                if j == p.atom_index {
                    assert!((d - atom.radius()).abs() < 1e-9);
                } else {
                    assert!(d >= atom.radius() - settings.tolerance);
                }
            }
        }
    }
}
