#![warn(missing_docs)]

//! # vdw-surfgen
//!
//! Point clouds approximating the van der Waals surface of a molecule.
//!
//! Every atom of an XYZ geometry is replaced by a sphere of radius
//! `scale × r_vdw`, each sphere is sampled on a golden-angle spiral with a
//! fixed number of points per Å², and points lying inside any other atom's
//! sphere are dropped. The remaining points are the exposed surface, grouped by
//! atom in input order.
//!
//! Sampling and burial tests run per atom on a rayon pool; the result does not
//! depend on the number of threads.

pub mod error;
pub mod io;
pub mod molecule;
pub mod occlusion;
pub mod radii;
pub mod sampling;
pub mod settings;
pub mod surface;
pub mod utils;
pub mod xyz;

// Re-export key public types
pub use error::{Result, SurfaceError};
pub use molecule::{Atom, Molecule};
pub use occlusion::OcclusionFilter;
pub use radii::RadiusTable;
pub use sampling::CandidatePoint;
pub use settings::SurfaceSettings;
pub use surface::{Surface, SurfacePoint, SurfaceStats};
pub use utils::{run_with_threads, write_df_to_file, DataFrameFileType};
pub use xyz::{parse_xyz, read_xyz_file, XyzRecord};

use rayon::prelude::*;
use std::path::Path;
use tracing::debug;

/// Surface points of a molecule together with the run's counts.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceResult {
    /// Exposed points in atom-major, sampling order
    pub surface: Surface,
    /// Candidate, kept and buried counts
    pub stats: SurfaceStats,
}

/// Generate the van der Waals surface of `molecule`.
///
/// # Arguments
///
/// * `molecule` - Atoms with resolved radii
/// * `settings` - Radius scale, point density and burial tolerance
///
/// # Returns
///
/// The exposed surface points and their counts, or
/// [`SurfaceError::InvalidParameter`] if `settings` are out of range.
///
/// # Example
///
/// ```no_run
/// use vdw_surfgen::{read_xyz_file, generate_surface, Molecule, RadiusTable, SurfaceSettings};
///
/// let records = read_xyz_file("path/to/molecule.xyz").unwrap();
/// let molecule = Molecule::from_records(&records, &RadiusTable::default()).unwrap();
/// let result = generate_surface(&molecule, &SurfaceSettings::default()).unwrap();
/// println!("Generated {} surface points", result.surface.len());
/// ```
pub fn generate_surface(molecule: &Molecule, settings: &SurfaceSettings) -> Result<SurfaceResult> {
    settings.validate()?;
    sampling::check_point_budget(molecule, settings)?;

    let filter = OcclusionFilter::new(molecule, settings);
    let per_atom: Vec<(usize, Vec<SurfacePoint>)> = molecule
        .atoms()
        .par_iter()
        .enumerate()
        .map(|(i, atom)| {
            let candidates = sampling::sample_atom(i, atom, settings);
            let n_candidates = candidates.len();
            (n_candidates, filter.filter_atom(i, candidates))
        })
        .collect();

    let mut stats = SurfaceStats::default();
    for (atom, (n_candidates, points)) in molecule.atoms().iter().zip(&per_atom) {
        stats.add_atom(settings.scale * atom.radius(), *n_candidates, points.len());
    }
    debug!(
        "Sampled {} candidate points on {} atoms, {} buried",
        stats.n_candidates, stats.n_atoms, stats.n_buried
    );

    let surface = surface::assemble(per_atom.into_iter().map(|(_, points)| points).collect());
    Ok(SurfaceResult { surface, stats })
}

/// Read an XYZ file, resolve radii against `table` and generate its surface.
///
/// Failures surface in pipeline order: parsing, then radius lookup, then
/// parameter validation. No sampling happens if any of them fails.
pub fn get_vdw_surface(
    input_file: impl AsRef<Path>,
    table: &RadiusTable,
    settings: &SurfaceSettings,
) -> Result<(Molecule, SurfaceResult)> {
    let records = read_xyz_file(input_file)?;
    let molecule = Molecule::from_records(&records, table)?;
    let result = generate_surface(&molecule, settings)?;
    Ok((molecule, result))
}
