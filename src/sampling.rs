//! Deterministic sphere sampling on the golden-angle (Fibonacci) spiral.

use crate::error::{Result, SurfaceError};
use crate::molecule::{Atom, Molecule};
use crate::settings::{SurfaceSettings, MAX_POINTS_PER_ATOM};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Candidate surface point before the burial test.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidatePoint {
    /// Position on the owner's scaled sphere
    pub position: Point3<f64>,
    /// Index of the owning atom in the molecule
    pub atom_index: usize,
}

/// Number of points to place on a sphere of unscaled radius `radius`.
///
/// `max(1, round(density * 4π * (scale * radius)²))`
pub fn point_count(radius: f64, settings: &SurfaceSettings) -> usize {
    let scaled = settings.scale * radius;
    let area = 4.0 * PI * scaled * scaled;
    ((settings.density * area).round() as usize).max(1)
}

/// Reject settings that would sample more than [`MAX_POINTS_PER_ATOM`] points
/// on the largest atom of `molecule`.
pub fn check_point_budget(molecule: &Molecule, settings: &SurfaceSettings) -> Result<()> {
    let largest = point_count(molecule.max_radius(), settings);
    if largest > MAX_POINTS_PER_ATOM {
        return Err(SurfaceError::InvalidParameter {
            name: "density",
            value: settings.density,
        });
    }
    Ok(())
}

/// `n` unit vectors spread over the sphere.
///
/// Point `i` sits at inclination `acos(1 - 2(i + 0.5)/n)` and azimuth
/// `i * π(3 - √5)`, so consecutive points advance by the golden angle.
pub fn fibonacci_sphere(n: usize) -> Vec<Vector3<f64>> {
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    (0..n)
        .map(|i| {
            let theta = (1.0 - 2.0 * (i as f64 + 0.5) / n as f64).acos();
            let phi = i as f64 * golden_angle;
            Vector3::new(
                phi.cos() * theta.sin(),
                phi.sin() * theta.sin(),
                theta.cos(),
            )
        })
        .collect()
}

/// Candidate points on the scaled sphere of `atom`, in spiral order.
pub fn sample_atom(
    atom_index: usize,
    atom: &Atom,
    settings: &SurfaceSettings,
) -> Vec<CandidatePoint> {
    let radius = settings.scale * atom.radius();
    let center = atom.position();
    fibonacci_sphere(point_count(atom.radius(), settings))
        .into_iter()
        .map(|dir| CandidatePoint {
            position: center + dir * radius,
            atom_index,
        })
        .collect()
}
