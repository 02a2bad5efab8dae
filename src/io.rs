//! Writers for generated surfaces.
//!
//! * `.xyz`: every surface point as a dummy atom, readable by any molecule viewer
//! * `.txt`: bare `x y z` coordinates
//! * tables (CSV, Parquet, JSON) with the owning atom of each point
//! * `.svg`: 3-D scatter plot of the points and atom centres

use crate::error::{Result, SurfaceError};
use crate::molecule::Molecule;
use crate::surface::Surface;
use crate::utils::{write_df_to_file, DataFrameFileType};
use plotters::prelude::{
    ChartBuilder, Circle, Color, DrawingAreaErrorKind, IntoDrawingArea, SVGBackend, BLUE, RED, WHITE,
};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Symbol used for surface points in XYZ output
pub const DUMMY_SYMBOL: &str = "X";
/// Comment line of XYZ output
pub const XYZ_COMMENT: &str = "VDW surface points";

/// Output path `<dir>/<stem>_vdw_surface.<extension>`.
pub fn output_file(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    dir.join(format!("{stem}_vdw_surface.{extension}"))
}

/// Write the surface as a pseudo-atom XYZ file.
pub fn write_xyz(path: &Path, surface: &Surface) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", surface.len())?;
    writeln!(writer, "{XYZ_COMMENT}")?;
    for (p, _) in surface.iter() {
        writeln!(writer, "{DUMMY_SYMBOL} {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
    }
    writer.flush()?;
    debug!("Wrote {} points to {}", surface.len(), path.display());
    Ok(())
}

/// Write one `x y z` line per surface point.
pub fn write_txt(path: &Path, surface: &Surface) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (p, _) in surface.iter() {
        writeln!(writer, "{:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
    }
    writer.flush()?;
    debug!("Wrote {} points to {}", surface.len(), path.display());
    Ok(())
}

/// Tabulate the surface with columns `x, y, z, atom_index, element`.
pub fn surface_to_df(surface: &Surface, molecule: &Molecule) -> Result<DataFrame> {
    let points = surface.points();
    df!(
        "x" => points.iter().map(|p| p.position.x).collect::<Vec<f64>>(),
        "y" => points.iter().map(|p| p.position.y).collect::<Vec<f64>>(),
        "z" => points.iter().map(|p| p.position.z).collect::<Vec<f64>>(),
        "atom_index" => points.iter().map(|p| p.atom_index as u32).collect::<Vec<u32>>(),
        "element" => points
            .iter()
            .map(|p| molecule.atoms()[p.atom_index].symbol().to_string())
            .collect::<Vec<String>>(),
    )
    .map_err(|e| SurfaceError::Export(e.to_string()))
}

/// Write the surface table in `file_type` format.
pub fn write_table(
    path: &Path,
    surface: &Surface,
    molecule: &Molecule,
    file_type: DataFrameFileType,
) -> Result<()> {
    let mut df = surface_to_df(surface, molecule)?;
    write_df_to_file(&mut df, path, file_type)
}

/// Render surface points (blue) and atom centres (red) as a 3-D scatter plot.
///
/// Only shapes are drawn, so no font backend is required.
pub fn plot_surface(path: &Path, surface: &Surface, molecule: &Molecule) -> Result<()> {
    draw_scatter(path, surface, molecule).map_err(|e| SurfaceError::Plot(e.to_string()))
}

fn draw_scatter(
    path: &Path,
    surface: &Surface,
    molecule: &Molecule,
) -> std::result::Result<(), DrawingAreaErrorKind<std::io::Error>> {
    let centers: Vec<(f64, f64, f64)> = molecule
        .atoms()
        .iter()
        .map(|a| (a.position().x, a.position().y, a.position().z))
        .collect();
    let points: Vec<(f64, f64, f64)> = surface.iter().map(|(p, _)| (p.x, p.y, p.z)).collect();

    // Cubic box around everything so the molecule is not distorted
    let (lo, hi) = points
        .iter()
        .chain(&centers)
        .flat_map(|&(x, y, z)| [x, y, z])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let pad = ((hi - lo) * 0.05).max(0.5);
    let range = (lo - pad)..(hi + pad);

    let root = SVGBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_3d(range.clone(), range.clone(), range)?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.5;
        pb.pitch = 0.3;
        pb.scale = 0.9;
        pb.into_matrix()
    });

    chart.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, 1, BLUE.mix(0.5).filled())),
    )?;
    chart.draw_series(centers.iter().map(|&c| Circle::new(c, 4, RED.filled())))?;

    root.present()?;
    Ok(())
}
