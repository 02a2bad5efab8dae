use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, trace};
use vdw_surfgen::io::{output_file, plot_surface, write_table, write_txt, write_xyz};
use vdw_surfgen::settings::{DEFAULT_DENSITY, DEFAULT_SCALE, DEFAULT_TOLERANCE};
use vdw_surfgen::{
    get_vdw_surface, run_with_threads, DataFrameFileType, RadiusTable, Result, SurfaceSettings,
};

/// Generate VDW surface points from an XYZ file.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to input XYZ file
    xyz_file: PathBuf,

    /// Scale factor for VDW radii
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: f64,

    /// Point density per Å²
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    density: f64,

    /// Tolerance (Å) below which a point counts as inside a neighbouring sphere
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Save surface points as TXT file
    #[arg(long, alias = "save_txt")]
    save_txt: bool,

    /// Save surface points as XYZ file (always written; kept for compatibility)
    #[arg(long, alias = "save_xyz")]
    save_xyz: bool,

    /// Save 3D surface plot image (SVG)
    #[arg(long, alias = "save_img")]
    save_img: bool,

    /// Also save the surface as a table with the owning atom of each point
    #[arg(short = 't', long = "table")]
    table: Option<DataFrameFileType>,

    /// Directory for the output files
    #[arg(short, long = "output-dir", default_value = ".")]
    output_dir: PathBuf,

    /// Number of threads to use for parallel processing (0 for all cores)
    #[arg(short = 'j', long = "num-threads", default_value_t = 0)]
    num_threads: usize,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,

    /// Silence all log output
    #[arg(short, long)]
    pub(crate) quiet: bool,
}

pub(crate) fn run(args: &Args) -> Result<Vec<PathBuf>> {
    trace!("{args:?}");

    let settings = SurfaceSettings {
        scale: args.scale,
        density: args.density,
        tolerance: args.tolerance,
    };
    settings.validate()?;

    // Make sure `input` exists
    let input_path = args.xyz_file.canonicalize()?;
    let name = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("molecule"));

    let table = RadiusTable::default();
    let (molecule, result) = run_with_threads(args.num_threads, || {
        debug!("Using {} thread(s)", rayon::current_num_threads());
        get_vdw_surface(&input_path, &table, &settings)
    })?;
    let surface = &result.surface;
    let stats = &result.stats;
    info!(
        "{} atoms: {} candidate points, {} buried, exposed area {:.2} Å²",
        stats.n_atoms, stats.n_candidates, stats.n_buried, stats.exposed_area
    );

    // Prepare output directory
    std::fs::create_dir_all(&args.output_dir)?;
    let out = |extension: &str| output_file(&args.output_dir, &name, extension);

    if !args.save_xyz {
        trace!("XYZ output is always written");
    }
    let mut saved = Vec::new();
    let xyz_path = out("xyz");
    write_xyz(&xyz_path, surface)?;
    saved.push(xyz_path);

    if args.save_txt {
        let txt_path = out("txt");
        write_txt(&txt_path, surface)?;
        saved.push(txt_path);
    }
    if let Some(file_type) = args.table {
        let table_path = out(&file_type.to_string());
        write_table(&table_path, surface, &molecule, file_type)?;
        saved.push(table_path);
    }
    if args.save_img {
        let img_path = out("svg");
        plot_surface(&img_path, surface, &molecule)?;
        saved.push(img_path);
    }

    println!("Generated {} surface points.", surface.len());
    println!("Saved outputs:");
    for path in &saved {
        println!(" - {}", path.display());
    }
    Ok(saved)
}
