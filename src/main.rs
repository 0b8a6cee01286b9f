//! planetsculpt CLI - sculpt a planet mesh and scatter vegetation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};

use planetsculpt::export::{
    export_instances_raw, export_mesh_obj, export_ramp_png, expected_file_size, RampOptions,
};
use planetsculpt::mesh::{cube_sphere, icosphere, IndexedMesh};
use planetsculpt::random::{time_seed, ChaChaRandom};
use planetsculpt::{PlanetConfig, PlanetSculptor, Progress, StageId};

/// Procedural planet sculptor.
#[derive(Parser)]
#[command(name = "planetsculpt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sculpt a planet and export mesh, instances and elevation ramp.
    Generate(GenerateArgs),

    /// Display vertex and face counts for a source mesh.
    Info {
        /// Source sphere mesh.
        #[arg(short, long, default_value = "icosphere")]
        mesh: SourceMesh,

        /// Icosphere subdivision level.
        #[arg(long, default_value = "5")]
        subdivisions: u32,

        /// Cube-sphere quads per face edge.
        #[arg(long, default_value = "64")]
        resolution: u32,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Source sphere mesh.
    #[arg(short, long, default_value = "icosphere")]
    mesh: SourceMesh,

    /// Icosphere subdivision level (0-7).
    #[arg(long, default_value = "5")]
    subdivisions: u32,

    /// Cube-sphere quads per face edge (1-512).
    #[arg(long, default_value = "64")]
    resolution: u32,

    /// Random seed for reproducible generation (defaults to wall-clock time).
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output directory for generated files.
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Base name for output files.
    #[arg(short, long, default_value = "planet")]
    name: String,

    /// JSON file with sculpting parameters; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from the fast preview preset instead of the defaults.
    #[arg(long)]
    preview: bool,

    /// Number of erosion iterations.
    #[arg(long)]
    iterations: Option<u32>,

    /// Logistic sharpness of the push/pull decision.
    #[arg(long)]
    sharpness: Option<f32>,

    /// Maximum displacement per erosion iteration.
    #[arg(long)]
    step: Option<f32>,

    /// Radius mapped to elevation UV 0.
    #[arg(long)]
    sea_level: Option<f32>,

    /// Radius at or below which no vegetation grows.
    #[arg(long)]
    beach_level: Option<f32>,

    /// Radius where vegetation is densest.
    #[arg(long)]
    vegetation_level: Option<f32>,

    /// Radius mapped to elevation UV 1.
    #[arg(long)]
    mountain_level: Option<f32>,

    /// Skip writing the elevation ramp PNG.
    #[arg(long)]
    skip_ramp: bool,

    /// Skip writing the instance transform RAW file.
    #[arg(long)]
    skip_instances: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceMesh {
    /// Subdivided icosahedron.
    Icosphere,
    /// Spherified cube.
    CubeSphere,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Info {
            mesh,
            subdivisions,
            resolution,
        } => run_info(mesh, subdivisions, resolution),
    }
}

const MAX_SUBDIVISIONS: u32 = 7;
const MAX_RESOLUTION: u32 = 512;

fn check_source_args(subdivisions: u32, resolution: u32) -> Result<(), String> {
    if subdivisions > MAX_SUBDIVISIONS {
        return Err(format!("Subdivisions must be between 0 and {}", MAX_SUBDIVISIONS));
    }
    if !(1..=MAX_RESOLUTION).contains(&resolution) {
        return Err(format!("Resolution must be between 1 and {}", MAX_RESOLUTION));
    }
    Ok(())
}

/// Vertex and face counts of a source mesh, or `None` on overflow.
fn source_counts(kind: SourceMesh, subdivisions: u32, resolution: u32) -> Option<(u64, u64)> {
    match kind {
        SourceMesh::Icosphere => {
            let k = 4u64.checked_pow(subdivisions)?;
            Some((k.checked_mul(10)?.checked_add(2)?, k.checked_mul(20)?))
        }
        SourceMesh::CubeSphere => {
            let quads = resolution.max(1) as u64;
            let side = quads + 1;
            Some((
                side.checked_mul(side)?.checked_mul(6)?,
                quads.checked_mul(quads)?.checked_mul(2 * 6)?,
            ))
        }
    }
}

/// In-memory bytes for vertex data, face data and their total.
fn mesh_bytes(vertices: u64, faces: u64) -> Option<(u64, u64, u64)> {
    // position + normal (3 x f32 each) + uv (2 x f32)
    let bytes_vertices = vertices.checked_mul((3 + 3 + 2) * 4)?;
    let bytes_faces = faces.checked_mul(3 * 4)?;
    Some((bytes_vertices, bytes_faces, bytes_vertices.checked_add(bytes_faces)?))
}

fn build_source(kind: SourceMesh, subdivisions: u32, resolution: u32) -> IndexedMesh {
    match kind {
        SourceMesh::Icosphere => icosphere(subdivisions),
        SourceMesh::CubeSphere => cube_sphere(resolution),
    }
}

fn load_config(args: &GenerateArgs) -> PlanetConfig {
    let mut config = match &args.config {
        Some(path) => read_config_file(path),
        None if args.preview => PlanetConfig::preview(),
        None => PlanetConfig::earth_like(),
    };

    if let Some(v) = args.iterations {
        config.iterations = v;
    }
    if let Some(v) = args.sharpness {
        config.sharpness = v;
    }
    if let Some(v) = args.step {
        config.displacement_step = v;
    }
    if let Some(v) = args.sea_level {
        config.sea_level = v;
    }
    if let Some(v) = args.beach_level {
        config.beach_level = v;
    }
    if let Some(v) = args.vegetation_level {
        config.vegetation_level = v;
    }
    if let Some(v) = args.mountain_level {
        config.mountain_level = v;
    }

    config
}

fn read_config_file(path: &Path) -> PlanetConfig {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {}", path.display(), e);
        std::process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing config {}: {}", path.display(), e);
        std::process::exit(1);
    })
}

fn run_generate(args: GenerateArgs) {
    if let Err(e) = check_source_args(args.subdivisions, args.resolution) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let config = load_config(&args);
    let seed = args.seed.unwrap_or_else(time_seed);

    println!("planetsculpt - Procedural Planet Sculptor");
    println!("=========================================");
    println!("Seed: {}", seed);
    println!("Iterations: {}", config.iterations);
    println!("Output: {}", args.output.display());

    let start = Instant::now();

    println!("\nBuilding source mesh...");
    let source = build_source(args.mesh, args.subdivisions, args.resolution);
    println!(
        "  {} vertices, {} faces",
        source.positions().len(),
        source.faces().len()
    );

    let sculptor = PlanetSculptor::new(source, config.clone()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("Sculpting...");
    let mut rng = ChaChaRandom::from_seed(seed);
    let total_stages = StageId::ORDER.len();
    let planet = sculptor.make_planet_with_progress(&mut rng, |event| match event {
        Progress::StageStarted(stage) => {
            println!("  [{}/{}] Starting: {}", stage.index() + 1, total_stages, stage.name());
        }
        Progress::ErosionIteration { iteration, total } => {
            let tenth = (total / 10).max(1);
            if iteration % tenth == 0 || iteration == total {
                println!("        erosion {}/{}", iteration, total);
            }
        }
        Progress::StageCompleted(stage) => {
            println!("  [{}/{}] Completed: {}", stage.index() + 1, total_stages, stage.name());
        }
    });

    let gen_time = start.elapsed();
    println!("Sculpting completed in {:.2?}", gen_time);

    let (min_r, max_r) = planet.stats.radius_range;
    println!("Radius range: [{:.4}, {:.4}]", min_r, max_r);
    println!("Vegetation instances: {}", planet.stats.instance_count);
    if planet.stats.degenerate_faces > 0 {
        println!("Degenerate faces skipped: {}", planet.stats.degenerate_faces);
    }

    println!("\nExporting...");
    let export_start = Instant::now();

    std::fs::create_dir_all(&args.output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    let mesh_path = args.output.join(format!("{}.obj", args.name));
    export_mesh_obj(&planet.mesh, &mesh_path).unwrap_or_else(|e| {
        eprintln!("Error exporting mesh: {}", e);
        std::process::exit(1);
    });
    println!("  Exported mesh: {}", mesh_path.display());

    if !args.skip_instances {
        let batch = planet.instance_batch(());
        let path = args.output.join(format!("{}_instances.raw", args.name));
        export_instances_raw(&batch, &path).unwrap_or_else(|e| {
            eprintln!("Error exporting instances: {}", e);
            std::process::exit(1);
        });
        println!(
            "  Exported {} instances ({} bytes): {}",
            batch.instance_count(),
            expected_file_size(batch.instance_count()),
            path.display()
        );
    }

    if !args.skip_ramp {
        let path = args.output.join(format!("{}_ramp.png", args.name));
        export_ramp_png(&path, &config, &RampOptions::default()).unwrap_or_else(|e| {
            eprintln!("Error exporting ramp: {}", e);
            std::process::exit(1);
        });
        println!("  Exported elevation ramp: {}", path.display());
    }

    let config_path = args.output.join(format!("{}_config.json", args.name));
    let json = serde_json::to_string_pretty(&config).unwrap_or_else(|e| {
        eprintln!("Error serializing config: {}", e);
        std::process::exit(1);
    });
    std::fs::write(&config_path, json).unwrap_or_else(|e| {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    });
    println!("  Exported config: {}", config_path.display());

    let export_time = export_start.elapsed();
    let total_time = start.elapsed();

    println!("Export completed in {:.2?}", export_time);
    println!("\nTotal time: {:.2?}", total_time);
    println!("Done!");
}

fn run_info(kind: SourceMesh, subdivisions: u32, resolution: u32) {
    if let Err(e) = check_source_args(subdivisions, resolution) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let sizes = source_counts(kind, subdivisions, resolution)
        .and_then(|(v, f)| mesh_bytes(v, f).map(|bytes| (v, f, bytes)));
    let Some((vertices, faces, (bytes_vertices, bytes_faces, total))) = sizes else {
        eprintln!("Error: Mesh size overflows");
        std::process::exit(1);
    };

    println!("planetsculpt - Source Mesh Info");
    println!("===============================");
    println!();
    match kind {
        SourceMesh::Icosphere => println!("Mesh: icosphere, {} subdivisions", subdivisions),
        SourceMesh::CubeSphere => println!("Mesh: cube-sphere, {}x{} per face", resolution, resolution),
    }
    println!();
    println!("Counts:");
    println!("  Vertices: {:>12}", vertices);
    println!("  Faces:    {:>12}", faces);
    println!();
    println!("Memory usage (in-memory):");
    println!("  Vertex data: {:>12} bytes ({:.2} MB)", bytes_vertices, bytes_vertices as f64 / 1024.0 / 1024.0);
    println!("  Face data:   {:>12} bytes ({:.2} MB)", bytes_faces, bytes_faces as f64 / 1024.0 / 1024.0);
    println!("  Total:       {:>12} bytes ({:.2} MB)", total, total as f64 / 1024.0 / 1024.0);
}
