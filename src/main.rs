use std::path::PathBuf;

use clap::Parser;

use crossroad_finder::config::{ConfigError, SearchConfig};
use crossroad_finder::generator::{LatticeGenerator, StructureGenerator};
use crossroad_finder::search::{
    region_bounds, run_search, write_results, ConsoleReporter, SearchError,
};
use crossroad_finder::shapes::ShapeCategory;
use crossroad_finder::version::Version;

#[derive(Parser, Debug)]
#[command(name = "crossroad_finder")]
#[command(about = "Search nether fortresses for clusters of bridge crossroads")]
struct Args {
    /// Closest lower game version (default: 1.16.1)
    #[arg(short = 'v', long = "mc-version", value_enum)]
    version: Option<Version>,

    /// Numeric world seed (required unless --config is given)
    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Fortress salt, 1.16.1 and later only (default: 30084232)
    #[arg(long, allow_negative_numbers = true)]
    salt: Option<i32>,

    /// Crossroad shape to search for (default: QUAD_SQUARE)
    #[arg(long, value_enum, ignore_case = true)]
    shape: Option<ShapeCategory>,

    /// Highest crossroad floor to accept, at least 48 (default: 255)
    #[arg(long)]
    max_y: Option<i32>,

    /// Search radius in blocks, 0 to 30000000 (required unless --config is given)
    #[arg(short = 'r', long)]
    radius: Option<i32>,

    /// Search center X in blocks (default: 0)
    #[arg(long, allow_negative_numbers = true)]
    center_x: Option<i32>,

    /// Search center Z in blocks (default: 0)
    #[arg(long, allow_negative_numbers = true)]
    center_z: Option<i32>,

    /// Number of worker threads, 1 to 10000 (default: 1)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Load search parameters from a JSON file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the final search parameters to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Write the matches of the run to a JSON file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Stop all workers once any match is found
    #[arg(long)]
    stop_on_first: bool,

    /// List the crossroad shapes and exit
    #[arg(long)]
    list_shapes: bool,
}

fn build_config(args: &Args) -> Result<SearchConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig {
            seed: args.seed.ok_or(ConfigError::MissingField("seed"))?,
            search_radius: args.radius.ok_or(ConfigError::MissingField("radius"))?,
            ..SearchConfig::default()
        },
    };

    if let Some(version) = args.version {
        config.version = version;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(salt) = args.salt {
        config.salt = Some(salt);
    }
    if let Some(shape) = args.shape {
        config.shape = shape;
    }
    if let Some(max_y) = args.max_y {
        config.max_y = max_y;
    }
    if let Some(radius) = args.radius {
        config.search_radius = radius;
    }
    if let Some(center_x) = args.center_x {
        config.center_x = center_x;
    }
    if let Some(center_z) = args.center_z {
        config.center_z = center_z;
    }
    if let Some(threads) = args.threads {
        config.thread_count = threads;
    }
    config.stop_on_first |= args.stop_on_first;

    if config.salt.is_some() && !config.version.uses_salt() {
        eprintln!(
            "Warning: salt is ignored before {}",
            Version::SALT_THRESHOLD
        );
    }

    config.validate()?;
    Ok(config)
}

fn print_shapes() {
    println!("Crossroad shapes:");
    for shape in ShapeCategory::ALL {
        println!(
            "  {:<14} {} crossroads, {} orientation(s)",
            shape.name(),
            shape.required_offset_count() + 1,
            shape.variants().len()
        );
    }
}

fn run(args: &Args) -> Result<(), SearchError> {
    let config = build_config(args)?;

    if let Some(path) = &args.save_config {
        config.save(path)?;
        println!("Saved search parameters to {}", path.display());
    }

    let generator = LatticeGenerator::new();
    let bounds = region_bounds(&config, generator.region_size(config.version))?;

    println!(
        "Searching for {} crossroads in seed {} ({})",
        config.shape, config.seed, config.version
    );
    println!(
        "  Regions X {}..={}, Z {}..={} ({} regions)",
        bounds.min_x,
        bounds.max_x,
        bounds.min_z,
        bounds.max_z,
        bounds.region_count()
    );
    println!("  Threads: {}, max Y: {}", config.thread_count, config.max_y);

    let summary = run_search(&config, &generator, &ConsoleReporter)?;
    summary.print();

    if let Some(path) = &args.output {
        write_results(path, &config, &summary)?;
        println!("Wrote results to {}", path.display());
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if args.list_shapes {
        print_shapes();
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
