//! Debug tool that dumps the crossroads of one placement region
//! grouped by floor height, and which shapes they complete

use clap::Parser;

use crossroad_finder::config::DEFAULT_MAX_Y;
use crossroad_finder::generator::{LatticeGenerator, StructureGenerator};
use crossroad_finder::search::{find_match, group_by_height};
use crossroad_finder::shapes::ShapeCategory;
use crossroad_finder::version::Version;

#[derive(Parser, Debug)]
#[command(name = "debug_region")]
#[command(about = "Print the crossroads generated in one fortress region")]
struct Args {
    /// Numeric world seed
    #[arg(short, long, allow_negative_numbers = true)]
    seed: i64,

    /// Region X index
    #[arg(short = 'x', long, allow_negative_numbers = true, default_value = "0")]
    region_x: i32,

    /// Region Z index
    #[arg(short = 'z', long, allow_negative_numbers = true, default_value = "0")]
    region_z: i32,

    /// Closest lower game version
    #[arg(short = 'v', long = "mc-version", value_enum, default_value = "1.16.1")]
    version: Version,

    /// Fortress salt (default: the version's salt)
    #[arg(long, allow_negative_numbers = true)]
    salt: Option<i32>,

    /// Highest crossroad floor to include
    #[arg(long, default_value_t = DEFAULT_MAX_Y)]
    max_y: i32,
}

fn main() {
    let args = Args::parse();
    let salt = args.salt.unwrap_or_else(|| args.version.default_salt());

    let generator = LatticeGenerator::new();
    let mut pieces = Vec::new();
    generator.generate(args.seed, args.region_x, args.region_z, salt, args.version, &mut pieces);

    println!(
        "Region ({}, {}) of seed {} ({}): {} pieces",
        args.region_x,
        args.region_z,
        args.seed,
        args.version,
        pieces.len()
    );
    if pieces.is_empty() {
        println!("  No fortress in this region");
        return;
    }

    let groups = group_by_height(&pieces, args.max_y);
    for group in &groups {
        println!("  y={}: {} crossroads", group.min_y, group.len());
        for bb in &group.boxes {
            println!("    {} {}", bb.min_x, bb.min_z);
        }
    }

    for shape in ShapeCategory::ALL {
        match find_match(&groups, shape) {
            Some(location) => println!("  {:<14} /tp {}", shape.name(), location),
            None => println!("  {:<14} -", shape.name()),
        }
    }
}
