//! generate — build a synthetic transit network and dump it as CSV.
//!
//! ```text
//! generate [OUT_DIR] [CONFIG.json]
//! ```
//!
//! `OUT_DIR` defaults to `output/network`.  Without a config file every
//! option takes its default (a 300 × 300 noisy region).  Set `RUST_LOG=info`
//! to follow the stages.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use tg_gen::{GeneratorBuilder, GeneratorConfig};
use tg_output::{write_network, CsvWriter};

const DEFAULT_OUT_DIR: &str = "output/network";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUT_DIR.to_string()));
    let config = match args.next() {
        Some(path) => GeneratorConfig::from_path(&path)
            .with_context(|| format!("reading config {path}"))?,
        None => GeneratorConfig::default(),
    };

    println!("=== generate — synthetic transit network ===");
    println!(
        "Seed: {}  |  Region: {:?} {}×{}  |  Window: {} .. {} ms",
        config.seed,
        config.region.source,
        config.region.size_x,
        config.region.size_y,
        config.connections.time_initial,
        config.connections.time_final
    );
    println!();

    // 1. Validate and run.
    let mapping = config.region.mapping();
    let generator = GeneratorBuilder::new(config).build()?;
    let t0 = Instant::now();
    let network = generator.run()?;
    let elapsed = t0.elapsed();

    // 2. Dump.
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let mut writer = CsvWriter::new(&out_dir)?;
    write_network(
        &mut writer,
        &network.region,
        &network.routes,
        &network.connections,
        &network.queries,
        &mapping,
    )?;

    // 3. Summary.
    let report = &network.report;
    println!("Generation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  cells       : {}", report.cells);
    println!(
        "  stations    : {} ({} placed, {} on edges)",
        report.stations, report.stops_placed, report.post_edge_stops
    );
    println!(
        "  edges       : {} ({} loose stations left)",
        report.edges.edges,
        report.loose_stations_remaining()
    );
    println!(
        "  routes      : {} ({} macro, {} too short to merge)",
        report.route_count,
        report.routes.macro_routes,
        report.unmergeable_routes()
    );
    println!(
        "  connections : {} in {} instances ({} discarded)",
        report.connections, report.instances, report.discarded_instances
    );
    let delayed = network.connections.iter().filter(|c| c.is_delayed()).count();
    println!("  delayed     : {delayed}");
    if !network.queries.is_empty() {
        println!("  queries     : {}", report.queries);
    }
    println!();

    if report.is_complete() {
        println!("All stages reached their targets.");
    } else {
        println!("Generation incomplete:");
        for s in &report.shortfalls {
            println!("  {s}");
        }
    }
    println!("Output written to {}", out_dir.display());
    Ok(())
}
