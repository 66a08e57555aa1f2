//! Scan a save for barrel ring sets and print one report block per set
//! that has a turtle parked at one end.
//!
//! Reports go to stdout; logs go to stderr and follow `RUST_LOG`.

use std::io::{self, Write};
use std::path::PathBuf;

use barrel_rings::{ScanConfig, scan_report};
use clap::Parser;
use eyre::WrapErr;
use mc_world::AnvilWorld;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "barrel-scan", version, about = "Find turtle-owned barrel rings in a save")]
struct Cli {
    /// Save directory containing `level.dat`
    save_dir: PathBuf,

    /// Tile entity id of a ring barrel
    #[arg(
        long,
        env = "BARREL_SCAN_CONTAINER_ID",
        default_value = ScanConfig::DEFAULT_CONTAINER_ID
    )]
    container_id: String,

    /// Tile entity id prefix of a turtle
    #[arg(
        long,
        env = "BARREL_SCAN_CONTROL_PREFIX",
        default_value = ScanConfig::DEFAULT_CONTROL_PREFIX
    )]
    control_prefix: String,
}

impl Cli {
    fn config(&self) -> ScanConfig {
        ScanConfig {
            container_id: self.container_id.clone(),
            control_prefix: self.control_prefix.clone(),
        }
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("barrel_scan=info".parse()?)
                .add_directive("barrel_rings=info".parse()?)
                .add_directive("mc_world=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    let world = AnvilWorld::open(&cli.save_dir)
        .wrap_err_with(|| format!("opening save {}", cli.save_dir.display()))?;
    let blocks = scan_report(&world, &config).wrap_err("scanning save")?;

    let mut out = io::stdout().lock();
    for block in &blocks {
        writeln!(out, "{block}")?;
    }
    out.flush()?;

    info!("Reported {} ring sets", blocks.len());
    Ok(())
}
