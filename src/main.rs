#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use redadeg::controller::Controller;
use redadeg::ui::{ConsoleMap, ConsolePanel};
use redadeg::{cli, session, utils};
use std::io;

#[macro_use]
extern crate redadeg;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let Some(start) = cli.start_location()? else {
        tracing::warn!("no start location given; skipping map setup");
        anyhow::bail!("Could not get your location.");
    };
    dlog!("mode=interactive lat={} lon={}", start.lat, start.lon);

    let mut map = ConsoleMap::new(io::stdout());
    let mut panel = ConsolePanel::new(io::stdout());
    let mut controller = Controller::new();

    controller.on_location_acquired(start, &mut map)?;

    let stdin = io::stdin();
    let mut out = io::stdout();
    session::run(stdin.lock(), &mut out, &mut map, &mut panel, &mut controller)
}
