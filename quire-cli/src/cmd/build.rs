use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use quire_core::build_site;
use tracing::info;

use crate::config::{DEFAULT_CONFIG_FILE, QuireConfig};

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("prototype")
                .short('p')
                .long("prototype")
                .value_name("DIR")
                .help("Prototype directory holding assets, pages and templates [default: ./Prototype]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for generated site, cleared on every build [default: ./Site]"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value(DEFAULT_CONFIG_FILE),
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build")).about("Build the site from the prototype directory")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let config = QuireConfig::load(args)?;
    let site = config.site_config();

    info!(
        "Building {} into {}",
        site.prototype.display(),
        site.output.display()
    );
    let report = build_site(site)?;

    info!(
        "{} pages, {} table of contents entries, {} prototype entries copied, {} files filled",
        report.pages, report.contents_entries, report.copied_entries, report.filled_files
    );
    println!("Site built successfully in {}", site.output.display());

    Ok(())
}
