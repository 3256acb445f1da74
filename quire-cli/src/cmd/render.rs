use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub fn make_subcommand() -> Command {
    Command::new("render")
        .about("Convert a single page to HTML and print it")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Page source file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

/// Templates are not filled, so `$head` and `$menu` stay in the output.
pub fn execute(args: &ArgMatches) -> Result<()> {
    let Some(path) = args.get_one::<PathBuf>("file") else {
        anyhow::bail!("no page file given");
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let page = quire_core::render_page(&content, path, "html")
        .with_context(|| format!("Failed to render {}", path.display()))?;

    println!("{}", page.html);

    Ok(())
}
