//! `json-data`: dump the game's spells, spellbooks and unrands as JSON.
//!
//! The document goes to stdout (or `--output`) followed by a single newline.
//! Progress is logged to stderr; set `RUST_LOG=info` to see it.

use anyhow::{Context, Result};
use clap::Parser;
use json_data::source::default_data_path;
use json_data::{dump, to_string_with_options, DumpOptions, TomlSource, Utf8Policy, WriteOptions};
use log::info;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "json-data")]
#[command(about = "Dump spells, spellbooks and unrandom artefacts as a JSON document", long_about = None)]
#[command(version)]
struct Cli {
    /// Game data snapshot (TOML). Defaults to data/gamedata.toml.
    #[arg(short, long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Indent the output
    #[arg(long)]
    pretty: bool,

    /// Spaces per nesting level with --pretty
    #[arg(long, value_name = "N", default_value_t = 2)]
    indent: usize,

    /// Include spell and spellbook quotes
    #[arg(long)]
    quotes: bool,

    /// Replace ill-formed UTF-8 with U+FFFD instead of failing
    #[arg(long)]
    lossy: bool,
}

impl Cli {
    fn write_options(&self) -> WriteOptions {
        let utf8 = if self.lossy {
            Utf8Policy::Replace
        } else {
            Utf8Policy::Reject
        };
        WriteOptions::new()
            .with_pretty(self.pretty)
            .with_indent(self.indent)
            .with_utf8_policy(utf8)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let data_path = cli.data.clone().unwrap_or_else(default_data_path);
    let source = TomlSource::load(&data_path).context("while loading game data")?;

    info!("getting json");
    let options = DumpOptions::default().with_quotes(cli.quotes);
    let document = dump::build_document(&source, &options).context("while building document")?;

    info!("printing result");
    let mut json = to_string_with_options(&document, cli.write_options())
        .context("while serializing document")?;
    json.push('\n');

    match &cli.output {
        Some(path) => fs::write(path, json.as_bytes())
            .with_context(|| format!("while writing '{}'", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .and_then(|()| stdout.flush())
                .context("while writing to stdout")?;
        }
    }

    info!("finished");
    Ok(())
}
