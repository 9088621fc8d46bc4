//! `stylist build` command implementation.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use stylist_config::{CliSettings, Config};
use stylist_render::{BuildOutput, StaticSiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Path argument meaning "read standard input".
const STDIN_PATH: &str = "-";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Extractor JSON file, or `-` for standard input.
    input: PathBuf,

    /// Path to configuration file (default: auto-discover stylist.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (overrides config). Without one, HTML goes to stdout.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write the raw input tree as JSON to this path.
    #[arg(long)]
    dump_ast: Option<PathBuf>,

    /// TOML table of externally documented names.
    #[arg(long)]
    external_links: Option<PathBuf>,

    /// Do not warn about duplicate declaration names.
    #[arg(long)]
    no_dupe_warning: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        tracing::debug!(input = %self.input.display(), "Reading documentation JSON");
        let json = read_input(&self.input)?;

        match StaticSiteBuilder::new(&config).build_json(&json)? {
            BuildOutput::Html(html) => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
            BuildOutput::Written { dir, files } => {
                output.success(&format!(
                    "Wrote {} files to {}",
                    files.len(),
                    dir.display()
                ));
            }
        }
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            output_dir: self.output_dir.clone(),
            dump_ast: self.dump_ast.clone(),
            external_cross_links: self.external_links.clone(),
            cross_links_dupe_warning: self.no_dupe_warning.then_some(false),
        }
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let result = if path.as_os_str() == STDIN_PATH {
        let mut json = String::new();
        io::stdin().lock().read_to_string(&mut json).map(|_| json)
    } else {
        std::fs::read_to_string(path)
    };

    result.map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}
