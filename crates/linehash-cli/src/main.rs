//! CLI entry point for linehash.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `linehash-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use linehash_app::{
    AnnotateInput, annotate_sarif_json, format_line_hashes, render_annotations, render_markdown,
    run_hash_file,
};
use linehash_settings::{EffectiveConfig, LinehashConfigV1, Overrides};
use tracing::debug;

/// Config file picked up from the current directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "linehash.toml";

/// Checkout directory exported by GitHub Actions.
const WORKSPACE_ENV: &str = "GITHUB_WORKSPACE";

#[derive(Parser, Debug)]
#[command(
    name = "linehash",
    version,
    about = "Add line-stable fingerprints to SARIF reports"
)]
struct Cli {
    /// Directory report URIs are resolved against
    /// (default: config `source_root`, then $GITHUB_WORKSPACE, then the current directory).
    #[arg(long, global = true)]
    source_root: Option<Utf8PathBuf>,

    /// Path to linehash config TOML (default: ./linehash.toml if present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Enable verbose output (info level logging).
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Enable debug output (debug level logging).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute `primaryLocationLineHash` for every result of a SARIF report.
    Annotate {
        /// SARIF report to annotate.
        #[arg(long)]
        sarif: Utf8PathBuf,

        /// Where to write the annotated report (default: overwrite the input).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,

        /// Write a Markdown summary of the run.
        #[arg(long)]
        summary_md: Option<Utf8PathBuf>,

        /// Print GitHub Actions annotations for inconsistent fingerprints.
        #[arg(long)]
        annotations: bool,

        /// Maximum number of annotations to print.
        #[arg(long)]
        annotations_max: Option<u32>,

        /// Pretty-print the annotated report.
        #[arg(long)]
        pretty: bool,

        /// Hash files one at a time.
        #[arg(long)]
        sequential: bool,
    },

    /// Print the fingerprint of every line of a file.
    Hash {
        /// File to hash.
        file: Utf8PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    let result = match &cli.cmd {
        Commands::Annotate {
            sarif,
            output,
            summary_md,
            annotations,
            annotations_max,
            pretty,
            sequential,
        } => {
            let overrides = Overrides {
                source_root: cli.source_root.clone(),
                output: pretty.then(|| "pretty".to_string()),
                parallel: sequential.then_some(false),
                annotations_max: *annotations_max,
            };
            load_config(cli.config.as_deref(), overrides).and_then(|config| {
                cmd_annotate(
                    &config,
                    sarif,
                    output.as_deref(),
                    summary_md.as_deref(),
                    *annotations,
                )
            })
        }
        Commands::Hash { file } => cmd_hash(file),
    };

    if let Err(err) = result {
        eprintln!("linehash error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("logging initialized at level: {}", level);
}

/// Load and resolve the config. A missing default config file means defaults.
fn load_config(path: Option<&Utf8Path>, overrides: Overrides) -> anyhow::Result<EffectiveConfig> {
    let (cfg_path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (Utf8PathBuf::from(DEFAULT_CONFIG), false),
    };

    let cfg = if cfg_path.is_file() || required {
        let text = std::fs::read_to_string(&cfg_path)
            .with_context(|| format!("read config: {}", cfg_path))?;
        linehash_settings::parse_config_toml(&text)
            .with_context(|| format!("parse config: {}", cfg_path))?
    } else {
        LinehashConfigV1::default()
    };

    let config_dir = match cfg_path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };

    let resolved = linehash_settings::resolve_config(cfg, &config_dir, overrides)
        .context("resolve config")?;
    Ok(resolved.effective)
}

fn source_root(config: &EffectiveConfig) -> anyhow::Result<Utf8PathBuf> {
    if let Some(root) = &config.source_root {
        return Ok(root.clone());
    }
    if let Ok(workspace) = std::env::var(WORKSPACE_ENV)
        && !workspace.is_empty()
    {
        return Ok(Utf8PathBuf::from(workspace));
    }
    let cwd = std::env::current_dir().context("read current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("current directory is not UTF-8: {}", p.display()))
}

fn cmd_annotate(
    config: &EffectiveConfig,
    sarif: &Utf8Path,
    output: Option<&Utf8Path>,
    summary_md: Option<&Utf8Path>,
    annotations: bool,
) -> anyhow::Result<()> {
    let root = source_root(config)?;
    debug!(source_root = %root, sarif = %sarif, "annotating report");

    let text =
        std::fs::read_to_string(sarif).with_context(|| format!("read report: {}", sarif))?;
    let input = AnnotateInput {
        source_root: &root,
        parallel: config.parallel,
    };
    let out = annotate_sarif_json(&text, &input, config.output)
        .with_context(|| format!("annotate report: {}", sarif))?;

    write_text_file(output.unwrap_or(sarif), &out.json).context("write annotated report")?;

    if let Some(path) = summary_md {
        write_text_file(path, &render_markdown(&out.summary)).context("write markdown")?;
    }

    if annotations {
        for annotation in render_annotations(&out.summary, config.annotations_max) {
            println!("{}", annotation);
        }
    }

    Ok(())
}

fn cmd_hash(file: &Utf8Path) -> anyhow::Result<()> {
    let hashes = run_hash_file(file)?;
    print!("{}", format_line_hashes(&hashes));
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}
