use std::{
    collections::HashMap,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use clap::Parser;
use mdfragment::{output_path, render, render_file, render_to_dir, trim_source};
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Render generated text into HTML fragments")]
struct Cli {
    /// Write `<stem>.html` files into this directory instead of printing
    #[arg(long = "out-dir", requires = "files")]
    out_dir: Option<PathBuf>,
    /// Log each rendering decision
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
    /// Text files to render
    files: Vec<PathBuf>,
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Refuse inputs whose fragments would overwrite each other in `out_dir`.
fn check_distinct_targets(files: &[PathBuf], out_dir: &Path) -> anyhow::Result<()> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::with_capacity(files.len());
    for path in files {
        let target = output_path(path, out_dir);
        if let Some(previous) = seen.insert(target.clone(), path) {
            bail!(
                "{} and {} would both write {}",
                previous.display(),
                path.display(),
                target.display()
            );
        }
    }
    Ok(())
}

/// Render one file, either returning the fragment or writing it to `out_dir`.
fn process_file(path: &Path, out_dir: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(dir) = out_dir {
        let target = render_to_dir(path, dir)
            .with_context(|| format!("failed to render {}", path.display()))?;
        info!(source = %path.display(), target = %target.display(), "wrote fragment");
        return Ok(None);
    }
    let html =
        render_file(path).with_context(|| format!("failed to render {}", path.display()))?;
    Ok(Some(html))
}

/// Entry point for the command-line renderer.
///
/// With no file arguments the text is read from standard input. Files are
/// rendered in parallel; fragments are printed in argument order. A failing
/// file does not stop the others, but the process exits with an error.
///
/// # Examples
///
/// ```sh
/// # Render a file to stdout
/// mdfragment reply.txt
///
/// # Render several files into a directory
/// mdfragment --out-dir public/ a.txt b.txt
///
/// # Render from standard input
/// cat reply.txt | mdfragment
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if cli.files.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        println!("{}", render(trim_source(&input)));
        return Ok(());
    }

    if let Some(dir) = &cli.out_dir {
        check_distinct_targets(&cli.files, dir)?;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let out_dir = cli.out_dir.as_deref();
    let results: Vec<_> = cli
        .files
        .par_iter()
        .map(|path| process_file(path, out_dir))
        .collect();

    let mut failed = 0usize;
    for result in results {
        match result {
            Ok(Some(html)) => println!("{html}"),
            Ok(None) => {}
            Err(err) => {
                error!("{err:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} file(s) failed");
    }
    Ok(())
}
