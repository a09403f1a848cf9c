use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use staticize::Options;
use tracing_subscriber::EnvFilter;

/// Convert externally-assigned JavaScript class statics into TypeScript
/// static property declarations.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the input JavaScript file.
    input: PathBuf,

    /// Path to write the TypeScript output to. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also declare static members without a usable `@type`, typed from a
    /// literal initializer where possible and `any` otherwise.
    #[arg(long)]
    declare_untyped: bool,

    /// Validate the conversion without writing any output.
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let options = Options {
        declare_untyped: args.declare_untyped,
    };
    let name = args.input.display().to_string();
    let output = staticize::convert(&name, &source, &options)
        .with_context(|| format!("converting {}", args.input.display()))?;

    if args.check {
        tracing::info!(input = %args.input.display(), "conversion ok");
        return Ok(());
    }

    match &args.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", output),
    }

    Ok(())
}
