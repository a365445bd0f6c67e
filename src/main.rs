#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! texarticle — compile multilingual LaTeX articles into `dist/`.

mod article;
mod cli;
mod compiler;
mod types;

use clap::Parser;
use tracing::debug;

use cli::{Cli, OutputCtx, write_error};
use compiler::{LatexCompiler, SystemRunner};
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();
    cli::logging::init(cli.debug);

    let ctx = OutputCtx::new(cli.output, cli.json, cli.dry_run);
    let compiler = LatexCompiler::new(cli.to_options(), SystemRunner, ctx);
    debug!(options = ?compiler.options(), ?ctx, "starting");

    // Per-language failures are reported and never change the exit code.
    if let Err(err) = compiler.compile_all() {
        write_error(&ErrorOutput::from_compile_error(&err), ctx.format);
        std::process::exit(err.exit_code());
    }
}
