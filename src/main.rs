//! plotscript CLI: render and run gnuplot plot documents.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "plotscript",
    version,
    about = "Build gnuplot scripts from plot documents and run gnuplot on them"
)]
struct Cli {
    #[command(subcommand)]
    command: plotscript::cli::Commands,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = plotscript::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
