use clap::Parser;
use twlist::cli::commands::Cli;
use twlist::cli::handlers;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = handlers::launch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
