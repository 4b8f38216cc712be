// src/main.rs

use tracing::error;

use symwatch::errors::EXIT_OTHER;
use symwatch::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("symwatch error: {err}");
        std::process::exit(EXIT_OTHER);
    }

    if let Err(err) = run(args).await {
        if err.is_usage_error() {
            eprintln!("{err}");
            eprintln!("{}", cli::usage());
        } else {
            error!("symwatch exiting: {err}");
        }
        std::process::exit(err.exit_code());
    }
}
