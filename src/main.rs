use clap::Parser;
use naturedopes::cli::App;
use naturedopes::commands;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // A missing .env is fine; API_URL / API_KEY may come from the real environment.
    let _ = dotenvy::dotenv();

    let app = App::parse();
    init_logging(app.verbose);

    commands::run(app, &mut std::io::stdout().lock())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("naturedopes=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
