use clap::Parser;
use passvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    init_tracing();

    let result = match cli.command {
        Commands::List { show } => passvault::cli::commands::list::execute(&cli, show),
        Commands::Add {
            ref service,
            ref username,
            ref password,
            generate,
        } => passvault::cli::commands::add::execute(
            &cli,
            service,
            username,
            password.as_deref(),
            generate,
        ),
        Commands::Get { ref id } => passvault::cli::commands::get::execute(&cli, id),
        Commands::Update {
            ref id,
            ref service,
            ref username,
            ref password,
            generate,
        } => passvault::cli::commands::update::execute(
            &cli,
            id,
            service.as_deref(),
            username.as_deref(),
            password.as_deref(),
            generate,
        ),
        Commands::Delete { ref id, force } => {
            passvault::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::Generate(ref args) => passvault::cli::commands::generate::execute(args),
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
