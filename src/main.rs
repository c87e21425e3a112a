use clap::Parser;
use autofill_protocol::cli::commands::{cmd_classify, cmd_complete, cmd_offer, cmd_parse};
use autofill_protocol::cli::config::{Cli, Commands, build_parser, build_service, load_config, try_load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // An explicitly named config must load; the default one is optional.
    let config = match cli.config.as_deref() {
        Some(path) => try_load_config(path)?,
        None => load_config(None),
    };

    let output = match cli.command {
        Commands::Classify { snapshot } => cmd_classify(&snapshot)?,
        Commands::Parse { request } => cmd_parse(&build_parser(&config.parser), &request)?,
        Commands::Offer { request } => {
            let service = build_service(&config, cli.trace.as_deref())?;
            cmd_offer(&service, &request)?
        }
        Commands::Complete {
            request,
            username,
            password,
        } => {
            let service = build_service(&config, cli.trace.as_deref())?;
            cmd_complete(
                &service,
                &request,
                username.as_deref(),
                password.as_deref(),
                cli.verbose,
            )?
        }
    };

    println!("{}", output);
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
