use std::path::Path;

use billing_engine::cli::{load_catalog, read_input};
use billing_engine::{
    ApiResponse, Cli, Config, cleanup_old_logs, init_logger_with_file, process,
};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // 1. Environment (.env) and configuration
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. Logging
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    if let Some(dir) = &config.log_dir {
        cleanup_old_logs(Path::new(dir), config.log_retention_days)?;
    }

    // 3. Input
    let cli = Cli::parse();
    let input = read_input(cli.file.as_deref())?;
    let catalog = load_catalog(cli.catalog.as_deref())?;

    tracing::info!(
        kind = ?cli.kind,
        environment = %config.environment,
        post = cli.post,
        "Processing record"
    );

    // 4. Recalculate and print
    match process(cli.kind, &input, &catalog, cli.post) {
        Ok(output) if cli.summary => {
            print!("{}", output.summary(&config.currency_sign));
        }
        Ok(output) => {
            print_json(&ApiResponse::success(output), cli.pretty)?;
        }
        Err(err) => {
            tracing::error!(code = err.code.code(), "Record rejected: {}", err);
            print_json(&ApiResponse::<()>::error(&err), cli.pretty)?;
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
