use clap::Parser;
use territory_summary::app::{handle_fatal_error, init_logging, AppConfig};
use territory_summary::cli::{execute_command, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let app = AppConfig::default()
        .with_workbook(cli.workbook.clone())
        .with_config_path(cli.config.clone());
    let app = AppConfig {
        verbose: cli.verbose,
        ..app
    };

    init_logging(&app);

    if let Err(e) = execute_command(cli.command, &app).await {
        handle_fatal_error(e, app.verbose);
    }
}
