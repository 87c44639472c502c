use std::process;

use blogdesk::{
    application::error::AppError,
    config::{self, CliArgs},
    infra::telemetry,
    presentation::cli,
};
use clap::Parser;
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let args = CliArgs::parse();
    let settings = config::load(&args)?;

    telemetry::init(&settings.logging)?;

    cli::execute(&settings, args.command).await
}
