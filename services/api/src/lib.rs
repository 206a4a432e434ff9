mod cli;
mod infra;
mod report;
mod routes;
mod server;

use uae_payments::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
