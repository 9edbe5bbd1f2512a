mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use coop_assess::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
