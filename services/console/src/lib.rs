mod cli;
mod demo;
mod server;
mod stub;

use olahire::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
