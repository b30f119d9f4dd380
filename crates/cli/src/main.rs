use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    partdesk_cli::run().await
}
