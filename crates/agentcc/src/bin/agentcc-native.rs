use std::process::ExitCode;

use agentcc::{cli, Variant};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    cli::run(Variant::Native).await
}
