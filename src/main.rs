use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match diabetes_predictor_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
