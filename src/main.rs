use std::process::ExitCode;

fn main() -> ExitCode {
    match lpm_cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            lpm_logger::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
