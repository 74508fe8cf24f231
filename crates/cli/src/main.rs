use std::process::ExitCode;

fn main() -> ExitCode {
    stellar_cli::run()
}
