use std::process::ExitCode;

fn main() -> ExitCode {
    panelquote_cli::run()
}
