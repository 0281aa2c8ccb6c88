use std::process::ExitCode;

fn main() -> ExitCode {
    brentford_calendar_lib::run()
}
