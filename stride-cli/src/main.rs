//! Entry point for the `stride` command-line interface.
#![forbid(unsafe_code)]

use stride_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "fatal errors are reported on stderr before exiting"
)]
fn main() {
    match stride_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("stride: {err}");
            std::process::exit(1);
        }
    }
}
