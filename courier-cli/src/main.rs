//! Entry point for the `courier` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = courier_cli::run() {
        report(&err);
        std::process::exit(1);
    }
}

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors on stderr")]
fn report(err: &courier_cli::CliError) {
    eprintln!("courier: {err}");
}
