#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = shoots_cli::run_from_env() {
        eprintln!("shoots: {error}");
        std::process::exit(error.exit_code());
    }
}
