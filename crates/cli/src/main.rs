//! Test Observatory CLI entry point.

fn main() {
    if let Err(e) = test_observatory_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
