//! Binary entrypoint for subsel

fn main() {
    if let Err(err) = subsel_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
