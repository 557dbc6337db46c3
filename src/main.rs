fn main() {
    if let Err(e) = hostpin::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
