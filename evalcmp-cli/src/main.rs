fn main() {
    if let Err(e) = evalcmp_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
