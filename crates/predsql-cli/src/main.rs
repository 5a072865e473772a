fn main() {
    if let Err(e) = predsql_cli::run(std::env::args().collect()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
