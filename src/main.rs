fn main() {
    if let Err(err) = cv_seed::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
