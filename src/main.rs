fn main() {
    if let Err(err) = finquery::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
