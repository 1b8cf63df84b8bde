fn main() {
    if let Err(err) = generator_surat::run() {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}
