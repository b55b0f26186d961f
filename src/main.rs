fn main() -> std::process::ExitCode {
    databank::cli::run()
}
