fn main() -> std::process::ExitCode {
    rhizome_lib::run()
}
