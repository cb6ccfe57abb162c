use clap::Parser;

fn main() {
    let options = launchpad_core::runtime::CliOptions::parse();

    if let Err(error) = launchpad_core::runtime::run_with_options(options) {
        eprintln!("[launchpad-core] runtime failed: {error}");
        std::process::exit(1);
    }
}
