use clap::Parser;

use labsum::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();
    labsum::init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(output) => println!("{output}"),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}
