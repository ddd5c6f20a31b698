use clap::Parser;
use gkecc::adapter::inbound::cli::command::Cli;
use gkecc::adapter::inbound::cli::{diagnostic, run};

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run::execute(cli)) {
        diagnostic::report(&e);
        std::process::exit(e.exit_code());
    }
}
