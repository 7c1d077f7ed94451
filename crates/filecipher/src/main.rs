// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Files, Init, Submit, Version};

command_enum! {
    (Submit, Submit),
    (Files, Files),
    (Init, Init),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Resolve config: explicit flag > config.toml > defaults
    let config = match cli::op::resolve_config(args.remote, args.config_path.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config: {}", e);
            std::process::exit(1);
        }
    };
    let guards = filecipher::logging::init(config.log.level(), config.log.dir.as_deref());

    let ctx = match cli::op::OpContext::new(config.cipher, args.config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let code = match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            // submission failures already carry their own wording
            eprintln!("{}", e);
            1
        }
    };

    // flush buffered log lines before exiting
    drop(guards);
    std::process::exit(code);
}
