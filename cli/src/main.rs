mod commands;
mod terminal;

use commands::{CommandLine, Commands, local, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    logging::init_logging();
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Local => {
            print::header("local machine", cfg.quiet);
            local::local(&cfg)
        }
        Commands::Scan(args) => {
            print::header("starting scanner", cfg.quiet);
            scan::scan(args, &cfg).await
        }
    }
}
