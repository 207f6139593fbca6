use clap::Parser;

use dotlink::cli::{Cli, Command};
use dotlink::commands;
use dotlink::config::Settings;
use dotlink::logging::Logger;

fn main() {
    #[cfg(windows)]
    let _ = enable_ansi_support::enable_ansi_support();

    let cli = Cli::parse();
    let log = Logger::new(cli.global.verbose);

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            log.error(&format!("{e}"));
            std::process::exit(1);
        }
    };

    let dry_run = cli.global.dry_run;
    let result = match &cli.command {
        Command::Link { layer } => commands::link(&settings, &log, dry_run, layer),
        Command::Unlink { layer } => commands::unlink(&settings, &log, dry_run, layer),
        Command::Show { layer } => commands::show(&settings, &log, dry_run, layer.as_deref()),
        Command::Check { auto_fix } => commands::check(&settings, &log, dry_run, *auto_fix),
        Command::Relink { platform } => commands::relink(&settings, &log, dry_run, platform),
        Command::Info => commands::info(&settings, &log),
    };

    if let Err(e) = result {
        log.error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
