use clap::Parser;
use cogbench_app::cli::Cli;
use cogbench_app::{App, ConfigLoader, init_logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::load(cli.config.as_deref())?.with_overrides(&cli);
    init_logging(config.log.format, &config.log.level);

    App::new(config).run(cli.command)
}
