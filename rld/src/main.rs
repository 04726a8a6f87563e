use clap::CommandFactory;
use clap::Parser;
use rld::cli::CliArgs;

pub fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if let Some(shell) = args.print_completions {
        let mut cmd = CliArgs::command();
        clap_complete::generate(shell, &mut cmd, "rld", &mut std::io::stdout());
        return Ok(());
    }

    let config = args.load_config()?;

    env_logger::Builder::new()
        .filter_level(config.log_level_filter()?)
        .init();

    if let Some(path) = &config.config_file_path {
        log::info!("using configuration from {path:?}");
    }

    let stdout = std::io::stdout();
    args.run(&config, &mut stdout.lock())
}
