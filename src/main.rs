use clap::Parser;
use feedback_catalyst::{cli, commands, config, error, interactive, logging};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    let config = Config::load()?;
    let service_url = cli.service_url.as_deref();

    match cli.command {
        Commands::Run { file, feedback_type, report_type, charts, save_charts, output } => {
            commands::run(
                &config,
                service_url,
                commands::RunOptions {
                    file,
                    feedback_type,
                    report_type,
                    charts,
                    save_charts,
                    output,
                },
            )
            .await?;
        }

        Commands::Headers { file, feedback_type } => {
            commands::headers(&config, service_url, &file, feedback_type).await?;
        }

        Commands::Interactive { output } => {
            let output_dir = config.output_dir(output.as_deref());
            let ctl = commands::build_controller(&config, service_url, Some(output_dir.as_path()))?;
            interactive::run_interactive(ctl, output_dir).await?;
        }

        Commands::Config { set_url, set_output_dir, show } => {
            commands::config(
                config,
                service_url,
                commands::ConfigOptions {
                    set_url,
                    set_output_dir,
                    show,
                },
            )?;
        }
    }

    Ok(())
}
