use anyhow::Context;
use clap::Parser;
use hemikit::cli::Cli;
use hemikit::{init_logging, write_program, Job};
use hemikit_camtools::SessionHeader;
use hemikit_settings::Config;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    debug!("hemikit {} built {}", hemikit::VERSION, hemikit::BUILD_DATE);

    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.printer.apply(&mut config.printer);
    if cli.timestamp {
        config.output.timestamp = true;
    }

    let mut header = SessionHeader::new("hemikit");
    if config.output.timestamp {
        let now = chrono::Local::now().format("%a %b %e %H:%M:%S %Y");
        header = header.with_timestamp(now.to_string());
    }

    let job = Job::from(cli.command);
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = write_program(BufWriter::new(file), &config, &job, &header)?;
            out.flush()?;
            info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = write_program(BufWriter::new(stdout.lock()), &config, &job, &header)?;
            out.flush()?;
        }
    }

    Ok(())
}
