use clap::Parser;
use pixconv::{BatchProcessor, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let processor = BatchProcessor::new(cli.into_config());

    match processor.run() {
        Ok(summary) => {
            log::debug!("{} files handled", summary.total());
            Ok(())
        }
        // Missing input and unknown formats end the run quietly with status 0.
        Err(e) if e.is_precondition() => {
            println!("{}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
