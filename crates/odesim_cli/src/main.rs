use anyhow::Result;
use clap::Parser;
use odesim_cli::app::{init_logging, run, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);
    run(&args, &mut std::io::stdout().lock())?;
    Ok(())
}
