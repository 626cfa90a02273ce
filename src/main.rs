use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = vault_ad_groups::cli::Cli::parse();
    cli.run()
}
