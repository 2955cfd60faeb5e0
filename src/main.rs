use anyhow::Result;
use clap::Parser;
use tempcal::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tempcal::run(cli).await
}
