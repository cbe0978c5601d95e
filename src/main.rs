use clap::Parser;
use clipview_lib::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clipview_lib::run_app(Cli::parse()).await
}
