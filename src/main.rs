use anyhow::Result;

mod app;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = export_mover::cli::parse();
    app::run(args).await
}
