use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    flashcard::cli::run_cli().await
}
