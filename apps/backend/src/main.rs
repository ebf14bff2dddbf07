#[tokio::main]
async fn main() -> anyhow::Result<()> {
    voice_practice_backend::run().await
}
