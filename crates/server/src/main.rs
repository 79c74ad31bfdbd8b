#[tokio::main]
async fn main() -> anyhow::Result<()> {
    repurpose_server::start().await
}
