#[tokio::main]
async fn main() -> eyre::Result<()> {
    food_collective_api::run().await
}
