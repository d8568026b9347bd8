#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    gazette::run().await
}
