#[tokio::main]
async fn main() {
    if let Err(e) = gaitcompare_lib::run().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
