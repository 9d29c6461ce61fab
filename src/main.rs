#[tokio::main]
async fn main() {
    if let Err(e) = secret_tx_decoder::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
