//! Portfolio Renderer - binary entry point
//! Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    if let Err(e) = portfolio_renderer::run().await {
        eprintln!("portfolio-renderer: {}", e);
        std::process::exit(1);
    }
}
