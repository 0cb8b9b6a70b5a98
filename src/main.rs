#[tokio::main]
async fn main() {
    let code = eventcell::app::startup::startup().await;
    std::process::exit(code);
}
