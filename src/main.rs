use omnibus::config::Config;
use omnibus::engine::Engine;
use omnibus::server::serve;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().unwrap();
    let port = config.port;

    let engine = Engine::new(config);

    serve(engine, port).await;
}
