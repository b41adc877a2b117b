use log::*;
use service::{
    config::Config,
    jobs::{self, ChannelJobQueue},
    logging::Logger,
    AppState,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!(
        "Starting ticket webhook intake [{} environment]",
        config.runtime_env()
    );

    let (job_queue, job_receiver) = ChannelJobQueue::new(config.job_queue_capacity);

    let app_state = match AppState::new(config, Arc::new(job_queue)) {
        Ok(state) => state,
        Err(e) => {
            error!("Invalid configuration: {e} ({:?})", e.source);
            std::process::exit(1);
        }
    };

    tokio::spawn(jobs::hand_off(job_receiver));

    if let Err(e) = web::init_server(app_state).await {
        error!("Server failed: {e}");
        std::process::exit(1);
    }
}
