use anyhow::Result;
use dotenv::dotenv;
use env_logger::{Env, Target};
use homework_watcher_rust::{HomeworkWatcher, ReviewApiClient, TelegramClient, WatcherConfig};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    info!("Starting homework_watcher_rust...");

    let config = WatcherConfig::from_env()?;
    info!(
        "Polling {} every {}s",
        config.endpoint,
        config.poll_interval.as_secs()
    );

    let source = ReviewApiClient::new(config.endpoint.clone(), config.api_token.clone());
    let notifier = TelegramClient::new(config.bot_token.clone(), config.chat_id.clone());
    let mut watcher = HomeworkWatcher::new(source, notifier, &config);

    watcher.run().await
}
