//! homework_watcher_rust - Polls a homework review API and pushes status-change notifications to Telegram

pub mod config;
pub mod formatters;
pub mod review_client;
pub mod telegram_client;
pub mod watcher;

pub use config::WatcherConfig;
pub use formatters::ReviewStatus;
pub use review_client::ReviewApiClient;
pub use telegram_client::TelegramClient;
pub use watcher::{HomeworkWatcher, Notifier, PollOutcome, UpdateSource};
