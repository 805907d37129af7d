mod commands;
mod config;
mod errors;
mod handlers;
mod pipeline;
mod schema;
mod temp_file;
mod utils;
mod video;

use std::sync::Arc;

use teloxide::{prelude::*, utils::command::BotCommands};

use crate::{
    config::BotConfig,
    pipeline::RequestPipeline,
    schema::{Command, schema},
    utils::clear_temp_files,
};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    pretty_env_logger::init();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Error: {}", e);
            return;
        }
    };

    run(config).await;
}

async fn run(config: BotConfig) {
    log::info!("Starting YouTube relay bot...");

    let bot = Bot::new(&config.token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let pipeline = match RequestPipeline::from_config(&config) {
        Ok(pipeline) => Arc::new(pipeline),
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    log::info!(
        "Downloader API: {}, scratch dir: {}",
        config.api_url,
        pipeline.download_dir().display()
    );

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![pipeline.clone()])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    match clear_temp_files(pipeline.download_dir()).await {
        Ok(0) => {}
        Ok(n) => log::info!("Removed {} leftover video files", n),
        Err(e) => log::warn!("Failed to clean {}: {}", pipeline.download_dir().display(), e),
    }
}
