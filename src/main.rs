use env_logger::{Env, Target};
use log::error;
use urlcheck::{check_urls, CheckerConfig};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("reqwest", log::LevelFilter::Warn)
        .filter_module("hyper_util", log::LevelFilter::Warn)
        .target(Target::Stdout)
        .init();

    let config = CheckerConfig::default();

    match check_urls(&config).await {
        Ok(reports) => println!("All {} checks completed.", reports.len()),
        Err(e) => error!("Check run aborted: {}", e),
    }
}
