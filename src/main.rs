use anyhow::Context;
use clap::Parser;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use url_fanout::utils::{logger, validation::Validate};
use url_fanout::{CliConfig, FanoutReport, FanoutRequester, ReqwestTransport, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("❌ Failed to load {}: {}", path, e);
                eprintln!("❌ {}", e);
                std::process::exit(2);
            }
        },
        None => TomlConfig::default(),
    };

    // 驗證配置
    if let Err(e) = file_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    let transport = match file_config
        .transport_options()
        .and_then(ReqwestTransport::with_options)
    {
        Ok(transport) => transport,
        Err(e) => {
            tracing::error!("❌ Failed to build HTTP client: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };
    let requester = FanoutRequester::new(transport);

    let stdin = if cli.stdin {
        let mut raw = String::new();
        if let Err(e) = tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .context("reading stdin")
        {
            tracing::error!("❌ Failed to read input: {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(2);
        }
        Some(raw)
    } else {
        None
    };

    let input = match cli.resolve_input(&file_config, stdin.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            tracing::error!("❌ Failed to read input: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    let started_at = chrono::Utc::now();
    let timer = Instant::now();

    match requester.fetch_all_value(&input).await {
        Ok(outcomes) => {
            let report = FanoutReport::new(started_at, timer.elapsed().as_millis(), outcomes);
            let output = if cli.pretty || file_config.pretty_output() {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", output);
        }
        Err(e) => {
            tracing::error!("❌ Fan-out rejected: {}", e);
            eprintln!("{}", serde_json::to_string(&e)?);
            std::process::exit(1);
        }
    }

    Ok(())
}
