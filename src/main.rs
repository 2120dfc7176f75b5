use std::path::Path;

use anyhow::Result;
use nature_poster::orchestrator::App;
use nature_poster::utils::logging;
use nature_poster::Config;

/// 默认配置文件
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：NATURE_POSTER_CONFIG 指定的文件 > ./config.toml > 仅环境变量
    let config_path = std::env::var("NATURE_POSTER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let config = if Path::new(&config_path).exists() {
        Config::load(Path::new(&config_path))?
    } else {
        Config::from_env()
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let _report = App::initialize(config)?.run().await?;

    Ok(())
}
