use anyhow::Result;
use clap::Parser;

use aiken2qti::app::App;
use aiken2qti::cli::Cli;
use aiken2qti::config::Config;
use aiken2qti::utils::logging;

fn main() -> Result<()> {
    // 解析命令行
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(cli.verbose || config.verbose_logging);

    // 初始化并运行应用
    App::initialize(cli, config).run()
}
