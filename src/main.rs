use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use doc_orchestrator::utils::logging;
use doc_orchestrator::{App, Config, RunRequest};

/// 提交文档与问题，查看提取结果，并可选地发送告警
#[derive(Parser, Debug)]
#[command(name = "doc-orchestrator", version)]
struct Cli {
    /// 要处理的文档（建议 PDF / TXT）
    file: PathBuf,

    /// 关于文档的问题
    #[arg(short, long, default_value = "")]
    question: String,

    /// 告警收件人邮箱，给出时在处理完成后发送告警
    #[arg(short, long)]
    recipient: Option<String>,

    /// TOML 配置文件，覆盖环境变量中的配置
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::from_env();
    if let Some(path) = &cli.config {
        config = config.merge_toml_file(path)?;
    }
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    let app = App::initialize(config)?;
    app.run(RunRequest {
        file: cli.file,
        question: cli.question,
        recipient: cli.recipient,
    })
    .await?;

    Ok(())
}
