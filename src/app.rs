use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::ConvertError;
use crate::models::Question;
use crate::services::AikenParser;
use crate::utils::logging::truncate_text;
use crate::workflow::PackageBuilder;

/// 内置的 Aiken 格式示例文件
const SAMPLE_CONTENT: &str = "\
法国的首都是哪座城市？
A) 伦敦
B) 巴黎
C) 柏林
D) 马德里
ANSWER: B

一个星期有多少天？
A) 五天
B) 六天
C) 七天
D) 八天
ANSWER: C

2 + 2 的结果是多少？
A) 3
B) 4
C) 5
D) 6
ANSWER: B

哥伦布哪一年到达美洲？
A) 1490 年
B) 1491 年
C) 1492 年
D) 1493 年
ANSWER: C

世界上最大的海洋是哪一个？
A) 大西洋
B) 印度洋
C) 北冰洋
D) 太平洋
ANSWER: D
";

/// 应用主结构
pub struct App {
    cli: Cli,
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(cli: Cli, config: Config) -> Self {
        Self { cli, config }
    }

    /// 运行应用主逻辑
    pub fn run(&self) -> Result<()> {
        // 旁路：生成示例文件后直接结束
        if let Some(sample_path) = &self.cli.create_sample {
            create_sample_file(sample_path)?;
            return Ok(());
        }

        let Some(input_path) = &self.cli.input_file else {
            anyhow::bail!("需要指定输入文件，或使用 --create-sample 生成示例");
        };

        validate_input_file(input_path)?;

        log_startup();

        // 解析输入
        let parser = AikenParser::new();
        let questions = parser.parse_file(input_path)?;

        if questions.is_empty() {
            error!("❌ 文件中没有找到有效题目: {}", input_path.display());
            return Err(ConvertError::NoQuestions {
                path: input_path.clone(),
            }
            .into());
        }

        info!("📝 找到题目: {} 道", questions.len());

        // 旁路：仅校验，不打包
        if self.cli.validate_only {
            log_validated_questions(&questions);
            return Ok(());
        }

        // 打包输出到当前工作目录
        let output_dir = std::env::current_dir().context("无法获取当前工作目录")?;
        let output_name = self
            .cli
            .output
            .clone()
            .unwrap_or_else(|| self.config.default_output.clone());

        let builder = PackageBuilder::new(output_dir, &self.config);
        let output_path = builder.build(&questions, &output_name)?;

        print_final_stats(&output_path, questions.len())?;

        Ok(())
    }
}

/// 生成 Aiken 格式示例文件
pub fn create_sample_file(path: &Path) -> Result<()> {
    fs::write(path, SAMPLE_CONTENT)
        .with_context(|| format!("无法写入示例文件: {}", path.display()))?;
    info!("✅ 示例文件已创建: {}", path.display());
    info!("💡 可运行 aiken2qti {} 进行转换", path.display());
    Ok(())
}

/// 校验输入文件：存在、是普通文件、非空
fn validate_input_file(path: &Path) -> crate::error::Result<()> {
    if !path.exists() {
        return Err(ConvertError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(ConvertError::read_failed(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "不是普通文件"),
        ));
    }
    let metadata = fs::metadata(path).map_err(|e| ConvertError::read_failed(path, e))?;
    if metadata.len() == 0 {
        return Err(ConvertError::EmptyInput {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_startup() {
    info!("{}", "=".repeat(60));
    info!("🚀 Aiken → QTI 2.1 转换器");
    info!("{}", "=".repeat(60));
}

fn log_validated_questions(questions: &[Question]) {
    info!("✅ 文件校验通过");
    for (index, question) in questions.iter().enumerate() {
        info!("  {}. {}", index + 1, truncate_text(question.text(), 60));
    }
}

fn print_final_stats(output_path: &Path, question_count: usize) -> Result<()> {
    let size_kb = fs::metadata(output_path)
        .with_context(|| format!("无法读取输出文件大小: {}", output_path.display()))?
        .len() as f64
        / 1024.0;

    info!("\n{}", "=".repeat(60));
    info!("✅ 转换完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📦 生成文件: {}", output_path.display());
    info!("📊 文件大小: {:.1} KB", size_kb);
    info!("📝 处理题目: {} 道", question_count);
    info!("{}", "=".repeat(60));
    info!("💡 可导入 Canvas、Blackboard、Moodle、D2L 等支持 QTI 2.1 的平台");
    Ok(())
}
