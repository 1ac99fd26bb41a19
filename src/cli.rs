//! 命令行参数定义

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "aiken2qti",
    about = "把 Aiken 格式题库转换为兼容 LMS 的 QTI 2.1 试题包",
    version
)]
pub struct Cli {
    /// Aiken 格式的输入文件
    pub input_file: Option<PathBuf>,

    /// 输出 ZIP 文件名（默认 qti_package.zip，自动补全 .zip 后缀）
    #[arg(short, long)]
    pub output: Option<String>,

    /// 生成一个 Aiken 格式示例文件后退出
    #[arg(long, value_name = "FILENAME")]
    pub create_sample: Option<PathBuf>,

    /// 显示详细的调试日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 仅解析并校验输入文件，不生成 QTI 包
    #[arg(long)]
    pub validate_only: bool,
}
