/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 默认输出文件名
    pub default_output: String,
    /// 题目标题最大长度（超出部分截断）
    pub title_max_length: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_output: "qti_package.zip".to_string(),
            title_max_length: 50,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            default_output: std::env::var("QTI_OUTPUT_NAME").unwrap_or(default.default_output),
            title_max_length: std::env::var("QTI_TITLE_MAX_LENGTH").ok().and_then(|v| v.parse().ok()).unwrap_or(default.title_max_length),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
