use std::fmt;
use std::path::PathBuf;

/// 转换流程错误类型
#[derive(Debug)]
pub enum ConvertError {
    /// 输入文件不存在
    NotFound {
        path: PathBuf,
    },
    /// 输入文件为空
    EmptyInput {
        path: PathBuf,
    },
    /// 输入文件无法读取
    ReadFailed {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 文件中没有任何有效题目
    NoQuestions {
        path: PathBuf,
    },
    /// 题目记录不满足校验规则
    MalformedQuestion {
        reason: String,
    },
    /// 打包阶段失败（暂存、写入或压缩）
    Archive {
        context: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::NotFound { path } => {
                write!(f, "输入文件不存在: {}", path.display())
            }
            ConvertError::EmptyInput { path } => {
                write!(f, "输入文件为空: {}", path.display())
            }
            ConvertError::ReadFailed { path, source } => {
                write!(f, "读取输入文件失败 ({}): {}", path.display(), source)
            }
            ConvertError::NoQuestions { path } => {
                write!(f, "文件中没有找到有效题目: {}", path.display())
            }
            ConvertError::MalformedQuestion { reason } => {
                write!(f, "题目不合法: {}", reason)
            }
            ConvertError::Archive { context, source } => {
                write!(f, "打包失败 ({}): {}", context, source)
            }
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::ReadFailed { source, .. } | ConvertError::Archive { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 便捷构造函数 ==========

impl ConvertError {
    /// 创建输入文件读取错误
    pub fn read_failed(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConvertError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// 创建题目校验错误
    pub fn malformed(reason: impl Into<String>) -> Self {
        ConvertError::MalformedQuestion {
            reason: reason.into(),
        }
    }

    /// 创建打包阶段错误
    pub fn archive(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConvertError::Archive {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

// ========== Result 类型别名 ==========

/// 转换流程结果类型
pub type Result<T> = std::result::Result<T, ConvertError>;
