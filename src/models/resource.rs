/// 渲染产物的清单登记项
///
/// 记录一个题目文件的标识符与包内文件名，供清单渲染使用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResource {
    /// 题目标识符（同时出现在 assessmentItem 与清单中）
    pub identifier: String,
    /// 包内文件名
    pub filename: String,
}

impl RenderedResource {
    pub fn new(identifier: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            filename: filename.into(),
        }
    }
}
