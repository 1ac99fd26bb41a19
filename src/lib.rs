//! # Aiken2QTI
//!
//! 把 Aiken 纯文本题库转换为 QTI 2.1 试题包（ZIP）的命令行工具
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 领域模型（Models）
//! - `models/` - 领域数据类型，构造即校验
//! - `Question` - 题目记录，字段私有，构造成功即满足全部约束
//! - `RenderedResource` - 渲染产物的（标识符，文件名）登记项
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，互不依赖
//! - `AikenParser` - 文本 → Question 列表（逐块容错）
//! - `ItemRenderer` - 单个 Question → assessmentItem XML
//! - `ManifestRenderer` - 资源列表 → imsmanifest.xml
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次打包"的完整流程
//! - `PackageBuilder` - 暂存 → 逐题渲染 → 清单 → ZIP
//!
//! ### ④ 应用层（App / CLI）
//! - `app` - 输入校验、旁路分支与统计输出
//! - `cli` - clap 参数定义
//!
//! ## 模块结构

pub mod app;
pub mod cli;
pub mod config;
pub mod error;

pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{ConvertError, Result};
pub use models::{Question, RenderedResource};
pub use services::{AikenParser, ItemRenderer, ManifestRenderer};
pub use workflow::PackageBuilder;
