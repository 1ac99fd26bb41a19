//! QTI 包构建流程 - 流程层
//!
//! 核心职责：定义"一次打包"的完整流程
//!
//! 流程顺序：
//! 1. 建立暂存目录（作用域结束自动清理）
//! 2. 逐题渲染 assessmentItem 并写入暂存目录
//! 3. 渲染 imsmanifest.xml
//! 4. 压缩为 ZIP，失败时移除残留的半成品

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::Config;
use crate::error::{ConvertError, Result};
use crate::models::{Question, RenderedResource};
use crate::services::{ItemRenderer, ManifestRenderer};

/// QTI 包构建器
///
/// - 编排完整的打包流程
/// - 不解析输入，只消费已校验的 Question
/// - 只依赖业务能力（services）
pub struct PackageBuilder {
    output_dir: PathBuf,
    item_renderer: ItemRenderer,
    manifest_renderer: ManifestRenderer,
}

impl PackageBuilder {
    /// 创建新的包构建器
    ///
    /// # 参数
    /// - `output_dir`: 生成的 ZIP 所在目录
    pub fn new(output_dir: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            output_dir: output_dir.into(),
            item_renderer: ItemRenderer::new(config),
            manifest_renderer: ManifestRenderer::new(),
        }
    }

    /// 构建完整的 QTI 包
    ///
    /// # 参数
    /// - `questions`: 已校验的题目列表，顺序决定文件编号
    /// - `output_filename`: 输出文件名，缺少 .zip 后缀时自动补全
    ///
    /// # 返回
    /// 返回生成的 ZIP 文件路径
    pub fn build(&self, questions: &[Question], output_filename: &str) -> Result<PathBuf> {
        info!("📦 开始构建 QTI 包，共 {} 道题目", questions.len());

        // 暂存目录依赖 Drop 清理，提前返回或出错都不会残留
        let staging = tempfile::Builder::new()
            .prefix("qti_build_")
            .tempdir()
            .map_err(|e| ConvertError::archive("创建暂存目录", e))?;

        let resources = self.stage_items(staging.path(), questions)?;
        self.stage_manifest(staging.path(), &resources)?;

        let output_path = self.create_zip_package(staging.path(), output_filename)?;

        info!("✅ QTI 包已生成: {}", output_path.display());
        Ok(output_path)
    }

    /// 逐题渲染并写入暂存目录
    fn stage_items(
        &self,
        staging: &Path,
        questions: &[Question],
    ) -> Result<Vec<RenderedResource>> {
        let mut resources = Vec::with_capacity(questions.len());

        for (index, question) in questions.iter().enumerate() {
            let item_id = format!("ITEM_{}", Uuid::new_v4().simple());
            let filename = format!("question_{:03}_{}.xml", index + 1, item_id);

            let xml = self.item_renderer.render(question, &item_id);
            fs::write(staging.join(&filename), xml)
                .map_err(|e| ConvertError::archive(format!("写入 {}", filename), e))?;

            debug!("✓ 已渲染: {}", filename);
            resources.push(RenderedResource::new(item_id, filename));
        }

        Ok(resources)
    }

    /// 渲染清单并写入暂存目录
    fn stage_manifest(&self, staging: &Path, resources: &[RenderedResource]) -> Result<()> {
        let manifest = self.manifest_renderer.render(resources);
        fs::write(staging.join("imsmanifest.xml"), manifest)
            .map_err(|e| ConvertError::archive("写入 imsmanifest.xml", e))?;
        debug!("✓ 已渲染: imsmanifest.xml");
        Ok(())
    }

    /// 把暂存目录压缩为 ZIP
    fn create_zip_package(&self, staging: &Path, output_filename: &str) -> Result<PathBuf> {
        let output_filename = if output_filename.ends_with(".zip") {
            output_filename.to_string()
        } else {
            format!("{}.zip", output_filename)
        };
        let output_path = self.output_dir.join(output_filename);

        if let Err(e) = self.write_zip(staging, &output_path) {
            // 不留下写到一半的包
            let _ = fs::remove_file(&output_path);
            return Err(e);
        }

        Ok(output_path)
    }

    /// 条目按文件名排序写入，保证同样输入得到同样的条目顺序
    fn write_zip(&self, staging: &Path, output_path: &Path) -> Result<()> {
        let file = fs::File::create(output_path)
            .map_err(|e| ConvertError::archive(format!("创建 {}", output_path.display()), e))?;
        let mut zip = ZipWriter::new(file);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut entries: Vec<PathBuf> = fs::read_dir(staging)
            .map_err(|e| ConvertError::archive("读取暂存目录", e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        entries.sort();

        for path in entries {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            zip.start_file(name, options)
                .map_err(|e| ConvertError::archive(format!("添加条目 {}", name), e))?;
            let bytes = fs::read(&path)
                .map_err(|e| ConvertError::archive(format!("读取 {}", name), e))?;
            zip.write_all(&bytes)
                .map_err(|e| ConvertError::archive(format!("写入条目 {}", name), e))?;
            debug!("✓ 已加入 ZIP: {}", name);
        }

        zip.finish()
            .map_err(|e| ConvertError::archive("完成 ZIP 写入", e))?;
        Ok(())
    }
}
