//! Aiken 格式解析服务 - 业务能力层
//!
//! 只负责"纯文本 → Question 列表"能力，不关心流程。
//! 单个题目块的错误只丢弃该块并记录诊断，其余题目照常解析。

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::error::{ConvertError, Result};
use crate::models::Question;

/// 选项行：大写字母 + `)` 或 `.` + 至少一个空白 + 选项文本
static OPTION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z])[).]\s+(.+)$").unwrap());

/// 答案行：ANSWER 关键字不区分大小写，答案字母单独出现
static ANSWER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^ANSWER:\s*([A-Z])$").unwrap());

/// 扫描器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// 还没有打开任何题目块
    Idle,
    /// 正在累积题干与选项
    Accumulating,
    /// 上一个题目块刚被 ANSWER 行关闭
    Closed,
}

/// 当前题目块的累积内容
#[derive(Debug, Default)]
struct Block {
    text_parts: Vec<String>,
    options: BTreeMap<char, String>,
}

/// Aiken 格式解析器
///
/// 职责：
/// - 读取输入文件并解码（UTF-8 优先，失败回退 latin-1）
/// - 逐行扫描，把题目块转换成已校验的 Question
/// - 对不合法的块给出带行号的诊断并继续
pub struct AikenParser;

impl AikenParser {
    /// 创建解析器
    pub fn new() -> Self {
        Self
    }

    /// 解析 Aiken 格式文件
    ///
    /// # 参数
    /// - `path`: 输入文件路径
    ///
    /// # 返回
    /// 返回文件中所有通过校验的题目，顺序与文件一致
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Question>> {
        if !path.exists() {
            return Err(ConvertError::NotFound {
                path: path.to_path_buf(),
            });
        }

        info!("📄 正在解析文件: {}", path.display());

        let bytes = fs::read(path).map_err(|e| ConvertError::read_failed(path, e))?;
        let source = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "⚠️ 文件 {} 不是有效的 UTF-8，按 latin-1 回退解码",
                    path.display()
                );
                e.into_bytes().iter().map(|&b| b as char).collect()
            }
        };

        Ok(self.parse_str(&source))
    }

    /// 解析 Aiken 格式文本
    ///
    /// 行号从 1 开始计数，空行也占行号，便于诊断信息对照原文件。
    pub fn parse_str(&self, source: &str) -> Vec<Question> {
        let mut questions = Vec::new();
        let mut state = ScanState::Idle;
        let mut block = Block::default();

        for (index, raw_line) in source.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();

            // 空行不参与任何状态转移
            if line.is_empty() {
                continue;
            }

            // 答案行：尝试关闭当前题目块
            if let Some(caps) = ANSWER_PATTERN.captures(line) {
                if let Some(answer) = caps[1].chars().next() {
                    let answer = answer.to_ascii_uppercase();

                    if block.text_parts.is_empty() {
                        warn!("⚠️ 第 {} 行: ANSWER 之前没有题干，忽略该行", line_number);
                        continue;
                    }
                    if block.options.is_empty() {
                        warn!("⚠️ 第 {} 行: ANSWER 之前没有任何选项，忽略该行", line_number);
                        continue;
                    }

                    // 无论构造成功与否，当前块到此结束
                    let Block {
                        text_parts,
                        options,
                    } = std::mem::take(&mut block);
                    state = ScanState::Closed;

                    match Question::new(text_parts.join(" "), options, answer) {
                        Ok(question) => {
                            debug!(
                                "✓ 第 {} 道题目解析成功 (第 {} 行)",
                                questions.len() + 1,
                                line_number
                            );
                            questions.push(question);
                        }
                        Err(e) => {
                            error!("❌ 第 {} 行: 题目被丢弃: {}", line_number, e);
                        }
                    }
                    continue;
                }
            }

            // 选项行：同一字母后写的覆盖先写的
            if let Some(caps) = OPTION_PATTERN.captures(line) {
                if let Some(letter) = caps[1].chars().next() {
                    block.options.insert(letter, caps[2].to_string());
                    state = ScanState::Accumulating;
                    continue;
                }
            }

            // 其余非空行一律并入题干
            block.text_parts.push(line.to_string());
            state = ScanState::Accumulating;
        }

        if state == ScanState::Accumulating {
            warn!("⚠️ 文件末尾存在不完整的题目（缺少 ANSWER 行），已丢弃");
        }

        info!("📊 解析完成: 共找到 {} 道题目", questions.len());
        questions
    }
}

impl Default for AikenParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_question() {
        let parser = AikenParser::new();
        let questions = parser.parse_str("法国的首都是哪座城市？\nA) 伦敦\nB) 巴黎\nANSWER: B");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "法国的首都是哪座城市？");
        assert_eq!(questions[0].answer(), 'B');
        assert_eq!(questions[0].options()[&'A'], "伦敦");
        assert_eq!(questions[0].options()[&'B'], "巴黎");
    }

    #[test]
    fn test_parse_multiple_blocks() {
        let source = "第一题？\nA) 甲\nB) 乙\nANSWER: A\n\n第二题？\nA) 丙\nB) 丁\nANSWER: B\n";
        let questions = AikenParser::new().parse_str(source);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text(), "第一题？");
        assert_eq!(questions[1].text(), "第二题？");
    }

    #[test]
    fn test_multiline_text_joined_with_space() {
        let source = "题干第一行\n题干第二行\nA) 甲\nB) 乙\nANSWER: A";
        let questions = AikenParser::new().parse_str(source);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "题干第一行 题干第二行");
    }

    #[test]
    fn test_lowercase_answer_normalized() {
        let questions = AikenParser::new().parse_str("题干？\nA) 甲\nB) 乙\nanswer: b");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer(), 'B');
    }

    #[test]
    fn test_dot_separator_accepted() {
        let questions = AikenParser::new().parse_str("题干？\nA. 甲\nB. 乙\nANSWER: A");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options()[&'A'], "甲");
    }

    #[test]
    fn test_option_without_space_is_question_text() {
        // "A)甲" 缺少空格，不算选项行，并入题干
        let questions = AikenParser::new().parse_str("题干？\nA)甲\nB) 乙\nANSWER: B");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "题干？ A)甲");
        assert_eq!(questions[0].options().len(), 1);
    }

    #[test]
    fn test_lowercase_option_letter_is_question_text() {
        let questions = AikenParser::new().parse_str("题干？\na) 甲\nB) 乙\nANSWER: B");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "题干？ a) 甲");
    }

    #[test]
    fn test_duplicate_option_letter_last_wins() {
        let source = "题干？\nA) 旧文本\nA) 新文本\nB) 乙\nANSWER: A";
        let questions = AikenParser::new().parse_str(source);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options().len(), 2);
        assert_eq!(questions[0].options()[&'A'], "新文本");
    }

    #[test]
    fn test_answer_not_in_options_drops_block_only() {
        let source = "第一题？\nA) 甲\nANSWER: A\n\n第二题？\nA) 甲\nB) 乙\nANSWER: C\n\n第三题？\nA) 甲\nANSWER: A\n";
        let questions = AikenParser::new().parse_str(source);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text(), "第一题？");
        assert_eq!(questions[1].text(), "第三题？");
    }

    #[test]
    fn test_answer_without_options_keeps_block_open() {
        // 第一个 ANSWER 出现时还没有选项，被忽略；块继续累积后正常关闭
        let source = "题干？\nANSWER: A\nA) 甲\nANSWER: A";
        let questions = AikenParser::new().parse_str(source);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "题干？");
        assert_eq!(questions[0].answer(), 'A');
    }

    #[test]
    fn test_answer_before_any_text_ignored() {
        let source = "ANSWER: A\n\n题干？\nA) 甲\nANSWER: A";
        let questions = AikenParser::new().parse_str(source);
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_answer_with_trailing_text_is_question_text() {
        // "ANSWER: B 附注" 不满足答案行格式，并入题干
        let source = "题干？\nA) 甲\nB) 乙\nANSWER: B 附注\nANSWER: B";
        let questions = AikenParser::new().parse_str(source);
        assert_eq!(questions.len(), 1);
        assert!(questions[0].text().contains("ANSWER: B 附注"));
    }

    #[test]
    fn test_trailing_block_without_answer_discarded() {
        let source = "第一题？\nA) 甲\nANSWER: A\n\n残留题干\nA) 甲\nB) 乙\n";
        let questions = AikenParser::new().parse_str(source);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "第一题？");
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        assert!(AikenParser::new().parse_str("").is_empty());
        assert!(AikenParser::new().parse_str("\n\n\n").is_empty());
        assert!(AikenParser::new().parse_str("   \n\t\n").is_empty());
    }

    #[test]
    fn test_lines_trimmed_before_matching() {
        let source = "  题干？  \n  A) 甲  \n  B) 乙  \n  ANSWER: B  ";
        let questions = AikenParser::new().parse_str(source);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "题干？");
        assert_eq!(questions[0].options()[&'A'], "甲");
    }

    #[test]
    fn test_parse_file_not_found() {
        let err = AikenParser::new()
            .parse_file(Path::new("不存在的文件.txt"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotFound { .. }));
    }

    #[test]
    fn test_parse_file_latin1_fallback() {
        let temp = tempfile::TempDir::new().expect("创建临时目录失败");
        let path = temp.path().join("latin1.txt");
        // "Qu\xe9?" 不是合法 UTF-8，应按 latin-1 解码为 "Qué?"
        std::fs::write(&path, b"Qu\xe9?\nA) s\xed\nB) no\nANSWER: A\n").expect("写入失败");

        let questions = AikenParser::new().parse_file(&path).expect("解析失败");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "Qué?");
        assert_eq!(questions[0].options()[&'A'], "sí");
    }
}
