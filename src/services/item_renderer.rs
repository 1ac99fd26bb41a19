//! QTI 2.1 题目渲染服务 - 业务能力层
//!
//! 只负责"单个 Question → assessmentItem XML"能力。
//! 对已校验的题目渲染不会失败；选项标识符带随机后缀，
//! 只保证同一文档内不冲突，不保证跨运行稳定。

use std::collections::BTreeMap;
use std::fmt::Write;

use uuid::Uuid;

use crate::config::Config;
use crate::models::Question;
use crate::utils::logging::truncate_text;

/// QTI 2.1 命名空间
const QTI_NS: &str = "http://www.imsglobal.org/xsd/imsqti_v2p1";
/// 标准 match_correct 响应处理模板
const MATCH_CORRECT_TEMPLATE: &str =
    "http://www.imsglobal.org/question/qti_v2p1/rptemplates/match_correct";
/// 标题为空时的占位符
const FALLBACK_TITLE: &str = "未命名题目";

/// assessmentItem 渲染器
///
/// 职责：
/// - 生成单道题目的 QTI 2.1 XML
/// - 从题干派生 XML 安全的标题
/// - 为选项生成文档内唯一的标识符
pub struct ItemRenderer {
    title_max_length: usize,
}

impl ItemRenderer {
    /// 创建渲染器
    pub fn new(config: &Config) -> Self {
        Self {
            title_max_length: config.title_max_length,
        }
    }

    /// 渲染一道题目为 assessmentItem XML
    ///
    /// # 参数
    /// - `question`: 已校验的题目
    /// - `item_id`: 题目标识符（需与清单中的登记一致）
    ///
    /// # 返回
    /// 返回完整的 XML 文本，UTF-8 编码，两空格缩进
    pub fn render(&self, question: &Question, item_id: &str) -> String {
        let choice_ids: BTreeMap<char, String> = question
            .options()
            .keys()
            .map(|&letter| (letter, synthetic_choice_id(letter)))
            .collect();

        let mut xml = String::new();
        let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(xml, r#"<assessmentItem xmlns="{QTI_NS}""#);
        let _ = writeln!(
            xml,
            r#"                xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#
        );
        let _ = writeln!(
            xml,
            r#"                xsi:schemaLocation="{QTI_NS} {QTI_NS}.xsd""#
        );
        let _ = writeln!(
            xml,
            r#"                identifier="{}" title="{}" adaptive="false" timeDependent="false">"#,
            xml_escape(item_id),
            self.safe_title(question.text())
        );

        // 响应声明：正确答案指向对应选项的标识符
        let _ = writeln!(
            xml,
            r#"  <responseDeclaration identifier="RESPONSE" cardinality="single" baseType="identifier">"#
        );
        let _ = writeln!(xml, r#"    <correctResponse>"#);
        let _ = writeln!(
            xml,
            r#"      <value>{}</value>"#,
            choice_ids[&question.answer()]
        );
        let _ = writeln!(xml, r#"    </correctResponse>"#);
        let _ = writeln!(xml, r#"  </responseDeclaration>"#);

        // 成绩声明
        let _ = writeln!(
            xml,
            r#"  <outcomeDeclaration identifier="SCORE" cardinality="single" baseType="float">"#
        );
        let _ = writeln!(xml, r#"    <defaultValue>"#);
        let _ = writeln!(xml, r#"      <value>0</value>"#);
        let _ = writeln!(xml, r#"    </defaultValue>"#);
        let _ = writeln!(xml, r#"  </outcomeDeclaration>"#);

        // 题干与选项交互
        let _ = writeln!(xml, r#"  <itemBody>"#);
        let _ = writeln!(xml, r#"    <div>"#);
        let _ = writeln!(xml, r#"      <p>{}</p>"#, xml_escape(question.text()));
        let _ = writeln!(xml, r#"    </div>"#);
        let _ = writeln!(
            xml,
            r#"    <choiceInteraction responseIdentifier="RESPONSE" shuffle="true" maxChoices="1">"#
        );
        let _ = writeln!(xml, r#"      <prompt>请选择正确答案：</prompt>"#);
        for (letter, text) in question.options() {
            let _ = writeln!(
                xml,
                r#"      <simpleChoice identifier="{}">{}</simpleChoice>"#,
                choice_ids[letter],
                xml_escape(text)
            );
        }
        let _ = writeln!(xml, r#"    </choiceInteraction>"#);
        let _ = writeln!(xml, r#"  </itemBody>"#);

        // 响应处理直接引用标准模板，不写自定义规则
        let _ = writeln!(
            xml,
            r#"  <responseProcessing template="{MATCH_CORRECT_TEMPLATE}" />"#
        );
        let _ = writeln!(xml, r#"</assessmentItem>"#);
        xml
    }

    /// 从题干派生 XML 安全的标题
    ///
    /// 去掉 `<>&"` 四个字符，超长时按字符截断并追加 `...`，
    /// 结果为空时退回固定占位符。
    fn safe_title(&self, text: &str) -> String {
        let stripped: String = text
            .chars()
            .filter(|c| !matches!(c, '<' | '>' | '&' | '"'))
            .collect();
        let title = truncate_text(stripped.trim(), self.title_max_length);
        if title.is_empty() {
            FALLBACK_TITLE.to_string()
        } else {
            title
        }
    }
}

impl Default for ItemRenderer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// 生成选项标识符：`Choice_<字母>_<8 位十六进制后缀>`
fn synthetic_choice_id(letter: char) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("Choice_{}_{}", letter, &suffix[..8])
}

/// 转义 XML 文本与属性值
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
