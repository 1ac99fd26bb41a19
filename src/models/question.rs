use std::collections::BTreeMap;

use crate::error::{ConvertError, Result};

/// 单道选择题记录
///
/// 字段全部私有，只能通过 [`Question::new`] 构造，
/// 构造成功即保证：题干非空、至少有一个选项、答案指向已有选项。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: BTreeMap<char, String>,
    answer: char,
}

impl Question {
    /// 构造并校验一道题目
    ///
    /// # 参数
    /// - `text`: 题干（首尾空白会被去掉）
    /// - `options`: 选项字母到选项文本的映射，字母必须是大写 A-Z
    /// - `answer`: 正确答案的选项字母
    ///
    /// # 返回
    /// 校验不通过时返回 [`ConvertError::MalformedQuestion`]
    pub fn new(
        text: impl Into<String>,
        options: BTreeMap<char, String>,
        answer: char,
    ) -> Result<Self> {
        let text = text.into();
        let text = text.trim().to_string();

        if text.is_empty() {
            return Err(ConvertError::malformed("题干不能为空"));
        }
        if options.is_empty() {
            return Err(ConvertError::malformed("题目至少需要一个选项"));
        }
        if let Some(bad) = options.keys().find(|c| !c.is_ascii_uppercase()) {
            return Err(ConvertError::malformed(format!("非法的选项字母: '{}'", bad)));
        }
        if !options.contains_key(&answer) {
            let letters = options
                .keys()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ConvertError::malformed(format!(
                "答案 '{}' 不在选项 [{}] 中",
                answer, letters
            )));
        }

        Ok(Self {
            text,
            options,
            answer,
        })
    }

    /// 题干文本
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 选项映射（按字母顺序迭代）
    pub fn options(&self) -> &BTreeMap<char, String> {
        &self.options
    }

    /// 正确答案的选项字母
    pub fn answer(&self) -> char {
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_options() -> BTreeMap<char, String> {
        let mut options = BTreeMap::new();
        options.insert('A', "选项一".to_string());
        options.insert('B', "选项二".to_string());
        options
    }

    #[test]
    fn test_new_valid_question() {
        let question = Question::new("题干？", two_options(), 'B').expect("应当构造成功");
        assert_eq!(question.text(), "题干？");
        assert_eq!(question.answer(), 'B');
        assert_eq!(question.options().len(), 2);
    }

    #[test]
    fn test_new_trims_text() {
        let question = Question::new("  题干？  ", two_options(), 'A').expect("应当构造成功");
        assert_eq!(question.text(), "题干？");
    }

    #[test]
    fn test_new_rejects_empty_text() {
        assert!(Question::new("", two_options(), 'A').is_err());
        assert!(Question::new("   \t ", two_options(), 'A').is_err());
    }

    #[test]
    fn test_new_rejects_empty_options() {
        let err = Question::new("题干？", BTreeMap::new(), 'A').unwrap_err();
        assert!(matches!(err, ConvertError::MalformedQuestion { .. }));
    }

    #[test]
    fn test_new_rejects_answer_not_in_options() {
        let err = Question::new("题干？", two_options(), 'C').unwrap_err();
        assert!(err.to_string().contains('C'));
    }

    #[test]
    fn test_new_rejects_lowercase_option_letter() {
        let mut options = two_options();
        options.insert('c', "小写字母".to_string());
        assert!(Question::new("题干？", options, 'A').is_err());
    }

    #[test]
    fn test_options_iterate_in_letter_order() {
        let mut options = BTreeMap::new();
        options.insert('C', "三".to_string());
        options.insert('A', "一".to_string());
        options.insert('B', "二".to_string());
        let question = Question::new("题干？", options, 'A').expect("应当构造成功");
        let letters: Vec<char> = question.options().keys().copied().collect();
        assert_eq!(letters, vec!['A', 'B', 'C']);
    }
}
