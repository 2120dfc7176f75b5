//! 文本筛选 - 业务能力层
//!
//! 扩展名白名单和禁用词匹配，不涉及网络

use std::collections::HashSet;
use std::sync::LazyLock;

use phf::phf_set;
use regex::Regex;

/// 允许发布的图片格式
static ACCEPTABLE_EXTENSIONS: phf::Set<&'static str> = phf_set! {
    "jpeg",
    "jpg",
    "png",
};

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}']+").expect("word regex"));

/// 扩展名是否允许发布（忽略大小写和前导点）
pub fn is_acceptable_extension(extension: &str) -> bool {
    let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
    ACCEPTABLE_EXTENSIONS.contains(ext.as_str())
}

/// 禁用词表
///
/// 一次运行加载一次，运行期间只读。匹配忽略大小写。
/// 含连字符或空格的词条（如 `x-rated`）按连续的词匹配。
#[derive(Debug, Clone)]
pub struct Denylist {
    words: HashSet<String>,
    phrases: Vec<Vec<String>>,
}

impl Denylist {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut single = HashSet::new();
        let mut phrases = Vec::new();
        for word in words {
            let parts: Vec<String> = word
                .as_ref()
                .to_lowercase()
                .split(|c: char| c == '-' || c.is_whitespace())
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            match parts.len() {
                0 => {}
                1 => {
                    single.extend(parts);
                }
                _ => phrases.push(parts),
            }
        }
        Self {
            words: single,
            phrases,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.phrases.is_empty()
    }

    /// 在切分好的词序列中查找禁用词，返回命中的原文
    fn find_in<'t>(&self, tokens: impl Iterator<Item = &'t str>) -> Option<String> {
        let tokens: Vec<&str> = tokens.collect();
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        for (i, token) in lowered.iter().enumerate() {
            if self.words.contains(token) {
                return Some(tokens[i].to_string());
            }
            if let Some(phrase) = self.phrases.iter().find(|p| lowered[i..].starts_with(p.as_slice())) {
                return Some(tokens[i..i + phrase.len()].join("-"));
            }
        }
        None
    }

    /// 描述中是否含禁用词
    ///
    /// 连字符先替换为空格，再按空白切分
    pub fn matches_description(&self, description: &str) -> Option<String> {
        let normalized = description.replace('-', " ");
        self.find_in(normalized.split_whitespace())
    }

    /// OCR 识别出的文字中是否含禁用词
    ///
    /// 识别结果带有标点和换行，按字母数字连续段切分
    pub fn matches_recognized_text(&self, text: &str) -> Option<String> {
        self.find_in(WORD_RE.find_iter(text).map(|m| m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_case_insensitive() {
        assert!(is_acceptable_extension("jpeg"));
        assert!(is_acceptable_extension("PNG"));
        assert!(is_acceptable_extension(".jpg"));
        assert!(!is_acceptable_extension("gif"));
        assert!(!is_acceptable_extension(""));
    }

    #[test]
    fn hyphenated_description_is_split() {
        let denylist = Denylist::new(["nude"]);
        assert_eq!(denylist.matches_description("sunset-nude").as_deref(), Some("nude"));
        assert_eq!(denylist.matches_description("blue lake view"), None);
    }

    #[test]
    fn description_match_is_whole_word() {
        let denylist = Denylist::new(["war"]);
        assert_eq!(denylist.matches_description("warm forest"), None);
        assert_eq!(denylist.matches_description("War memorial").as_deref(), Some("War"));
    }

    #[test]
    fn recognized_text_ignores_punctuation() {
        let denylist = Denylist::new(["sale"]);
        assert_eq!(
            denylist.matches_recognized_text("BIG\nSALE! today").as_deref(),
            Some("SALE")
        );
        assert_eq!(denylist.matches_recognized_text("saleable"), None);
    }

    #[test]
    fn hyphenated_entry_matches_consecutive_words() {
        let denylist = Denylist::new(["x-rated"]);
        assert_eq!(
            denylist.matches_recognized_text("X-RATED content").as_deref(),
            Some("X-RATED")
        );
        assert_eq!(
            denylist.matches_description("x-rated-movie night").as_deref(),
            Some("x-rated")
        );
        assert_eq!(denylist.matches_recognized_text("rated x"), None);
        assert_eq!(denylist.matches_description("top rated"), None);
    }

    #[test]
    fn blank_entries_are_dropped() {
        let denylist = Denylist::new(["", "  ", "x"]);
        assert_eq!(denylist.len(), 1);
    }
}
