//! 标签集合
//!
//! 保持插入顺序，添加时去除首尾空白并做成员检查，保证没有重复项。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// 添加标签
    ///
    /// 返回是否真正插入。空白标签和已存在的标签都是 no-op。
    pub fn add(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// multipart 中 `tags` 字段的内容：JSON 数组字符串
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        let mut set = TagSet::new();
        for tag in &tags {
            set.add(tag);
        }
        set
    }
}

impl From<&[String]> for TagSet {
    fn from(tags: &[String]) -> Self {
        let mut set = TagSet::new();
        for tag in tags {
            set.add(tag);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_same_trimmed_tag_twice_keeps_one() {
        let mut tags = TagSet::new();
        assert!(tags.add("suv"));
        assert!(!tags.add("  suv  "));
        assert!(!tags.add("suv"));
        assert_eq!(tags.as_slice(), &["suv".to_string()]);
    }

    #[test]
    fn test_blank_tags_are_ignored() {
        let mut tags = TagSet::new();
        assert!(!tags.add(""));
        assert!(!tags.add("   "));
        assert!(!tags.add("\t\n"));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_tags_are_case_sensitive_and_ordered() {
        let mut tags = TagSet::new();
        tags.add("Red");
        tags.add("red");
        tags.add("coupe");
        let collected: Vec<_> = tags.iter().collect();
        assert_eq!(collected, vec!["Red", "red", "coupe"]);
    }

    #[test]
    fn test_remove() {
        let mut tags = TagSet::from(vec!["a".to_string(), "b".to_string()]);
        assert!(tags.remove("a"));
        assert!(!tags.remove("a"));
        assert_eq!(tags.as_slice(), &["b".to_string()]);
    }

    #[test]
    fn test_from_vec_drops_duplicates_and_blanks() {
        let tags = TagSet::from(vec![
            "a".to_string(),
            " a ".to_string(),
            "".to_string(),
            "b".to_string(),
        ]);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_to_json() {
        let mut tags = TagSet::new();
        assert_eq!(tags.to_json(), "[]");
        tags.add("4x4");
        tags.add("say \"hi\"");
        assert_eq!(tags.to_json(), r#"["4x4","say \"hi\""]"#);
    }
}
