// src/watch/filter.rs

use std::path::Path;

/// Allowlist of path suffixes, e.g. `[".py", ".html"]`.
///
/// A path is relevant when its string form ends with one of the suffixes.
/// Matching is plain string suffix matching, so `"py"` also matches
/// `"happy"`; pass the dot when that matters. An empty list matches every
/// path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let suffixes = suffixes
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.is_empty())
            .collect();
        Self { suffixes }
    }

    /// Filter that accepts every path.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn matches_everything(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn matches(&self, path: &Path) -> bool {
        if self.suffixes.is_empty() {
            return true;
        }
        let path = path.to_string_lossy();
        self.suffixes.iter().any(|s| path.ends_with(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_listed_suffixes_only() {
        let filter = ExtensionFilter::new([".py", ".html"]);
        assert!(filter.matches(Path::new("src/app.py")));
        assert!(filter.matches(Path::new("/abs/templates/index.html")));
        assert!(!filter.matches(Path::new("src/app.pyc")));
        assert!(!filter.matches(Path::new("README.md")));
    }

    #[test]
    fn suffix_matching_is_not_extension_aware() {
        let filter = ExtensionFilter::new(["py"]);
        assert!(filter.matches(Path::new("notes/happy")));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ExtensionFilter::new(Vec::<String>::new());
        assert!(filter.matches_everything());
        assert!(filter.matches(Path::new("anything.at.all")));

        // Blank suffixes are dropped rather than matching everything by accident.
        let filter = ExtensionFilter::new(["", ".rs"]);
        assert_eq!(filter.suffixes(), [".rs".to_string()]);
        assert!(!filter.matches(Path::new("Cargo.toml")));
    }
}
