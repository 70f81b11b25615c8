//! Client-side search index
//!
//! Maps tags and spec headings to the spec pages containing them. Written
//! to `js/search_index.js` as `var index = {"Tags":{..},"Specs":{..}};`.
//! Keys keep first-seen order so the file is byte-stable across runs.

use crate::{ReportError, SuiteResult};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

const PREFIX: &str = "var index = ";

/// Key -> page list map preserving insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedIndex(Vec<(String, Vec<String>)>);

impl OrderedIndex {
    /// Add `page` under `key` unless it is already listed there
    pub fn add(&mut self, key: &str, page: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, pages)) => {
                if !pages.iter().any(|p| p == page) {
                    pages.push(page.to_string());
                }
            }
            None => self.0.push((key.to_string(), vec![page.to_string()])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, pages)| pages.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for OrderedIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, pages) in &self.0 {
            map.serialize_entry(key, pages)?;
        }
        map.end()
    }
}

struct OrderedIndexVisitor;

impl<'de> Visitor<'de> for OrderedIndexVisitor {
    type Value = OrderedIndex;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map of names to page lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, pages)) = access.next_entry::<String, Vec<String>>()? {
            entries.push((key, pages));
        }
        Ok(OrderedIndex(entries))
    }
}

impl<'de> Deserialize<'de> for OrderedIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedIndexVisitor)
    }
}

/// Tags and spec headings indexed against spec page names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    #[serde(rename = "Tags")]
    pub tags: OrderedIndex,
    #[serde(rename = "Specs")]
    pub specs: OrderedIndex,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every spec of a suite: its heading plus spec and scenario tags
    pub fn build(suite: &SuiteResult) -> Self {
        let mut index = Self::new();
        for result in &suite.spec_results {
            let page = result.report_file.as_str();
            for tag in &result.tags {
                index.tags.add(tag, page);
            }
            for scenario in &result.spec.scenarios {
                for tag in &scenario.tags {
                    index.tags.add(tag, page);
                }
            }
            index.specs.add(&result.heading, page);
        }
        index
    }

    /// Contents of `search_index.js`
    pub fn to_script(&self) -> Result<String, ReportError> {
        Ok(format!("{PREFIX}{};", serde_json::to_string(self)?))
    }

    /// Read back the contents of `search_index.js`
    pub fn from_script(script: &str) -> Result<Self, ReportError> {
        let json = script
            .trim()
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.strip_suffix(';'))
            .unwrap_or(script);
        Ok(serde_json::from_str(json)?)
    }

    /// Write `<dir>/js/search_index.js`, creating `js/` if needed
    pub fn write(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let js_dir = dir.join("js");
        std::fs::create_dir_all(&js_dir)
            .map_err(|e| ReportError::io("Failed to create directory", &js_dir, e))?;
        let path = js_dir.join("search_index.js");
        std::fs::write(&path, self.to_script()?)
            .map_err(|e| ReportError::io("Failed to write", &path, e))?;
        tracing::debug!(
            "Wrote search index with {} tags and {} specs to {}",
            self.tags.len(),
            self.specs.len(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scenario, Spec, SpecResult};
    use tempfile::TempDir;

    fn spec(heading: &str, page: &str, tags: &[&str], scenario_tags: &[&str]) -> SpecResult {
        SpecResult {
            heading: heading.into(),
            report_file: page.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            spec: Spec {
                scenarios: vec![Scenario {
                    tags: scenario_tags.iter().map(|t| t.to_string()).collect(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn suite() -> SuiteResult {
        SuiteResult {
            spec_results: vec![
                spec("Login", "login.html", &["smoke", "auth"], &["auth", "slow"]),
                spec("Search", "search/basic.html", &["smoke"], &[]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn build_collects_tags_and_headings() {
        let index = SearchIndex::build(&suite());
        assert_eq!(index.tags.keys().collect::<Vec<_>>(), vec!["smoke", "auth", "slow"]);
        assert_eq!(
            index.tags.get("smoke").unwrap(),
            &["login.html".to_string(), "search/basic.html".to_string()]
        );
        assert_eq!(index.tags.get("auth").unwrap(), &["login.html".to_string()]);
        assert_eq!(index.specs.get("Search").unwrap(), &["search/basic.html".to_string()]);
    }

    #[test]
    fn add_is_idempotent() {
        let mut index = OrderedIndex::default();
        index.add("tag", "a.html");
        index.add("tag", "a.html");
        assert_eq!(index.get("tag").unwrap(), &["a.html".to_string()]);
    }

    #[test]
    fn script_keeps_insertion_order() {
        let mut index = SearchIndex::new();
        index.tags.add("zeta", "z.html");
        index.tags.add("alpha", "a.html");
        index.specs.add("Spec", "z.html");
        assert_eq!(
            index.to_script().unwrap(),
            r#"var index = {"Tags":{"zeta":["z.html"],"alpha":["a.html"]},"Specs":{"Spec":["z.html"]}};"#
        );
    }

    #[test]
    fn empty_index_script() {
        assert_eq!(
            SearchIndex::new().to_script().unwrap(),
            r#"var index = {"Tags":{},"Specs":{}};"#
        );
    }

    #[test]
    fn write_then_read_back() {
        let dir = TempDir::new().unwrap();
        let index = SearchIndex::build(&suite());
        let path = index.write(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("js").join("search_index.js"));

        let script = std::fs::read_to_string(path).unwrap();
        assert_eq!(SearchIndex::from_script(&script).unwrap(), index);
    }

    #[test]
    fn write_fails_when_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("js");
        std::fs::write(&blocker, "not a directory").unwrap();
        let err = SearchIndex::new().write(dir.path()).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }

    mod proptest_tests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn pages_per_key_are_unique(
                pairs in prop::collection::vec(("[a-c]{1,2}", "[x-z]\\.html"), 0..40)
            ) {
                let mut index = OrderedIndex::default();
                for (key, page) in &pairs {
                    index.add(key, page);
                }
                for key in index.keys() {
                    let pages = index.get(key).unwrap();
                    let mut deduped = pages.to_vec();
                    deduped.dedup();
                    deduped.sort();
                    deduped.dedup();
                    prop_assert_eq!(deduped.len(), pages.len());
                }
            }

            #[test]
            fn script_round_trips(
                pairs in prop::collection::vec(("\\PC{1,8}", "[a-z/]{1,10}\\.html"), 0..20)
            ) {
                let mut index = SearchIndex::new();
                for (key, page) in &pairs {
                    index.tags.add(key, page);
                    index.specs.add(page, key);
                }
                let script = index.to_script().unwrap();
                prop_assert_eq!(SearchIndex::from_script(&script).unwrap(), index);
            }
        }
    }
}
