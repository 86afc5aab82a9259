use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Deserialize;
use std::collections::HashMap;

/// Commit returned by `GET /repos/{owner}/{repo}/commits/{ref}`.
#[derive(Debug, Deserialize)]
pub struct CommitJson {
    pub sha: String,
}

/// Tree returned by `GET /repos/{owner}/{repo}/git/trees/{sha}`.
#[derive(Debug, Deserialize)]
pub struct TreeJson {
    pub tree: Vec<TreeNodeJson>,
}

/// A single entry of a git tree listing.
#[derive(Debug, Deserialize)]
pub struct TreeNodeJson {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Available templates, keyed by lowercased name.
///
/// Values keep the casing used in the template repository, which is what the
/// raw download URL needs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Builds the catalog from a tree listing, keeping only blobs ending in `suffix`.
    ///
    /// When two paths collide case-insensitively the later one in the listing wins.
    pub fn from_tree(nodes: &[TreeNodeJson], suffix: &str) -> Self {
        let mut entries = HashMap::new();

        for node in nodes {
            if node.kind != "blob" {
                continue;
            }
            if let Some(name) = node.path.strip_suffix(suffix) {
                if name.is_empty() {
                    continue;
                }
                entries.insert(name.to_lowercase(), name.to_string());
            }
        }

        Self { entries }
    }

    /// Returns the canonical name for a user argument, ignoring case.
    pub fn resolve(&self, arg: &str) -> Option<&str> {
        self.entries.get(&arg.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical names, sorted case-insensitively.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.values().map(String::as_str).collect();
        names.sort_by_key(|name| name.to_lowercase());
        names
    }

    /// Best fuzzy match for a name that did not resolve.
    pub fn suggest(&self, key: &str) -> Option<&str> {
        let matcher = SkimMatcherV2::default();

        self.entries
            .iter()
            .filter_map(|(lower, canonical)| {
                matcher
                    .fuzzy_match(lower, key)
                    .map(|score| (score, canonical.as_str()))
            })
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)))
            .map(|(_, name)| name)
    }
}

impl FromIterator<(String, String)> for Catalog {
    /// Collects `(key, canonical)` pairs; keys are lowercased on the way in.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, name)| (key.to_lowercase(), name))
                .collect(),
        }
    }
}

/// Outcome of one spawned download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadResult {
    Downloaded { name: String, bytes: usize },
    Failed { arg: String, reason: String },
}

/// What a finished run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Successful template bodies, each followed by a newline, in completion order.
    pub merged: String,
    /// Number of templates that made it into `merged`.
    pub success_count: usize,
    /// Lowercased arguments with no catalog entry.
    pub missed: Vec<String>,
    /// Arguments that resolved but failed to download.
    pub failed: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(path: &str, kind: &str) -> TreeNodeJson {
        TreeNodeJson {
            path: path.to_string(),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn from_tree_keeps_only_gitignore_blobs() {
        let nodes = vec![
            node("Node.gitignore", "blob"),
            node("Python.gitignore", "blob"),
            node("Global", "tree"),
            node("README.md", "blob"),
            node("Weird.gitignore", "tree"),
        ];

        let catalog = Catalog::from_tree(&nodes, ".gitignore");

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve("node"), Some("Node"));
        assert_eq!(catalog.resolve("PYTHON"), Some("Python"));
        assert_eq!(catalog.resolve("readme"), None);
        assert_eq!(catalog.resolve("weird"), None);
    }

    #[test]
    fn from_tree_skips_bare_suffix() {
        let catalog = Catalog::from_tree(&[node(".gitignore", "blob")], ".gitignore");
        assert!(catalog.is_empty());
    }

    #[test]
    fn later_duplicate_wins() {
        let nodes = vec![node("Go.gitignore", "blob"), node("GO.gitignore", "blob")];

        let catalog = Catalog::from_tree(&nodes, ".gitignore");

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resolve("go"), Some("GO"));
    }

    #[test]
    fn tree_json_parses_github_shape() {
        let body = r#"{
            "sha": "abc",
            "url": "https://api.github.com/x",
            "tree": [
                {"path": "Rust.gitignore", "mode": "100644", "type": "blob",
                 "sha": "1", "size": 10, "url": "u"},
                {"path": "community", "mode": "040000", "type": "tree", "sha": "2", "url": "u"}
            ],
            "truncated": false
        }"#;

        let tree: TreeJson = serde_json::from_str(body).unwrap();
        let catalog = Catalog::from_tree(&tree.tree, ".gitignore");

        assert_eq!(catalog.names(), vec!["Rust"]);
    }

    #[test]
    fn names_are_sorted_ignoring_case() {
        let catalog: Catalog = vec![
            ("zig".to_string(), "Zig".to_string()),
            ("c".to_string(), "C".to_string()),
            ("actionscript".to_string(), "actionscript".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.names(), vec!["actionscript", "C", "Zig"]);
    }

    #[test]
    fn suggest_finds_close_name() {
        let catalog: Catalog = vec![
            ("python".to_string(), "Python".to_string()),
            ("node".to_string(), "Node".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.suggest("pythn"), Some("Python"));
        assert_eq!(catalog.suggest("qqqq"), None);
    }
}
