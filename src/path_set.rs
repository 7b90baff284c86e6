//! Optimized sets of path roots and glob patterns.
//!
//! A [`PathSet`] answers "is this path inside any of my roots" for a mix of
//! literal subtree roots and `glob:` patterns. Construction removes entries
//! made redundant by broader ones, so membership checks only consult the
//! minimal survivors. Small literal sets are reduced pairwise; larger ones
//! go through a segment tree so construction stays near-linear.

use std::collections::{BTreeSet, HashMap};

use glob::{MatchOptions, Pattern};

use crate::constants::{GLOB_PREFIX, PATH_SET_PAIRWISE_LIMIT};
use crate::error::PathSetError;

fn glob_options() -> MatchOptions {
    let mut options = MatchOptions::new();
    // `*` stays within one segment; `**` crosses segments.
    options.require_literal_separator = true;
    options
}

/// One path-set entry: a literal subtree root, or a compiled `glob:` pattern.
#[derive(Debug, Clone)]
pub struct PathEntry {
    raw: String,
    pattern: Option<Pattern>,
}

impl PathEntry {
    /// Parses an entry. Text starting with `glob:` is compiled as a glob
    /// pattern; anything else is a literal root.
    ///
    /// # Errors
    ///
    /// Returns [`PathSetError::InvalidPattern`] when a `glob:` entry fails
    /// to compile.
    pub fn new(text: &str) -> Result<Self, PathSetError> {
        let pattern = match text.strip_prefix(GLOB_PREFIX) {
            Some(body) => Some(Pattern::new(body).map_err(|e| PathSetError::InvalidPattern {
                pattern: text.to_string(),
                reason: e.to_string(),
            })?),
            None => None,
        };
        Ok(Self {
            raw: text.to_string(),
            pattern,
        })
    }

    /// The entry text as given, `glob:` marker included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The path or pattern body, `glob:` marker stripped.
    #[must_use]
    pub fn path(&self) -> &str {
        self.raw.strip_prefix(GLOB_PREFIX).unwrap_or(&self.raw)
    }

    /// True for `glob:` entries.
    #[must_use]
    pub fn is_pattern(&self) -> bool {
        self.pattern.is_some()
    }

    /// True when `candidate` is this root itself, inside this root's
    /// subtree, or matched by this pattern.
    #[must_use]
    pub fn covers(&self, candidate: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.matches_with(candidate, glob_options()),
            None => covers_literal(&self.raw, candidate),
        }
    }

    /// The longest literal path prefix of a pattern: the text before the
    /// first metacharacter, truncated to the last `/`. Literal entries
    /// return their whole path.
    #[must_use]
    pub fn static_prefix(&self) -> &str {
        if self.pattern.is_none() {
            return &self.raw;
        }
        let body = self.path();
        let head = match body.find(['*', '?', '[']) {
            Some(i) => &body[..i],
            None => body,
        };
        match head.rfind('/') {
            Some(0) => "/",
            Some(i) => &head[..i],
            None => "",
        }
    }
}

impl PartialEq for PathEntry {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathEntry {}

/// Subtree containment for literal roots. `/` covers every absolute path;
/// a trailing slash on the base is ignored.
fn covers_literal(base: &str, candidate: &str) -> bool {
    let base = if base.len() > 1 {
        base.trim_end_matches('/')
    } else {
        base
    };
    if base == "/" {
        return candidate.starts_with('/');
    }
    if base == candidate {
        return true;
    }
    candidate
        .strip_prefix(base)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Outcome of inserting a literal root into the segment tree.
enum InsertResult {
    /// An ancestor (or the node itself) already holds an entry.
    Redundant,
    /// Inserted; the listed descendant entries were pruned away.
    Inserted { pruned: Vec<usize> },
}

#[derive(Debug, Clone, Default)]
struct TreeNode {
    children: HashMap<String, usize>,
    entry: Option<usize>,
}

/// Trie keyed by path segments. Node 0 is the root (`/`). Each node holds
/// at most one entry index; an entry on a node makes every descendant
/// redundant.
#[derive(Debug, Clone)]
struct SegmentTree {
    nodes: Vec<TreeNode>,
}

impl SegmentTree {
    fn new() -> Self {
        Self {
            nodes: vec![TreeNode::default()],
        }
    }

    fn insert(&mut self, path: &str, entry: usize) -> InsertResult {
        let mut node = 0;
        for segment in segments(path) {
            if self.nodes[node].entry.is_some() {
                return InsertResult::Redundant;
            }
            node = match self.nodes[node].children.get(segment) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TreeNode::default());
                    self.nodes[node].children.insert(segment.to_string(), child);
                    child
                }
            };
        }
        if self.nodes[node].entry.is_some() {
            return InsertResult::Redundant;
        }
        // Claim this node, sweeping out any now-covered descendants.
        let mut pruned = Vec::new();
        let mut stack: Vec<usize> = self.nodes[node].children.values().copied().collect();
        while let Some(current) = stack.pop() {
            if let Some(covered) = self.nodes[current].entry.take() {
                pruned.push(covered);
            }
            stack.extend(self.nodes[current].children.values().copied());
        }
        self.nodes[node].entry = Some(entry);
        InsertResult::Inserted { pruned }
    }

    /// Finds the entry on the shallowest node covering `candidate`.
    fn find_cover(&self, candidate: &str) -> Option<usize> {
        let mut node = 0;
        if let Some(entry) = self.nodes[node].entry {
            return Some(entry);
        }
        for segment in segments(candidate) {
            node = *self.nodes[node].children.get(segment)?;
            if let Some(entry) = self.nodes[node].entry {
                return Some(entry);
            }
        }
        None
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// A reduced set of literal roots and glob patterns with subtree matching.
///
/// # Examples
///
/// ```
/// use resource_uri::PathSet;
///
/// let set = PathSet::from_paths(["/content", "/content/site", "glob:/var/*/cache"]).unwrap();
/// // `/content/site` is inside `/content` and was dropped.
/// assert_eq!(set.len(), 2);
/// assert!(set.matches("/content/site/page").is_some());
/// assert!(set.matches("/var/x/cache").is_some());
/// assert!(set.matches("/etc").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathSet {
    entries: Vec<PathEntry>,
    tree: SegmentTree,
    patterns: Vec<usize>,
}

impl PathSet {
    /// Builds a set from entry texts, dropping redundant entries.
    ///
    /// Literal roots covered by another literal root or by a pattern are
    /// removed. Patterns are only deduplicated textually; no containment
    /// analysis is attempted between patterns. Surviving entries keep their
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns [`PathSetError::InvalidPattern`] for an uncompilable `glob:`
    /// entry.
    pub fn from_paths<I, S>(paths: I) -> Result<Self, PathSetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = paths
            .into_iter()
            .map(|p| PathEntry::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::optimize(entries))
    }

    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::optimize(Vec::new())
    }

    fn optimize(candidates: Vec<PathEntry>) -> Self {
        let mut alive = vec![true; candidates.len()];

        // Textual pattern dedupe, first occurrence wins.
        let mut seen_patterns: Vec<&str> = Vec::new();
        for (i, entry) in candidates.iter().enumerate() {
            if entry.is_pattern() {
                if seen_patterns.contains(&entry.as_str()) {
                    alive[i] = false;
                } else {
                    seen_patterns.push(entry.as_str());
                }
            }
        }

        let literal_count = candidates.iter().filter(|e| !e.is_pattern()).count();
        if literal_count <= PATH_SET_PAIRWISE_LIMIT {
            // Small sets: direct pairwise elimination.
            for i in 0..candidates.len() {
                if !alive[i] || candidates[i].is_pattern() {
                    continue;
                }
                for j in 0..candidates.len() {
                    if i == j || !alive[j] || candidates[j].is_pattern() {
                        continue;
                    }
                    let j_covers_i = candidates[j].covers(candidates[i].path());
                    let i_covers_j = candidates[i].covers(candidates[j].path());
                    // Equal entries keep the earlier occurrence.
                    if j_covers_i && (!i_covers_j || j < i) {
                        alive[i] = false;
                        break;
                    }
                }
            }
        } else {
            let mut tree = SegmentTree::new();
            for (i, entry) in candidates.iter().enumerate() {
                if !alive[i] || entry.is_pattern() {
                    continue;
                }
                match tree.insert(entry.path(), i) {
                    InsertResult::Redundant => alive[i] = false,
                    InsertResult::Inserted { pruned } => {
                        for dead in pruned {
                            alive[dead] = false;
                        }
                    }
                }
            }
        }

        // Patterns evict the literals they cover.
        for (i, entry) in candidates.iter().enumerate() {
            if !alive[i] || entry.is_pattern() {
                continue;
            }
            let covered = candidates
                .iter()
                .enumerate()
                .any(|(j, other)| alive[j] && other.is_pattern() && other.covers(entry.path()));
            if covered {
                alive[i] = false;
            }
        }

        let entries: Vec<PathEntry> = candidates
            .into_iter()
            .zip(alive)
            .filter_map(|(entry, keep)| keep.then_some(entry))
            .collect();

        let mut tree = SegmentTree::new();
        let mut patterns = Vec::new();
        for (i, entry) in entries.iter().enumerate() {
            if entry.is_pattern() {
                patterns.push(i);
            } else {
                let inserted =
                    matches!(tree.insert(entry.path(), i), InsertResult::Inserted { pruned } if pruned.is_empty());
                debug_assert!(inserted, "survivors are pairwise non-covering");
            }
        }

        Self {
            entries,
            tree,
            patterns,
        }
    }

    /// Returns the first entry covering `candidate`, if any. Literal roots
    /// are consulted through the segment tree; patterns are tried in input
    /// order.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> Option<&PathEntry> {
        if let Some(i) = self.tree.find_cover(candidate) {
            return Some(&self.entries[i]);
        }
        self.patterns
            .iter()
            .map(|&i| &self.entries[i])
            .find(|entry| entry.covers(candidate))
    }

    /// The subset of entries lying inside the subtree rooted at `base`.
    ///
    /// A literal entry qualifies when `base` covers it; a pattern qualifies
    /// when `base` covers the pattern's static prefix.
    #[must_use]
    pub fn subset(&self, base: &str) -> Self {
        let kept = self
            .entries
            .iter()
            .filter(|entry| {
                let anchor = if entry.is_pattern() {
                    entry.static_prefix()
                } else {
                    entry.path()
                };
                covers_literal(base, anchor)
            })
            .cloned()
            .collect();
        Self::optimize(kept)
    }

    /// The subset of entries already covered by `other`.
    ///
    /// A literal entry qualifies when `other` matches its path. A pattern
    /// qualifies when `other` contains the identical pattern text, or a
    /// literal root of `other` covers the pattern's static prefix.
    #[must_use]
    pub fn subset_of(&self, other: &Self) -> Self {
        let kept = self
            .entries
            .iter()
            .filter(|entry| {
                if entry.is_pattern() {
                    other
                        .patterns
                        .iter()
                        .any(|&i| other.entries[i].as_str() == entry.as_str())
                        || other.tree.find_cover(entry.static_prefix()).is_some()
                } else {
                    other.matches(entry.path()).is_some()
                }
            })
            .cloned()
            .collect();
        Self::optimize(kept)
    }

    /// The surviving entry texts, sorted. Feeding these back through
    /// [`from_paths`](Self::from_paths) reproduces an equal set.
    #[must_use]
    pub fn to_string_set(&self) -> BTreeSet<String> {
        self.entries.iter().map(|e| e.raw.clone()).collect()
    }

    /// Iterates over surviving entries in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathEntry> {
        self.entries.iter()
    }

    /// Number of surviving entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries survived (or none were given).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PathSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Two sets are equal when they reduce to the same entry texts, regardless
/// of input order.
impl PartialEq for PathSet {
    fn eq(&self, other: &Self) -> bool {
        self.to_string_set() == other.to_string_set()
    }
}

impl Eq for PathSet {}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a PathEntry;
    type IntoIter = std::slice::Iter<'a, PathEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
