use serde_derive::{Deserialize, Serialize};

const WILDCARD: char = '*';
const EOW: char = '$';
const ROOT: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    Allow,
    Disallow,
}

/// How a compiled rule recognizes a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Matcher {
    /// The pattern had no wildcard but ended in `$`, so it only matches
    /// the exact path.
    Equals(String),
    /// The path must start with `prefix`, end with `suffix`, and contain
    /// every needle in order somewhere in between.
    Bounded {
        prefix: Option<String>,
        suffix: Option<String>,
        needles: Vec<String>,
    },
}

/// A compiled allow or disallow record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    kind: RuleKind,
    weight: usize,
    matcher: Matcher,
}

impl Rule {
    /// Compile a path pattern such as `/fish*.php$`.
    pub fn new(kind: RuleKind, pattern: &str) -> Self {
        // "/foo*bar/" becomes ["/foo", "bar/"]. An empty first part means
        // the pattern starts with a wildcard and has no prefix.
        let mut parts: Vec<String> = pattern.split(WILDCARD).map(String::from).collect();
        let last = parts.len() - 1;
        let has_prefix = !parts[0].is_empty();
        let has_suffix = parts[last].ends_with(EOW);

        // Relative patterns are treated as rooted at "/".
        if has_prefix && !parts[0].starts_with(ROOT) {
            parts[0].insert(0, ROOT);
        }
        if has_suffix {
            parts[last].pop();
        }

        let matcher = if has_prefix && has_suffix && last == 0 {
            Matcher::Equals(parts.remove(0))
        } else {
            let suffix = if has_suffix { parts.pop() } else { None };
            let prefix = if has_prefix { Some(parts.remove(0)) } else { None };
            Matcher::Bounded {
                prefix,
                suffix,
                needles: parts.into_iter().filter(|n| !n.is_empty()).collect(),
            }
        };

        Self {
            kind,
            weight: pattern.len(),
            matcher,
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// The length of the uncompiled pattern. Longer patterns are more
    /// specific and take precedence.
    pub fn weight(&self) -> usize {
        self.weight
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn matches(&self, path: &str) -> bool {
        if self.weight == 0 {
            return false;
        }

        match &self.matcher {
            Matcher::Equals(exact) => path == exact,
            Matcher::Bounded {
                prefix,
                suffix,
                needles,
            } => {
                let prefix = prefix.as_deref().unwrap_or("");
                let suffix = suffix.as_deref().unwrap_or("");
                if !path.starts_with(prefix) || !path.ends_with(suffix) {
                    return false;
                }
                if needles.is_empty() {
                    return true;
                }
                // Needles are searched between prefix and suffix only, so
                // they cannot match inside either of them.
                if prefix.len() + suffix.len() > path.len() {
                    return false;
                }
                let mut rest = &path[prefix.len()..path.len() - suffix.len()];
                for needle in needles {
                    match rest.find(&needle[..]) {
                        Some(pos) => rest = &rest[pos + needle.len()..],
                        None => return false,
                    }
                }
                true
            }
        }
    }
}
