use std::time::Duration;

use serde_derive::{Deserialize, Serialize};

use super::group::Group;
use super::parse::Compiler;
use super::rule::{Rule, RuleKind};

/// The rules of a robots.txt file that apply to one user agent. Paths are
/// checked against every rule and the most specific match decides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Robots {
    rules: Vec<Rule>,
    crawl_delay: Duration,
}

impl Robots {
    /// Parse a robots.txt file and keep only the rules relevant to
    /// `user_agent`. Malformed input yields fewer rules, never an error.
    pub fn new(text: &str, user_agent: &str) -> Self {
        Compiler::new(user_agent).compile_str(text)
    }

    /// Compile the rules of a selected group. Allow rules go first so they
    /// win ties against equally specific disallow rules.
    pub fn from_group(group: &Group) -> Self {
        let mut robots = Self::default();
        for value in group.allow() {
            robots.add(Rule::new(RuleKind::Allow, value));
        }
        for value in group.disallow() {
            robots.add(Rule::new(RuleKind::Disallow, value));
        }
        if let Some(delay) = group.crawl_delay() {
            match delay.parse::<u64>() {
                Ok(secs) => robots.crawl_delay = Duration::from_secs(secs),
                Err(e) => log::debug!("ignoring crawl-delay {:?}: {}", delay, e),
            }
        }
        robots
    }

    fn add(&mut self, rule: Rule) {
        if rule.weight() > 0 {
            self.rules.push(rule);
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Zero when the file set no delay or the value was not a whole number
    /// of seconds.
    pub fn crawl_delay(&self) -> Duration {
        self.crawl_delay
    }

    /// Whether the rules allow crawling `path`.
    pub fn allow<T: AsRef<str>>(&self, path: T) -> bool {
        let path = path.as_ref();
        let mut found: Option<&Rule> = None;
        for rule in self.rules.iter().filter(|rule| rule.matches(path)) {
            match found {
                Some(best) if best.weight() >= rule.weight() => {}
                _ => found = Some(rule),
            }
        }
        found.map_or(true, |rule| rule.kind() == RuleKind::Allow)
    }
}
