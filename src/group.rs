use super::record::{Directive, Record};

const WILDCARD: &str = "*";

/// A group of user agents sharing the same set of rules. Groups only
/// exist while a robots.txt file is parsed; the selected one is compiled
/// into a `Robots`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    user_agents: Vec<String>,
    allow: Vec<String>,
    disallow: Vec<String>,
    crawl_delay: Option<String>,
}

impl Group {
    pub fn user_agents(&self) -> &[String] {
        &self.user_agents
    }

    pub fn allow(&self) -> &[String] {
        &self.allow
    }

    pub fn disallow(&self) -> &[String] {
        &self.disallow
    }

    pub fn crawl_delay(&self) -> Option<&str> {
        self.crawl_delay.as_deref().filter(|delay| !delay.is_empty())
    }

    /// True if the group holds at least one allow, disallow or crawl-delay
    /// record.
    pub fn has_members(&self) -> bool {
        !self.allow.is_empty() || !self.disallow.is_empty() || self.crawl_delay().is_some()
    }

    pub fn has_user_agents(&self) -> bool {
        !self.user_agents.is_empty()
    }

    /// Match the group against a lower-cased crawler name. Returns the
    /// length of the longest user agent that is a prefix of `name`, or zero
    /// if only the wildcard matched.
    pub fn matches(&self, name: &str) -> Option<usize> {
        self.user_agents
            .iter()
            .filter_map(|agent| {
                if name.starts_with(&agent[..]) {
                    Some(agent.len())
                } else if agent == WILDCARD {
                    // The wildcard is the weakest possible match.
                    Some(0)
                } else {
                    None
                }
            })
            .max()
    }

    fn add_user_agent(&mut self, value: &str) {
        // Trailing wildcards are implied by prefix matching.
        let agent = if value == WILDCARD {
            value.to_string()
        } else {
            value.trim_end_matches('*').to_lowercase()
        };
        self.user_agents.push(agent);
    }
}

/// Accumulates records into groups. The active group receives records
/// until a user-agent line follows its members, at which point it is
/// flushed to the output.
#[derive(Debug, Default)]
pub struct GroupBuilder {
    active: Group,
    groups: Vec<Group>,
}

impl GroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw line to the builder.
    pub fn push_line(&mut self, line: &str) {
        match Record::parse(line) {
            Some(record) => self.push(&record),
            None => log::trace!("ignoring line without field: {:?}", line),
        }
    }

    pub fn push(&mut self, record: &Record) {
        let value = record.value();
        match record.directive() {
            Some(Directive::UserAgent) => {
                if self.active.has_members() {
                    self.flush();
                }
                self.active.add_user_agent(value);
            }
            Some(Directive::Allow) => self.active.allow.push(value.to_string()),
            Some(Directive::Disallow) => self.active.disallow.push(value.to_string()),
            Some(Directive::CrawlDelay) => self.active.crawl_delay = Some(value.to_string()),
            None => log::trace!("ignoring unknown field {:?}", record.field()),
        }
    }

    pub fn finish(mut self) -> Groups {
        self.flush();
        Groups(self.groups)
    }

    fn flush(&mut self) {
        let group = std::mem::take(&mut self.active);
        if group.has_members() && group.has_user_agents() {
            self.groups.push(group);
        }
    }
}

/// All groups found in a robots.txt file, in the order they appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Groups(Vec<Group>);

impl Groups {
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GroupBuilder::new();
        for line in lines {
            builder.push_line(line.as_ref());
        }
        builder.finish()
    }

    /// Find the group with the most specific user agent matching `name`.
    /// Among equally specific groups the first one wins.
    pub fn find(&self, name: &str) -> Option<&Group> {
        let name = name.to_lowercase();
        let mut result: Option<(&Group, usize)> = None;
        for group in &self.0 {
            if let Some(length) = group.matches(&name) {
                match result {
                    Some((_, longest)) if longest >= length => {}
                    _ => result = Some((group, length)),
                }
            }
        }
        result.map(|(group, _)| group)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Groups {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Groups {
        Groups::parse(text.lines())
    }

    #[test]
    fn test_multiple_agents_share_group() {
        let groups = parse(
            r#"
            User-agent: jones
            User-agent: FooBar*
            Disallow: /
            Allow: /public
            Crawl-delay: 5
            "#,
        );

        assert_eq!(groups.len(), 1);
        let group = groups.iter().next().unwrap();
        assert_eq!(group.user_agents(), &["jones", "foobar"]);
        assert_eq!(group.disallow(), &["/"]);
        assert_eq!(group.allow(), &["/public"]);
        assert_eq!(group.crawl_delay(), Some("5"));
    }

    #[test]
    fn test_user_agent_after_members_starts_group() {
        let groups = parse(
            r#"
            User-agent: a
            Disallow: /a
            User-agent: b
            Disallow: /b
            "#,
        );

        let agents: Vec<_> = groups.iter().map(|g| g.user_agents().to_vec()).collect();
        assert_eq!(agents, vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_group_without_user_agent_is_dropped() {
        let groups = parse(
            r#"
            Disallow: /
            User-agent: jones
            Allow: /
            "#,
        );

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.iter().next().unwrap().user_agents(), &["jones"]);
    }

    #[test]
    fn test_group_without_members_is_dropped() {
        let groups = parse(
            r#"
            User-agent: jones
            Disallow: /
            User-agent: imabot
            "#,
        );

        assert_eq!(groups.len(), 1);
        assert!(parse("User-agent: *").is_empty());
    }

    #[test]
    fn test_last_crawl_delay_wins() {
        let groups = parse("User-agent: *\nCrawl-delay: 1\ncrawldelay: 7\n");
        assert_eq!(groups.iter().next().unwrap().crawl_delay(), Some("7"));
    }

    #[test]
    fn test_empty_crawl_delay_is_not_a_member() {
        assert!(parse("User-agent: *\nCrawl-delay:\n").is_empty());
    }

    #[test]
    fn test_wildcard_agent_is_kept() {
        let groups = parse("User-agent: *\nUser-agent: **\nDisallow: /\n");
        assert_eq!(groups.iter().next().unwrap().user_agents(), &["*", ""]);
    }

    #[test]
    fn test_matches_prefers_named_agent() {
        let groups = parse("User-agent: Googlebot\nUser-agent: *\nDisallow: /\n");
        let group = groups.iter().next().unwrap();

        assert_eq!(group.matches("googlebot-image"), Some(9));
        assert_eq!(group.matches("bingbot"), Some(0));
    }

    #[test]
    fn test_matches_nothing() {
        let groups = parse("User-agent: fake bot\nDisallow: /\n");
        let group = groups.iter().next().unwrap();

        assert_eq!(group.matches("fake"), None);
        assert_eq!(group.matches("bot"), None);
        assert_eq!(group.matches("fake bot"), Some(8));
    }

    #[test]
    fn test_find_most_specific() {
        let groups = parse(
            r#"
            User-agent: *
            Disallow: /star

            User-agent: google
            Disallow: /google

            User-agent: googlebot
            Disallow: /googlebot

            User-agent: googlebot
            Disallow: /second
            "#,
        );

        let found = |name| groups.find(name).map(|g| g.disallow()[0].clone());
        assert_eq!(found("Googlebot-News"), Some("/googlebot".to_string()));
        assert_eq!(found("GoogleOther"), Some("/google".to_string()));
        assert_eq!(found("bingbot"), Some("/star".to_string()));
    }

    #[test]
    fn test_find_no_group() {
        let groups = parse("User-agent: noBot\nDisallow: /no\n");
        assert_eq!(groups.find("fakeBot"), None);
    }
}
