const SEPARATOR: char = ':';
const COMMENT: char = '#';

/// The directives a group is built from. Everything else found in a
/// robots.txt file (sitemaps, hosts, typos) is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    UserAgent,
    Allow,
    Disallow,
    CrawlDelay,
}

/// A single `field: value` line of a robots.txt file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    field: String,
    value: &'a str,
}

impl<'a> Record<'a> {
    /// Split a line into its field and value. Lines without a `:` carry
    /// no record at all and yield `None`.
    pub fn parse(line: &'a str) -> Option<Self> {
        let pos = line.find(SEPARATOR)?;
        Some(Self {
            field: clean_field(&line[..pos]),
            value: clean_value(&line[pos + 1..]),
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &'a str {
        self.value
    }

    pub fn directive(&self) -> Option<Directive> {
        match &self.field[..] {
            "user-agent" | "useragent" => Some(Directive::UserAgent),
            "allow" => Some(Directive::Allow),
            "disallow" => Some(Directive::Disallow),
            "crawl-delay" | "crawldelay" => Some(Directive::CrawlDelay),
            _ => None,
        }
    }
}

fn clean_field(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

fn clean_value(text: &str) -> &str {
    match text.find(COMMENT) {
        Some(pos) => text[..pos].trim(),
        None => text.trim(),
    }
}
