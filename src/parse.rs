use super::error::Result;
use super::group::{GroupBuilder, Groups};
use super::robots::Robots;
use futures_util::{
    io::{AsyncRead, BufReader},
    AsyncBufReadExt,
};
use serde_derive::{Deserialize, Serialize};

const BOM: &[u8] = b"\xef\xbb\xbf";
const NEWLINE: u8 = b'\n';

/// A compiler takes an input robots.txt file and outputs the compiled
/// `Robots` for a single user agent, which can then check any number of
/// paths without touching the file again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compiler {
    user_agent: String,
}

impl Compiler {
    /// Build a new compiler that selects rules for the given user agent
    /// from a robots.txt file.
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_lowercase(),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Read a robots.txt file from `file` and compile it. The only failure
    /// is the reader itself failing; malformed content never is one.
    pub async fn compile<R: AsyncRead + Unpin>(&self, file: R) -> Result<Robots> {
        let mut reader = BufReader::new(file);
        let mut builder = GroupBuilder::new();
        let mut buf = Vec::new();
        let mut first = true;

        while reader.read_until(NEWLINE, &mut buf).await? != 0 {
            let mut line = &buf[..];
            if first {
                // Skip a UTF-8 byte order mark, just like Google does.
                if line.starts_with(BOM) {
                    line = &line[BOM.len()..];
                }
                first = false;
            }
            builder.push_line(&String::from_utf8_lossy(trim_newline(line)));
            buf.clear();
        }

        Ok(self.select(builder.finish()))
    }

    /// Compile a robots.txt file that is already in memory.
    pub fn compile_str(&self, text: &str) -> Robots {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        self.compile_lines(text.lines())
    }

    /// Compile a robots.txt file given as a sequence of lines.
    pub fn compile_lines<I, S>(&self, lines: I) -> Robots
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.select(Groups::parse(lines))
    }

    fn select(&self, groups: Groups) -> Robots {
        match groups.find(&self.user_agent) {
            Some(group) => {
                let robots = Robots::from_group(group);
                log::debug!(
                    "selected group {:?} for {:?} with {} rules",
                    group.user_agents(),
                    self.user_agent,
                    robots.rules().len()
                );
                robots
            }
            None => {
                log::debug!(
                    "no group in {} matches {:?}",
                    groups.len(),
                    self.user_agent
                );
                Robots::default()
            }
        }
    }
}

fn trim_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
