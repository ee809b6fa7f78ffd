//! An interpreter for robots.txt files.
//!
//! A [`Compiler`] reads a robots.txt file, picks the group of rules whose
//! user agent most specifically matches the crawler, and compiles those
//! rules into a [`Robots`] that answers whether a path may be crawled:
//!
//! ```
//! use roborule::Compiler;
//!
//! let robots = Compiler::new("Googlebot-Image").compile_str(
//!     "User-agent: googlebot\nDisallow: /*.gif$\n\nUser-agent: *\nDisallow: /\n",
//! );
//! assert!(robots.allow("/index.html"));
//! assert!(!robots.allow("/images/cat.gif"));
//! ```
//!
//! Malformed files are never an error: lines that cannot be understood are
//! skipped.

mod error;
mod group;
mod parse;
mod record;
mod robots;
mod rule;

pub use error::{Error, Result};
pub use group::{Group, GroupBuilder, Groups};
pub use parse::Compiler;
pub use record::{Directive, Record};
pub use robots::Robots;
pub use rule::{Matcher, Rule, RuleKind};
