//! Branch names
//!
//! Branch names follow git's ref-name rules, including `/`-separated hierarchies such as
//! `origin/master` (the names `fetch` creates).

pub mod branch_name;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Directory of branch refs, relative to the metadata directory
pub const HEADS_PREFIX: &str = "refs/heads/";
