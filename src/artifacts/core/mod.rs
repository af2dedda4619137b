//! Error types and the pager sink
//!
//! - `errors`: user-facing aborts and internal invariant violations
//! - [`PagerWriter`]: output sink for `log` and `global-log` on a terminal

pub mod errors;

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Feeds everything written to it into a `minus` pager
///
/// The binary swaps this in for stdout and calls `minus::page_all` once the verb is done.
/// Commit messages are user text, so invalid UTF-8 is replaced rather than rejected.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pager
            .push_str(String::from_utf8_lossy(buf))
            .map_err(io::Error::other)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
