//! Conflict-marker files
//!
//! ```text
//! <<<<<<< HEAD
//! <current content>
//! =======
//! <given content>
//! >>>>>>>
//! ```
//!
//! An absent side contributes nothing. Content that does not end in a line terminator
//! gets one, so the markers always start their own lines.

use bytes::Bytes;

const CURRENT_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const SEPARATOR_MARKER: &[u8] = b"=======\n";
const GIVEN_MARKER: &[u8] = b">>>>>>>\n";

pub fn conflict_content(current: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let mut content = Vec::new();

    content.extend_from_slice(CURRENT_MARKER);
    push_side(&mut content, current);
    content.extend_from_slice(SEPARATOR_MARKER);
    push_side(&mut content, given);
    content.extend_from_slice(GIVEN_MARKER);

    Bytes::from(content)
}

fn push_side(content: &mut Vec<u8>, side: Option<&[u8]>) {
    let side = side.unwrap_or_default();
    content.extend_from_slice(side);

    if !side.is_empty() && !side.ends_with(b"\n") {
        content.push(b'\n');
    }
}
