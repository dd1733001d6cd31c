//! One-shot warnings for deprecated template syntax.

use std::sync::atomic::{AtomicBool, Ordering};

static SEMICOLON_COMMENTS_WARNED: AtomicBool = AtomicBool::new(false);

/// Warns (once per process) that `;` comments are deprecated.
pub fn warn_semicolon_comments() {
    if !SEMICOLON_COMMENTS_WARNED.swap(true, Ordering::Relaxed) {
        log::warn!(
            "Comments starting with a semi-colon ';' are deprecated, \
             use double slashes '//' instead"
        );
    }
}
