//! Theme assets for Stylist.
//!
//! The stylesheet and navigation script under `theme/` are compiled into the
//! binary with `rust-embed`, so a built site never depends on files next to
//! the executable.

use std::borrow::Cow;

/// Built-in stylesheet path.
pub const STYLESHEET: &str = "stylist.css";
/// Built-in script path.
pub const SCRIPT: &str = "stylist.js";

#[derive(rust_embed::RustEmbed)]
#[folder = "theme/"]
struct Theme;

/// Get a theme asset by path (relative to `theme/`).
///
/// Returns the file contents if the asset exists, `None` otherwise.
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Theme::get(path).map(|f| f.data)
}

/// All theme asset paths, sorted.
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    let mut paths: Vec<_> = Theme::iter().collect();
    paths.sort();
    paths.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_assets_present() {
        let css = get(STYLESHEET).unwrap();
        assert!(std::str::from_utf8(&css).unwrap().contains(".stylist-nav"));
        assert!(get(SCRIPT).is_some());
    }

    #[test]
    fn test_iter_sorted() {
        let paths: Vec<_> = iter().collect();
        assert_eq!(paths, vec![STYLESHEET, SCRIPT]);
    }

    #[test]
    fn test_get_nonexistent_asset() {
        assert!(get("nonexistent_file_that_does_not_exist.txt").is_none());
    }
}
