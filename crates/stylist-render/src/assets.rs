//! Assets referenced by the rendered page.

use std::path::PathBuf;

use stylist_assets::{SCRIPT, STYLESHEET};
use stylist_config::ThemeConfig;

/// Where an asset's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Built-in theme file, by its `stylist-assets` path.
    Embedded(&'static str),
    /// File on disk, copied as is.
    File(PathBuf),
}

/// A file the page links to, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub path: String,
    pub source: AssetSource,
}

impl Asset {
    pub fn is_stylesheet(&self) -> bool {
        self.path.ends_with(".css")
    }

    pub fn is_script(&self) -> bool {
        self.path.ends_with(".js")
    }
}

/// Assets for a theme configuration, in link order.
///
/// The stylesheet comes first (a configured `css` file replaces the built-in
/// one under the same name), then the script, then `extra_css` under its own
/// file name.
pub fn theme_assets(theme: &ThemeConfig) -> Vec<Asset> {
    let stylesheet = match &theme.css {
        Some(path) => AssetSource::File(path.clone()),
        None => AssetSource::Embedded(STYLESHEET),
    };

    let mut assets = vec![
        Asset {
            path: STYLESHEET.to_owned(),
            source: stylesheet,
        },
        Asset {
            path: SCRIPT.to_owned(),
            source: AssetSource::Embedded(SCRIPT),
        },
    ];

    if let Some(extra) = &theme.extra_css
        && let Some(name) = extra.file_name()
    {
        assets.push(Asset {
            path: name.to_string_lossy().into_owned(),
            source: AssetSource::File(extra.clone()),
        });
    }

    assets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_assets() {
        let assets = theme_assets(&ThemeConfig::default());

        assert_eq!(
            assets,
            vec![
                Asset {
                    path: "stylist.css".to_owned(),
                    source: AssetSource::Embedded("stylist.css"),
                },
                Asset {
                    path: "stylist.js".to_owned(),
                    source: AssetSource::Embedded("stylist.js"),
                },
            ]
        );
        assert!(assets[0].is_stylesheet());
        assert!(assets[1].is_script());
    }

    #[test]
    fn test_css_override_and_extra_css() {
        let theme = ThemeConfig {
            css: Some(PathBuf::from("/site/brand.css")),
            extra_css: Some(PathBuf::from("/site/styles/extra.css")),
            ..ThemeConfig::default()
        };

        let assets = theme_assets(&theme);

        assert_eq!(assets.len(), 3);
        assert_eq!(assets[0].path, "stylist.css");
        assert_eq!(assets[0].source, AssetSource::File(PathBuf::from("/site/brand.css")));
        assert_eq!(assets[1].path, "stylist.js");
        assert_eq!(assets[2].path, "extra.css");
        assert_eq!(
            assets[2].source,
            AssetSource::File(PathBuf::from("/site/styles/extra.css"))
        );
    }
}
