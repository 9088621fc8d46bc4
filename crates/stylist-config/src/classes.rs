//! CSS class names used by the page template.
//!
//! Every key has a default and can be overridden from `[theme.classes]`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ConfigError;

/// Class names applied to the rendered page, keyed as in `[theme.classes]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNames {
    pub container: String,
    pub nav: String,
    pub main: String,
    pub title: String,
    pub examples: String,
    pub main_item: String,
    pub nav_item: String,
    pub nav_collapse: String,
    pub nav_list: String,
    pub nav_list_item: String,
    pub params_table: String,
    pub params_parameter_header: String,
    pub params_type_header: String,
    pub params_description_header: String,
    pub params_parameter_data: String,
    pub params_type_data: String,
    pub params_description_data: String,
    pub returns: String,
    pub source: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            container: "stylist-container".to_owned(),
            nav: "stylist-nav".to_owned(),
            main: "stylist-main".to_owned(),
            title: "stylist-title".to_owned(),
            examples: "stylist-examples".to_owned(),
            main_item: "stylist-item".to_owned(),
            nav_item: "stylist-nav-item".to_owned(),
            nav_collapse: "stylist-nav-collapse".to_owned(),
            nav_list: "stylist-nav-list".to_owned(),
            nav_list_item: "stylist-nav-list-item".to_owned(),
            params_table: "stylist-params".to_owned(),
            params_parameter_header: "stylist-params-name".to_owned(),
            params_type_header: "stylist-params-type".to_owned(),
            params_description_header: "stylist-params-description".to_owned(),
            params_parameter_data: "stylist-param-name".to_owned(),
            params_type_data: "stylist-param-type".to_owned(),
            params_description_data: "stylist-param-description".to_owned(),
            returns: "stylist-returns".to_owned(),
            source: "stylist-source".to_owned(),
        }
    }
}

impl ClassNames {
    /// Recognised override keys, in template order.
    pub const KEYS: [&'static str; 19] = [
        "container",
        "nav",
        "main",
        "title",
        "examples",
        "mainItem",
        "navItem",
        "navCollapse",
        "navList",
        "navListItem",
        "paramsTable",
        "paramsParameterHeader",
        "paramsTypeHeader",
        "paramsDescriptionHeader",
        "paramsParameterData",
        "paramsTypeData",
        "paramsDescriptionData",
        "returns",
        "source",
    ];

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        let slot = match key {
            "container" => &mut self.container,
            "nav" => &mut self.nav,
            "main" => &mut self.main,
            "title" => &mut self.title,
            "examples" => &mut self.examples,
            "mainItem" => &mut self.main_item,
            "navItem" => &mut self.nav_item,
            "navCollapse" => &mut self.nav_collapse,
            "navList" => &mut self.nav_list,
            "navListItem" => &mut self.nav_list_item,
            "paramsTable" => &mut self.params_table,
            "paramsParameterHeader" => &mut self.params_parameter_header,
            "paramsTypeHeader" => &mut self.params_type_header,
            "paramsDescriptionHeader" => &mut self.params_description_header,
            "paramsParameterData" => &mut self.params_parameter_data,
            "paramsTypeData" => &mut self.params_type_data,
            "paramsDescriptionData" => &mut self.params_description_data,
            "returns" => &mut self.returns,
            "source" => &mut self.source,
            _ => return None,
        };
        Some(slot)
    }

    /// Override a single class.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for an unknown key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let slot = self.slot_mut(key).ok_or_else(|| {
            ConfigError::Validation(format!(
                "theme.classes.{key} is not a known class key (expected one of: {})",
                Self::KEYS.join(", ")
            ))
        })?;
        value.clone_into(slot);
        Ok(())
    }

    /// Defaults with `overrides` applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for unknown keys or empty values.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut classes = Self::default();
        for (key, value) in overrides {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "theme.classes.{key} cannot be empty"
                )));
            }
            classes.set(key, value)?;
        }
        Ok(classes)
    }
}
