use std::borrow::Cow;

use crate::model::Template;

const BASE_CSS: &str = include_str!("css/base.css");
const ACADEMIC_CSS: &str = include_str!("css/academic.css");
const MODERN_CSS: &str = include_str!("css/modern.css");
const MINIMAL_CSS: &str = include_str!("css/minimal.css");

/// Supplies the stylesheet injected into every page for a template.
///
/// Templates only differ in CSS. The page structure is the same for all of them.
pub trait ThemeProvider: Send + Sync {
    fn stylesheet(&self, template: Template) -> Cow<'_, str>;
}

/// The three stylesheets shipped with the crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinThemes;

impl ThemeProvider for BuiltinThemes {
    fn stylesheet(&self, template: Template) -> Cow<'_, str> {
        let variant = match template {
            Template::Academic => ACADEMIC_CSS,
            Template::Modern => MODERN_CSS,
            Template::Minimal => MINIMAL_CSS,
        };

        Cow::Owned(format!("{variant}\n{BASE_CSS}"))
    }
}
