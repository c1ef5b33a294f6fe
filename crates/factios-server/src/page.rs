//! HTML page rendering via `minijinja`.
//!
//! The fact page template is embedded at compile time, so the binary has no
//! runtime dependency on a templates directory. The template name ends in
//! `.html`, which turns on HTML auto-escaping for every interpolated value.

use chrono::Datelike;
use factios_store::Fact;
use minijinja::Environment;
use serde::Serialize;

use crate::error::FactiosError;

/// Template name of the fact page.
const FACT_PAGE: &str = "index.html";

/// Source of the fact page template.
const FACT_PAGE_SOURCE: &str = include_str!("../templates/index.html");

/// Renders HTML pages from the embedded templates.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    env: Environment<'static>,
}

/// Values available to the fact page template.
#[derive(Debug, Clone, Serialize)]
pub struct FactPage<'a> {
    /// Language code of the fact.
    pub lang: &'a str,
    /// Fact identifier.
    pub short: &'a str,
    /// Fact text.
    pub fact: &'a str,
    /// Site base URL without trailing slash.
    pub base_url: &'a str,
    /// Year shown in the footer.
    pub year: i32,
}

impl<'a> FactPage<'a> {
    /// Page values for `fact`, stamped with the current year.
    pub fn new(fact: &'a Fact, base_url: &'a str) -> Self {
        Self {
            lang: &fact.language,
            short: &fact.short,
            fact: &fact.text,
            base_url,
            year: chrono::Utc::now().year(),
        }
    }
}

impl PageRenderer {
    /// Create a renderer with all page templates loaded.
    pub fn new() -> Result<Self, FactiosError> {
        let mut env = Environment::new();
        env.add_template(FACT_PAGE, FACT_PAGE_SOURCE)
            .map_err(|e| FactiosError::Render(format!("failed to add fact page template: {e}")))?;
        Ok(Self { env })
    }

    /// Render the fact page.
    pub fn render_fact(&self, page: &FactPage<'_>) -> Result<String, FactiosError> {
        self.env
            .get_template(FACT_PAGE)
            .map_err(|e| FactiosError::Render(format!("missing fact page template: {e}")))?
            .render(page)
            .map_err(|e| FactiosError::Render(format!("fact page render failed: {e}")))
    }
}
