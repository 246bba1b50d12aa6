//! HTML views
//!
//! Three pages, each a pure function of the data handed to it. Templates are
//! compiled into the binary and registered once at startup; `.html` templates
//! are auto-escaped by minijinja, so file names and contents are always
//! rendered as text.

use minijinja::{context, Environment};
use std::sync::Arc;

use crate::error::Result;

const LAYOUT: &str = "layout.html";
const INDEX: &str = "index.html";
const DETAIL: &str = "detail.html";
const CREATE: &str = "create.html";

/// Compiled template set shared by all requests
#[derive(Debug, Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(LAYOUT, include_str!("../../templates/layout.html"))?;
        env.add_template(INDEX, include_str!("../../templates/index.html"))?;
        env.add_template(DETAIL, include_str!("../../templates/detail.html"))?;
        env.add_template(CREATE, include_str!("../../templates/create.html"))?;
        Ok(Self { env: Arc::new(env) })
    }

    /// File index: every name links to its detail page
    pub fn index(&self, files: &[String]) -> Result<String> {
        let page = self.env.get_template(INDEX)?.render(context! { files })?;
        Ok(page)
    }

    /// Single file with its content
    pub fn detail(&self, filename: &str, content: &str) -> Result<String> {
        let page = self
            .env
            .get_template(DETAIL)?
            .render(context! { filename, content })?;
        Ok(page)
    }

    /// Empty create form
    pub fn create(&self) -> Result<String> {
        let page = self.env.get_template(CREATE)?.render(context! {})?;
        Ok(page)
    }
}
