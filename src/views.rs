//! Server-side HTML rendering

use std::sync::Arc;

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{AppError, AppResult};

pub(crate) const LAYOUT_TEMPLATE: &str = include_str!("../templates/layout.hbs");

/// Templates compiled into the binary, registered under their name
const TEMPLATES: &[(&str, &str)] = &[
    ("layout", LAYOUT_TEMPLATE),
    ("index", include_str!("../templates/index.hbs")),
    ("test", include_str!("../templates/test.hbs")),
    ("author_list", include_str!("../templates/author_list.hbs")),
    ("author_detail", include_str!("../templates/author_detail.hbs")),
    ("author_form", include_str!("../templates/author_form.hbs")),
    ("author_delete", include_str!("../templates/author_delete.hbs")),
];

/// Template registry shared by all handlers
#[derive(Clone)]
pub struct Views {
    registry: Arc<Handlebars<'static>>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, *source)
                .map_err(|e| AppError::Internal(format!("template {}: {}", name, e)))?;
        }
        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> AppResult<Html<String>> {
        Ok(Html(self.registry.render(name, data)?))
    }
}
