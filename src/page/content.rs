//! Content collaborators: resolving references and wrapping content in pages.

use std::collections::HashMap;
use std::sync::Arc;

use futures_core::future::BoxFuture;
use parking_lot::RwLock;

use super::{Page, PageContent};
use crate::error::{NavigatorError, Result};

/// Resolves a content reference (template name, URL, ...) to page content.
pub trait ContentResolver: Send + Sync {
    fn resolve<'a>(&'a self, reference: &'a str) -> BoxFuture<'a, Result<PageContent>>;
}

/// Wraps resolved content into a page.
pub trait PageFactory: Send + Sync {
    fn create(&self, name: Option<&str>, content: PageContent) -> Result<Page>;
}

/// In-memory template table.
#[derive(Clone, Default)]
pub struct TemplateResolver {
    templates: Arc<RwLock<HashMap<String, PageContent>>>,
}

impl TemplateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_templates<I, K, V>(templates: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let resolver = Self::new();
        for (name, markup) in templates {
            resolver.insert(name, markup);
        }
        resolver
    }

    /// Add or replace a template.
    pub fn insert(&self, name: impl Into<String>, markup: impl Into<String>) {
        self.templates
            .write()
            .insert(name.into(), PageContent::new(markup));
    }

    pub fn remove(&self, name: &str) -> Option<PageContent> {
        self.templates.write().remove(name)
    }

    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }
}

impl ContentResolver for TemplateResolver {
    fn resolve<'a>(&'a self, reference: &'a str) -> BoxFuture<'a, Result<PageContent>> {
        Box::pin(async move {
            self.templates
                .read()
                .get(reference)
                .cloned()
                .ok_or_else(|| NavigatorError::ContentNotFound {
                    reference: reference.to_string(),
                })
        })
    }
}

/// Accepts content whose root element is the configured page tag.
#[derive(Debug, Clone)]
pub struct DefaultPageFactory {
    root_tag: String,
}

impl DefaultPageFactory {
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            root_tag: root_tag.into().to_ascii_lowercase(),
        }
    }
}

impl Default for DefaultPageFactory {
    fn default() -> Self {
        Self::new("page")
    }
}

impl PageFactory for DefaultPageFactory {
    fn create(&self, name: Option<&str>, content: PageContent) -> Result<Page> {
        match content.root_tag() {
            Some(tag) if tag == self.root_tag => Ok(Page::new(name.map(str::to_string), content)),
            Some(tag) => Err(NavigatorError::Structural(format!(
                "expected a <{}> root element, found <{}>",
                self.root_tag, tag
            ))),
            None => Err(NavigatorError::Structural(format!(
                "expected a <{}> root element",
                self.root_tag
            ))),
        }
    }
}
