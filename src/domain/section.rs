//! Ordered, optionally conditional units of a generated context document.

use std::fmt;
use std::sync::Arc;

use crate::domain::context_data::EnhancedContextData;

/// Predicate deciding whether a conditional section is included.
pub type SectionCondition = Arc<dyn Fn(&EnhancedContextData) -> bool + Send + Sync>;

/// One unit of the assembled document.
#[derive(Clone, Default)]
pub struct ContextSection {
    /// Unique within one template.
    pub key: String,
    /// Heading placed on the line before `content`.
    pub title: Option<String>,
    pub content: String,
    /// Assembly position, ascending.
    pub order: i32,
    pub conditional: bool,
    pub condition: Option<SectionCondition>,
}

impl ContextSection {
    pub fn new(key: impl Into<String>, content: impl Into<String>, order: i32) -> Self {
        Self { key: key.into(), content: content.into(), order, ..Self::default() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Mark the section conditional on `condition`.
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&EnhancedContextData) -> bool + Send + Sync + 'static,
    {
        self.conditional = true;
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Whether the section takes part in assembly for `data`.
    ///
    /// A conditional section without a predicate is kept.
    pub fn is_included(&self, data: &EnhancedContextData) -> bool {
        !self.conditional || self.condition.as_ref().is_none_or(|condition| condition(data))
    }
}

impl fmt::Debug for ContextSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextSection")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("order", &self.order)
            .field("conditional", &self.conditional)
            .field("condition", &self.condition.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Sections for one generation call plus the version tag they were built with.
#[derive(Debug, Clone, Default)]
pub struct ContextTemplate {
    pub sections: Vec<ContextSection>,
    pub version: String,
}

impl ContextTemplate {
    pub fn section(&self, key: &str) -> Option<&ContextSection> {
        self.sections.iter().find(|section| section.key == key)
    }
}
