//! Fragment Appender

use thiserror::Error;

use super::document::{Document, VOLUME_LIST_ID};
use crate::render::Fragment;

/// Errors raised while mutating the document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The target container is not part of the document
    #[error("Container #{id} not found in document")]
    ContainerMissing { id: String },
}

/// Appends fragments to one fixed container.
///
/// Never removes, deduplicates or diffs: every call adds exactly one child
/// after the existing ones.
#[derive(Debug, Clone)]
pub struct DomAppender {
    container_id: String,
}

impl Default for DomAppender {
    fn default() -> Self {
        Self::new(VOLUME_LIST_ID)
    }
}

impl DomAppender {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Append `fragment` as the last child; returns the new child count
    pub fn append(&self, doc: &mut Document, fragment: Fragment) -> Result<usize, DomError> {
        let container = doc
            .get_element_by_id_mut(&self.container_id)
            .ok_or_else(|| DomError::ContainerMissing {
                id: self.container_id.clone(),
            })?;

        container.append_child(fragment);
        Ok(container.len())
    }
}
