//! In-process Document
//!
//! The dashboard page reduced to what the pipeline touches: container
//! elements addressed by id, each holding an ordered list of fragments.

use crate::render::Fragment;

/// Id of the element that receives volume cards
pub const VOLUME_LIST_ID: &str = "volumeList";

/// A container element and its children, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    id: String,
    children: Vec<Fragment>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn children(&self) -> &[Fragment] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Add a child after all existing ones
    pub fn append_child(&mut self, fragment: Fragment) {
        self.children.push(fragment);
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Concatenated markup of all children
    pub fn inner_html(&self) -> String {
        self.children.iter().map(Fragment::as_str).collect()
    }
}

/// A page's addressable containers
#[derive(Debug, Clone, Default)]
pub struct Document {
    containers: Vec<Container>,
}

impl Document {
    /// An empty document with no containers
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard page skeleton: a document holding an empty `#volumeList`
    pub fn dashboard() -> Self {
        Self::with_container(VOLUME_LIST_ID)
    }

    pub fn with_container(id: impl Into<String>) -> Self {
        let mut doc = Self::new();
        doc.add_container(id);
        doc
    }

    /// Add a container unless one with the same id already exists
    pub fn add_container(&mut self, id: impl Into<String>) -> &mut Container {
        let id = id.into();
        let index = match self.containers.iter().position(|c| c.id == id) {
            Some(index) => index,
            None => {
                self.containers.push(Container::new(id));
                self.containers.len() - 1
            }
        };
        &mut self.containers[index]
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| c.id == id)
    }
}
