// Rendering surface boundary: elements addressed by id with a handful of
// writable properties. A browser binding would implement `Surface` over the
// DOM; `MemorySurface` keeps everything in memory.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::SurfaceError;

pub trait Surface {
    fn set_text(&mut self, id: &str, text: &str) -> Result<(), SurfaceError>;

    fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), SurfaceError>;

    fn set_value(&mut self, id: &str, value: &str) -> Result<(), SurfaceError>;

    fn set_required(&mut self, id: &str, required: bool) -> Result<(), SurfaceError>;

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<(), SurfaceError>;

    fn set_class(&mut self, id: &str, class: &str, present: bool) -> Result<(), SurfaceError>;

    // Create `child_id` as the last child of `parent`
    fn append_child(
        &mut self,
        parent: &str,
        child_id: &str,
        classes: &[&str],
        text: &str,
    ) -> Result<(), SurfaceError>;

    fn remove_element(&mut self, id: &str) -> Result<(), SurfaceError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementState {
    pub text: String,
    pub visible: bool,
    pub value: String,
    pub required: bool,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub children: Vec<String>,
    #[serde(skip)]
    parent: Option<String>,
}

impl ElementState {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemorySurface {
    elements: BTreeMap<String, ElementState>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    // Surface pre-populated with the given element ids, all visible
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut surface = Self::new();
        for id in ids {
            surface.elements.insert(
                id.to_string(),
                ElementState {
                    visible: true,
                    ..Default::default()
                },
            );
        }
        surface
    }

    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    pub fn children(&self, id: &str) -> &[String] {
        self.elements
            .get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut ElementState, SurfaceError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| SurfaceError::MissingElement(id.to_string()))
    }
}

impl Surface for MemorySurface {
    fn set_text(&mut self, id: &str, text: &str) -> Result<(), SurfaceError> {
        self.element_mut(id)?.text = text.to_string();
        Ok(())
    }

    fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), SurfaceError> {
        self.element_mut(id)?.visible = visible;
        Ok(())
    }

    fn set_value(&mut self, id: &str, value: &str) -> Result<(), SurfaceError> {
        self.element_mut(id)?.value = value.to_string();
        Ok(())
    }

    fn set_required(&mut self, id: &str, required: bool) -> Result<(), SurfaceError> {
        self.element_mut(id)?.required = required;
        Ok(())
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<(), SurfaceError> {
        self.element_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_class(&mut self, id: &str, class: &str, present: bool) -> Result<(), SurfaceError> {
        let element = self.element_mut(id)?;
        if present {
            element.classes.insert(class.to_string());
        } else {
            element.classes.remove(class);
        }
        Ok(())
    }

    fn append_child(
        &mut self,
        parent: &str,
        child_id: &str,
        classes: &[&str],
        text: &str,
    ) -> Result<(), SurfaceError> {
        if self.elements.contains_key(child_id) {
            return Err(SurfaceError::DuplicateElement(child_id.to_string()));
        }
        self.element_mut(parent)?.children.push(child_id.to_string());

        let child = ElementState {
            text: text.to_string(),
            visible: true,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            parent: Some(parent.to_string()),
            ..Default::default()
        };
        self.elements.insert(child_id.to_string(), child);
        Ok(())
    }

    fn remove_element(&mut self, id: &str) -> Result<(), SurfaceError> {
        let removed = self
            .elements
            .remove(id)
            .ok_or_else(|| SurfaceError::MissingElement(id.to_string()))?;

        if let Some(parent_id) = &removed.parent {
            if let Some(parent) = self.elements.get_mut(parent_id) {
                parent.children.retain(|child| child != id);
            }
        }
        for child in removed.children {
            // Children go with their parent
            self.remove_element(&child)?;
        }
        Ok(())
    }
}
