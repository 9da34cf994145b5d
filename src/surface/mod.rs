// SPDX-License-Identifier: MPL-2.0
//! Render surface abstraction.
//!
//! The overlay registry and the message queue never draw anything
//! themselves. They build and mutate a DOM-like element tree through
//! [`RenderSurface`], and a frontend (the iced views in [`crate::ui`], or a
//! test) reads that tree back.
//!
//! Input does not flow through registered listeners. Callers route a click
//! target or a [`Key`] into the owning component, which resolves it against
//! the elements it created.
//!
//! # Components
//!
//! - [`RenderSurface`] - element creation, mutation, focus and page scroll
//! - [`MemorySurface`] - retained in-memory implementation
//! - [`Node`] - caller-owned content mounted into overlay bodies

mod memory;

pub use memory::{Element, MemorySurface};

use crate::error::Result;

/// Identifier of an element on a render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Kind of element; decides default focusability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Container,
    Heading,
    Paragraph,
    Button,
    Input,
    Link,
    Icon,
    Progress,
}

impl ElementKind {
    /// Whether elements of this kind take part in keyboard focus order.
    #[must_use]
    pub fn is_focusable(self) -> bool {
        matches!(
            self,
            ElementKind::Button | ElementKind::Input | ElementKind::Link
        )
    }
}

/// Keys the presentation layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab { shift: bool },
    Enter,
    Other,
}

/// Content a caller mounts into an overlay body.
///
/// Text is always stored escaped; only [`Node::Markup`] is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Markup(String),
    Heading(String),
    Button { name: String, label: String },
    Input {
        name: String,
        value: String,
        placeholder: String,
    },
    Link { label: String, href: String },
    Group(Vec<Node>),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn markup(markup: impl Into<String>) -> Self {
        Node::Markup(markup.into())
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Node::Heading(text.into())
    }

    pub fn button(name: impl Into<String>, label: impl Into<String>) -> Self {
        Node::Button {
            name: name.into(),
            label: label.into(),
        }
    }

    pub fn input(name: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Input {
            name: name.into(),
            value: value.into(),
            placeholder: String::new(),
        }
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Node::Link {
            label: label.into(),
            href: href.into(),
        }
    }

    #[must_use]
    pub fn group(children: Vec<Node>) -> Self {
        Node::Group(children)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// A DOM-like retained rendering target.
///
/// Fallible operations are the ones that allocate or attach elements.
/// Mutations addressed to an element that no longer exists are ignored.
pub trait RenderSurface {
    /// Caller-owned payload this surface knows how to mount.
    type Content;

    /// The page body every top-level element hangs from.
    fn root(&self) -> ElementId;

    fn create_element(&mut self, kind: ElementKind) -> Result<ElementId>;

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()>;

    /// Detaches an element and releases its whole subtree.
    fn remove(&mut self, element: ElementId);

    fn clear_children(&mut self, element: ElementId);

    /// Replaces the children of `parent` with a rendering of `content`.
    fn mount(&mut self, parent: ElementId, content: &Self::Content) -> Result<()>;

    fn exists(&self, element: ElementId) -> bool;

    /// Whether `element` is `ancestor` or lies beneath it.
    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn remove_attribute(&mut self, element: ElementId, name: &str);

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Sets text content. The text is never interpreted as markup.
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Sets raw markup content.
    fn set_markup(&mut self, element: ElementId, markup: &str);

    fn set_visible(&mut self, element: ElementId, visible: bool);

    fn set_z_index(&mut self, element: ElementId, z_index: i32);

    /// Finds the first element under `scope` (document order) whose
    /// attribute `name` equals `value`.
    fn find_by_attribute(&self, scope: ElementId, name: &str, value: &str) -> Option<ElementId>;

    /// Visible, enabled, focusable elements under `scope` in document order.
    fn focusable_descendants(&self, scope: ElementId) -> Vec<ElementId>;

    fn focus(&mut self, element: ElementId);

    fn blur(&mut self);

    fn focused(&self) -> Option<ElementId>;

    fn value(&self, element: ElementId) -> Option<String>;

    fn set_value(&mut self, element: ElementId, value: &str);

    /// Vertical page scroll offset.
    fn scroll_offset(&self) -> f32;

    fn scroll_to(&mut self, offset: f32);

    fn set_scroll_locked(&mut self, locked: bool);

    fn is_scroll_locked(&self) -> bool;

    /// Creates an element and appends it to `parent` in one step.
    fn create_child(&mut self, parent: ElementId, kind: ElementKind) -> Result<ElementId> {
        let element = self.create_element(kind)?;
        if let Err(err) = self.append_child(parent, element) {
            self.remove(element);
            return Err(err);
        }
        Ok(element)
    }
}

/// Escapes text so it can be embedded in markup without being interpreted.
#[must_use]
pub fn escape_markup(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_markup_neutralizes_tags_and_quotes() {
        assert_eq!(
            escape_markup(r#"<img src="x" onerror='boom'>&"#),
            "&lt;img src=&quot;x&quot; onerror=&#039;boom&#039;&gt;&amp;"
        );
    }

    #[test]
    fn escape_markup_leaves_plain_text_alone() {
        assert_eq!(escape_markup("Lab 204 booked"), "Lab 204 booked");
    }

    #[test]
    fn only_interactive_kinds_are_focusable() {
        assert!(ElementKind::Button.is_focusable());
        assert!(ElementKind::Input.is_focusable());
        assert!(ElementKind::Link.is_focusable());
        assert!(!ElementKind::Container.is_focusable());
        assert!(!ElementKind::Paragraph.is_focusable());
        assert!(!ElementKind::Icon.is_focusable());
    }

    #[test]
    fn node_from_str_is_text() {
        assert_eq!(Node::from("hello"), Node::Text("hello".to_string()));
    }
}
