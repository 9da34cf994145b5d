// SPDX-License-Identifier: MPL-2.0
//! Retained in-memory render surface.
//!
//! `MemorySurface` keeps a plain element tree. The iced views walk it to
//! draw the page, and tests inspect it to check what a component rendered.

use super::{escape_markup, ElementId, ElementKind, Node, RenderSurface};
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};

/// One element of the tree.
#[derive(Debug, Clone)]
pub struct Element {
    kind: ElementKind,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    markup: String,
    raw: bool,
    visible: bool,
    z_index: i32,
    value: String,
}

impl Element {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            text: String::new(),
            markup: String::new(),
            raw: false,
            visible: true,
            z_index: 0,
            value: String::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Plain text content (what a screen reader would announce).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Markup content. Escaped unless the element was given raw markup.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn is_enabled(&self) -> bool {
        self.attribute("disabled").is_none() && self.attribute("tabindex") != Some("-1")
    }
}

/// In-memory [`RenderSurface`] with [`Node`] content.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    elements: HashMap<ElementId, Element>,
    root: ElementId,
    next_id: u64,
    focused: Option<ElementId>,
    scroll_offset: f32,
    scroll_locked: bool,
    available: bool,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        let root = ElementId(0);
        let mut elements = HashMap::new();
        elements.insert(root, Element::new(ElementKind::Container));
        Self {
            elements,
            root,
            next_id: 1,
            focused: None,
            scroll_offset: 0.0,
            scroll_locked: false,
            available: true,
        }
    }

    /// Makes subsequent element creation fail, simulating a detached or
    /// missing document.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Number of live elements, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    /// Whether the element and all of its ancestors are visible.
    #[must_use]
    pub fn is_rendered(&self, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.elements.get(&current) {
                Some(element) if element.visible => cursor = element.parent,
                _ => return false,
            }
        }
        true
    }

    fn collect_subtree(&self, id: ElementId, out: &mut Vec<ElementId>) {
        if let Some(element) = self.elements.get(&id) {
            out.push(id);
            for child in &element.children {
                self.collect_subtree(*child, out);
            }
        }
    }

    fn build(&mut self, parent: ElementId, node: &Node) -> Result<()> {
        match node {
            Node::Text(text) => {
                let el = self.create_child(parent, ElementKind::Paragraph)?;
                self.set_text(el, text);
            }
            Node::Markup(markup) => {
                let el = self.create_child(parent, ElementKind::Paragraph)?;
                self.set_markup(el, markup);
            }
            Node::Heading(text) => {
                let el = self.create_child(parent, ElementKind::Heading)?;
                self.set_text(el, text);
            }
            Node::Button { name, label } => {
                let el = self.create_child(parent, ElementKind::Button)?;
                self.set_attribute(el, "name", name);
                self.set_text(el, label);
            }
            Node::Input {
                name,
                value,
                placeholder,
            } => {
                let el = self.create_child(parent, ElementKind::Input)?;
                self.set_attribute(el, "name", name);
                if !placeholder.is_empty() {
                    self.set_attribute(el, "placeholder", placeholder);
                }
                self.set_value(el, value);
            }
            Node::Link { label, href } => {
                let el = self.create_child(parent, ElementKind::Link)?;
                self.set_attribute(el, "href", href);
                self.set_text(el, label);
            }
            Node::Group(children) => {
                let el = self.create_child(parent, ElementKind::Container)?;
                for child in children {
                    self.build(el, child)?;
                }
            }
        }
        Ok(())
    }

    fn find_first(&self, scope: ElementId, predicate: &dyn Fn(&Element) -> bool) -> Option<ElementId> {
        let element = self.elements.get(&scope)?;
        for child in &element.children {
            if let Some(found) = self.elements.get(child) {
                if predicate(found) {
                    return Some(*child);
                }
            }
            if let Some(found) = self.find_first(*child, predicate) {
                return Some(found);
            }
        }
        None
    }

    fn collect_focusable(&self, scope: ElementId, out: &mut Vec<ElementId>) {
        let Some(element) = self.elements.get(&scope) else {
            return;
        };
        for child in &element.children {
            let Some(el) = self.elements.get(child) else {
                continue;
            };
            if !el.visible {
                continue;
            }
            if el.kind.is_focusable() && el.is_enabled() {
                out.push(*child);
            }
            self.collect_focusable(*child, out);
        }
    }
}

impl RenderSurface for MemorySurface {
    type Content = Node;

    fn root(&self) -> ElementId {
        self.root
    }

    fn create_element(&mut self, kind: ElementKind) -> Result<ElementId> {
        if !self.available {
            return Err(Error::surface("document is not available"));
        }
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, Element::new(kind));
        Ok(id)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        if parent == child || !self.elements.contains_key(&parent) {
            return Err(Error::surface(format!(
                "cannot attach to missing element {}",
                parent.raw()
            )));
        }
        let previous_parent = match self.elements.get_mut(&child) {
            Some(element) => element.parent.replace(parent),
            None => {
                return Err(Error::surface(format!(
                    "cannot attach missing element {}",
                    child.raw()
                )))
            }
        };
        if let Some(old) = previous_parent.and_then(|p| self.elements.get_mut(&p)) {
            old.children.retain(|c| *c != child);
        }
        if let Some(parent_el) = self.elements.get_mut(&parent) {
            parent_el.children.push(child);
        }
        Ok(())
    }

    fn remove(&mut self, element: ElementId) {
        if element == self.root {
            return;
        }
        let Some(parent) = self.elements.get(&element).map(|e| e.parent) else {
            return;
        };
        if let Some(parent_el) = parent.and_then(|p| self.elements.get_mut(&p)) {
            parent_el.children.retain(|c| *c != element);
        }
        let mut doomed = Vec::new();
        self.collect_subtree(element, &mut doomed);
        for id in doomed {
            self.elements.remove(&id);
            if self.focused == Some(id) {
                self.focused = None;
            }
        }
    }

    fn clear_children(&mut self, element: ElementId) {
        let children = match self.elements.get(&element) {
            Some(el) => el.children.clone(),
            None => return,
        };
        for child in children {
            self.remove(child);
        }
    }

    fn mount(&mut self, parent: ElementId, content: &Node) -> Result<()> {
        if !self.elements.contains_key(&parent) {
            return Err(Error::surface(format!(
                "cannot mount into missing element {}",
                parent.raw()
            )));
        }
        self.clear_children(parent);
        self.build(parent, content)
    }

    fn exists(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        let mut cursor = Some(element);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.elements.get(&current).and_then(|e| e.parent);
        }
        false
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.attributes.remove(name);
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.elements
            .get(&element)
            .and_then(|el| el.attribute(name))
            .map(str::to_string)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            if !el.has_class(class) {
                el.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.classes.retain(|c| c != class);
        }
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.text = text.to_string();
            el.markup = escape_markup(text);
            el.raw = false;
        }
    }

    fn set_markup(&mut self, element: ElementId, markup: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.text = markup.to_string();
            el.markup = markup.to_string();
            el.raw = true;
        }
    }

    fn set_visible(&mut self, element: ElementId, visible: bool) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.visible = visible;
        }
    }

    fn set_z_index(&mut self, element: ElementId, z_index: i32) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.z_index = z_index;
        }
    }

    fn find_by_attribute(&self, scope: ElementId, name: &str, value: &str) -> Option<ElementId> {
        self.find_first(scope, &|el: &Element| el.attribute(name) == Some(value))
    }

    fn focusable_descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.collect_focusable(scope, &mut out);
        out
    }

    fn focus(&mut self, element: ElementId) {
        if self.elements.contains_key(&element) {
            self.focused = Some(element);
        }
    }

    fn blur(&mut self) {
        self.focused = None;
    }

    fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    fn value(&self, element: ElementId) -> Option<String> {
        self.elements.get(&element).map(|el| el.value.clone())
    }

    fn set_value(&mut self, element: ElementId, value: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.value = value.to_string();
        }
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    fn scroll_to(&mut self, offset: f32) {
        // A locked page does not scroll; the registry restores the offset
        // after releasing the lock.
        if !self.scroll_locked {
            self.scroll_offset = offset.max(0.0);
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_has_only_the_root() {
        let surface = MemorySurface::new();
        assert_eq!(surface.len(), 1);
        assert!(surface.is_empty());
        assert!(surface.exists(surface.root()));
    }

    #[test]
    fn create_child_attaches_under_parent() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let panel = surface.create_child(root, ElementKind::Container).unwrap();
        let button = surface.create_child(panel, ElementKind::Button).unwrap();

        assert_eq!(surface.element(panel).unwrap().children(), &[button]);
        assert!(surface.contains(root, button));
        assert!(!surface.contains(button, panel));
    }

    #[test]
    fn remove_releases_the_whole_subtree() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let panel = surface.create_child(root, ElementKind::Container).unwrap();
        let button = surface.create_child(panel, ElementKind::Button).unwrap();
        surface.focus(button);

        surface.remove(panel);

        assert!(!surface.exists(panel));
        assert!(!surface.exists(button));
        assert_eq!(surface.focused(), None);
        assert!(surface.element(root).unwrap().children().is_empty());
    }

    #[test]
    fn unavailable_surface_refuses_new_elements() {
        let mut surface = MemorySurface::new();
        surface.set_available(false);
        let err = surface.create_element(ElementKind::Container).unwrap_err();
        assert!(matches!(err, Error::RenderSurfaceUnavailable { .. }));
    }

    #[test]
    fn set_text_stores_escaped_markup() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let p = surface.create_child(root, ElementKind::Paragraph).unwrap();

        surface.set_text(p, "<b>bold</b>");
        let el = surface.element(p).unwrap();
        assert_eq!(el.text(), "<b>bold</b>");
        assert_eq!(el.markup(), "&lt;b&gt;bold&lt;/b&gt;");
        assert!(!el.is_raw());

        surface.set_markup(p, "<b>bold</b>");
        let el = surface.element(p).unwrap();
        assert_eq!(el.markup(), "<b>bold</b>");
        assert!(el.is_raw());
    }

    #[test]
    fn mount_replaces_previous_content() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let body = surface.create_child(root, ElementKind::Container).unwrap();

        surface.mount(body, &Node::text("first")).unwrap();
        surface
            .mount(
                body,
                &Node::group(vec![Node::text("second"), Node::button("ok", "OK")]),
            )
            .unwrap();

        let children = surface.element(body).unwrap().children().to_vec();
        assert_eq!(children.len(), 1);
        let group = surface.element(children[0]).unwrap();
        assert_eq!(group.children().len(), 2);
    }

    #[test]
    fn focusable_descendants_skip_hidden_and_disabled() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let body = surface.create_child(root, ElementKind::Container).unwrap();
        surface
            .mount(
                body,
                &Node::group(vec![
                    Node::button("a", "A"),
                    Node::input("name", ""),
                    Node::button("b", "B"),
                    Node::link("Docs", "/docs"),
                ]),
            )
            .unwrap();

        let all = surface.focusable_descendants(body);
        assert_eq!(all.len(), 4);

        surface.set_attribute(all[1], "disabled", "true");
        surface.set_visible(all[2], false);
        let remaining = surface.focusable_descendants(body);
        assert_eq!(remaining, vec![all[0], all[3]]);
    }

    #[test]
    fn find_by_attribute_searches_in_document_order() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        surface
            .mount(
                root,
                &Node::group(vec![Node::input("prompt", "x"), Node::input("prompt", "y")]),
            )
            .unwrap();

        let found = surface.find_by_attribute(root, "name", "prompt").unwrap();
        assert_eq!(surface.value(found).as_deref(), Some("x"));
        assert!(surface.find_by_attribute(root, "name", "missing").is_none());
    }

    #[test]
    fn locked_page_ignores_scrolling() {
        let mut surface = MemorySurface::new();
        surface.scroll_to(120.0);
        surface.set_scroll_locked(true);
        surface.scroll_to(10.0);
        assert_eq!(surface.scroll_offset(), 120.0);

        surface.set_scroll_locked(false);
        surface.scroll_to(10.0);
        assert_eq!(surface.scroll_offset(), 10.0);
    }

    #[test]
    fn is_rendered_requires_visible_ancestors() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let panel = surface.create_child(root, ElementKind::Container).unwrap();
        let text = surface.create_child(panel, ElementKind::Paragraph).unwrap();

        assert!(surface.is_rendered(text));
        surface.set_visible(panel, false);
        assert!(!surface.is_rendered(text));
    }
}
