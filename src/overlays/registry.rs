// SPDX-License-Identifier: MPL-2.0
//! The overlay registry: registered overlays, their open stack and the
//! page-level resources held while any of them is open.

use super::focus::FocusTrap;
use super::overlay::{Overlay, OverlayElements, OverlayId, OverlayOptions};
use crate::error::Result;
use crate::surface::{ElementId, ElementKind, Key, RenderSurface};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Registry-wide settings, normally taken from the `[overlays]` config
/// section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySettings {
    /// z-index of the backdrop under the first open overlay.
    pub z_index_base: i32,
    /// Whether a shared backdrop is drawn under the active overlay.
    pub backdrop: bool,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            z_index_base: 1000,
            backdrop: true,
        }
    }
}

/// What an input routed into the registry resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    /// The overlay left the stack through its close control, the backdrop
    /// or Escape.
    Closed(OverlayId),
    /// The confirm button was pressed. `value` carries the prompt input.
    Confirmed {
        id: OverlayId,
        value: Option<String>,
    },
    Cancelled(OverlayId),
    /// A focusable element of the overlay content was clicked.
    Activated { id: OverlayId, element: ElementId },
    /// Tab or Shift+Tab moved focus inside the active overlay.
    FocusMoved(ElementId),
}

/// Page scroll lock. Engaged while at least one overlay is open.
#[derive(Debug, Clone, Copy, Default)]
struct ScrollLock {
    saved_offset: Option<f32>,
}

impl ScrollLock {
    fn engage<S: RenderSurface>(&mut self, surface: &mut S) {
        if self.saved_offset.is_none() {
            self.saved_offset = Some(surface.scroll_offset());
            surface.set_scroll_locked(true);
        }
    }

    fn release<S: RenderSurface>(&mut self, surface: &mut S) {
        if let Some(offset) = self.saved_offset.take() {
            surface.set_scroll_locked(false);
            surface.scroll_to(offset);
        }
    }

    fn is_engaged(&self) -> bool {
        self.saved_offset.is_some()
    }
}

/// Registered overlays and their stacking order.
///
/// Closed overlays stay registered and can be reopened or have their
/// content replaced. Every operation addressed to an unknown id is a
/// silent no-op.
pub struct Registry<S: RenderSurface> {
    surface: S,
    overlays: BTreeMap<OverlayId, Overlay<S::Content>>,
    /// Open overlays in open order; the index is the stack position.
    stack: Vec<OverlayId>,
    backdrop: Option<ElementId>,
    scroll_lock: ScrollLock,
    settings: RegistrySettings,
    next_id: u64,
}

impl<S: RenderSurface> Registry<S> {
    /// Creates a registry with default settings on `surface`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot create the backdrop.
    pub fn new(surface: S) -> Result<Self> {
        Self::with_settings(surface, RegistrySettings::default())
    }

    /// # Errors
    ///
    /// Returns an error if the surface cannot create the backdrop.
    pub fn with_settings(mut surface: S, settings: RegistrySettings) -> Result<Self> {
        let backdrop = if settings.backdrop {
            let root = surface.root();
            let backdrop = surface.create_child(root, ElementKind::Container)?;
            surface.add_class(backdrop, "modal-backdrop");
            surface.set_attribute(backdrop, "aria-hidden", "true");
            surface.set_z_index(backdrop, settings.z_index_base);
            surface.set_visible(backdrop, false);
            Some(backdrop)
        } else {
            None
        };

        Ok(Self {
            surface,
            overlays: BTreeMap::new(),
            stack: Vec::new(),
            backdrop,
            scroll_lock: ScrollLock::default(),
            settings,
            next_id: 1,
        })
    }

    /// Registers a new, closed overlay and renders it hidden.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface refuses any of the overlay elements.
    /// Nothing is registered in that case.
    pub fn create(&mut self, content: S::Content, options: OverlayOptions) -> Result<OverlayId> {
        let id = OverlayId(self.next_id);
        self.next_id += 1;

        let root = self.surface.root();
        let element = self.surface.create_child(root, ElementKind::Container)?;
        let elements = match self.render(id, element, &content, &options) {
            Ok(elements) => elements,
            Err(err) => {
                self.surface.remove(element);
                warn!(overlay = %id, error = %err, "failed to render overlay");
                return Err(err);
            }
        };

        self.overlays.insert(
            id,
            Overlay {
                id,
                content,
                options,
                is_open: false,
                elements,
                focus_trap: None,
                restore_focus: None,
                value_field: None,
                transient: false,
            },
        );
        debug!(overlay = %id, "overlay created");
        Ok(id)
    }

    fn render(
        &mut self,
        id: OverlayId,
        element: ElementId,
        content: &S::Content,
        options: &OverlayOptions,
    ) -> Result<OverlayElements> {
        let surface = &mut self.surface;
        surface.add_class(element, "modal");
        surface.add_class(element, options.size.class_name());
        surface.set_attribute(element, "data-modal-id", &id.to_string());
        surface.set_attribute(element, "role", "dialog");
        surface.set_attribute(element, "aria-modal", "true");
        surface.set_visible(element, false);

        let header = surface.create_child(element, ElementKind::Container)?;
        surface.add_class(header, "modal-header");
        let title = match &options.title {
            Some(text) => Some(Self::render_title(surface, id, element, header, text)?),
            None => None,
        };
        let close = if options.show_close_control {
            let close = surface.create_child(header, ElementKind::Button)?;
            surface.add_class(close, "modal-close");
            surface.set_attribute(close, "aria-label", "Close");
            surface.set_text(close, "\u{00d7}");
            Some(close)
        } else {
            None
        };

        let body = surface.create_child(element, ElementKind::Container)?;
        surface.add_class(body, "modal-body");
        surface.mount(body, content)?;

        let (mut confirm, mut cancel) = (None, None);
        if options.confirm_label.is_some() || options.cancel_label.is_some() {
            let footer = surface.create_child(element, ElementKind::Container)?;
            surface.add_class(footer, "modal-footer");
            if let Some(label) = &options.cancel_label {
                let button = surface.create_child(footer, ElementKind::Button)?;
                surface.add_class(button, "modal-cancel");
                surface.set_text(button, label);
                cancel = Some(button);
            }
            if let Some(label) = &options.confirm_label {
                let button = surface.create_child(footer, ElementKind::Button)?;
                surface.add_class(button, "modal-confirm");
                surface.set_text(button, label);
                confirm = Some(button);
            }
        }

        Ok(OverlayElements {
            root: element,
            header,
            title,
            close,
            body,
            confirm,
            cancel,
        })
    }

    fn render_title(
        surface: &mut S,
        id: OverlayId,
        element: ElementId,
        header: ElementId,
        text: &str,
    ) -> Result<ElementId> {
        let title = surface.create_child(header, ElementKind::Heading)?;
        let title_id = format!("{id}-title");
        surface.add_class(title, "modal-title");
        surface.set_attribute(title, "id", &title_id);
        surface.set_text(title, text);
        surface.set_attribute(element, "aria-labelledby", &title_id);
        Ok(title)
    }

    /// Opens a registered overlay on top of the stack.
    ///
    /// Returns `false` when the id is unknown or the overlay is already
    /// open.
    pub fn open(&mut self, id: OverlayId) -> bool {
        let Some(overlay) = self.overlays.get_mut(&id) else {
            trace!(overlay = %id, "open ignored: unknown overlay");
            return false;
        };
        if overlay.is_open {
            return false;
        }

        if self.stack.is_empty() {
            self.scroll_lock.engage(&mut self.surface);
        }

        overlay.is_open = true;
        overlay.restore_focus = self.surface.focused();
        let element = overlay.elements.root;
        self.surface.set_visible(element, true);
        self.surface.add_class(element, "show");

        let trap = FocusTrap::capture(&self.surface, element);
        match trap.first() {
            Some(first) => self.surface.focus(first),
            None => self.surface.blur(),
        }
        overlay.focus_trap = Some(trap);

        self.stack.push(id);
        self.restack();
        debug!(overlay = %id, depth = self.stack.len(), "overlay opened");

        if let Some(hook) = self
            .overlays
            .get_mut(&id)
            .and_then(|o| o.options.on_open.as_mut())
        {
            hook(id);
        }
        true
    }

    /// Closes an open overlay. Dialog presets are released as well.
    ///
    /// Returns `false` when the overlay is unknown or not open.
    pub fn close(&mut self, id: OverlayId) -> bool {
        if !self.close_inner(id) {
            return false;
        }
        if self.overlays.get(&id).is_some_and(|o| o.transient) {
            self.release(id);
        }
        true
    }

    fn close_inner(&mut self, id: OverlayId) -> bool {
        let Some(position) = self.stack.iter().position(|open| *open == id) else {
            trace!(overlay = %id, "close ignored: overlay not open");
            return false;
        };
        let was_top = position + 1 == self.stack.len();
        self.stack.remove(position);

        let Some(overlay) = self.overlays.get_mut(&id) else {
            return false;
        };
        overlay.is_open = false;
        overlay.focus_trap = None;
        let element = overlay.elements.root;
        let restore = overlay.restore_focus.take();
        self.surface.set_visible(element, false);
        self.surface.remove_class(element, "show");
        self.surface.remove_attribute(element, "data-stack-position");

        // Overlays opened above this one inherit its focus origin so focus
        // never returns into a hidden overlay.
        for other in self.overlays.values_mut() {
            if other
                .restore_focus
                .is_some_and(|target| self.surface.contains(element, target))
            {
                other.restore_focus = restore;
            }
        }

        self.restack();

        if was_top {
            match restore.filter(|target| self.surface.exists(*target)) {
                Some(target) => self.surface.focus(target),
                None => self.focus_active(),
            }
        }

        if self.stack.is_empty() {
            self.scroll_lock.release(&mut self.surface);
        }
        debug!(overlay = %id, depth = self.stack.len(), "overlay closed");

        if let Some(hook) = self
            .overlays
            .get_mut(&id)
            .and_then(|o| o.options.on_close.as_mut())
        {
            hook(id);
        }
        true
    }

    fn focus_active(&mut self) {
        let first = self
            .active()
            .and_then(|id| self.overlays.get(&id))
            .and_then(|o| o.focus_trap.as_ref())
            .and_then(FocusTrap::first);
        match first {
            Some(element) => self.surface.focus(element),
            None => self.surface.blur(),
        }
    }

    /// Closes the overlay on top of the stack.
    pub fn close_active(&mut self) -> Option<OverlayId> {
        let id = self.active()?;
        self.close(id).then_some(id)
    }

    /// Closes every open overlay, top of the stack first.
    pub fn close_all(&mut self) {
        while let Some(id) = self.active() {
            self.close(id);
        }
    }

    /// Closes the overlay if it is open, then deregisters it and releases
    /// its elements.
    pub fn destroy(&mut self, id: OverlayId) -> bool {
        if !self.overlays.contains_key(&id) {
            trace!(overlay = %id, "destroy ignored: unknown overlay");
            return false;
        }
        self.close_inner(id);
        self.release(id);
        true
    }

    /// Destroys every registered overlay.
    pub fn destroy_all(&mut self) {
        self.close_all();
        let ids: Vec<OverlayId> = self.overlays.keys().copied().collect();
        for id in ids {
            self.release(id);
        }
    }

    fn release(&mut self, id: OverlayId) {
        if let Some(overlay) = self.overlays.remove(&id) {
            self.surface.remove(overlay.elements.root);
            debug!(overlay = %id, "overlay destroyed");
        }
    }

    /// Replaces the body of a registered overlay.
    ///
    /// The focus trap of an open overlay is recaptured; if the focused
    /// element was part of the old body, focus moves to the first focusable
    /// element.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the new content.
    pub fn update_content(&mut self, id: OverlayId, content: S::Content) -> Result<()> {
        let Some(overlay) = self.overlays.get_mut(&id) else {
            trace!(overlay = %id, "update ignored: unknown overlay");
            return Ok(());
        };
        self.surface.mount(overlay.elements.body, &content)?;
        overlay.content = content;

        if overlay.is_open {
            let element = overlay.elements.root;
            let trap = FocusTrap::capture(&self.surface, element);
            let focus_lost = self
                .surface
                .focused()
                .is_none_or(|focused| !self.surface.exists(focused));
            if focus_lost && self.stack.last() == Some(&id) {
                if let Some(first) = trap.first() {
                    self.surface.focus(first);
                }
            }
            overlay.focus_trap = Some(trap);
        }
        Ok(())
    }

    /// Sets or replaces the title of a registered overlay.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot create the title element.
    pub fn update_title(&mut self, id: OverlayId, title: &str) -> Result<()> {
        let Some(overlay) = self.overlays.get_mut(&id) else {
            trace!(overlay = %id, "title update ignored: unknown overlay");
            return Ok(());
        };
        match overlay.elements.title {
            Some(element) => self.surface.set_text(element, title),
            None => {
                let elements = overlay.elements;
                let heading = Self::render_title(
                    &mut self.surface,
                    id,
                    elements.root,
                    elements.header,
                    title,
                )?;
                overlay.elements.title = Some(heading);
            }
        }
        overlay.options.title = Some(title.to_string());
        Ok(())
    }

    /// Presses the confirm button of an open overlay.
    pub fn confirm(&mut self, id: OverlayId) -> Option<OverlayEvent> {
        let overlay = self.overlays.get_mut(&id).filter(|o| o.is_open)?;
        let value = overlay
            .value_field
            .as_deref()
            .and_then(|name| {
                self.surface
                    .find_by_attribute(overlay.elements.body, "name", name)
            })
            .and_then(|input| self.surface.value(input));
        if let Some(hook) = overlay.options.on_confirm.as_mut() {
            hook(id, value.as_deref());
        }
        self.close(id);
        Some(OverlayEvent::Confirmed { id, value })
    }

    /// Presses the cancel button of an open overlay.
    pub fn cancel(&mut self, id: OverlayId) -> Option<OverlayEvent> {
        let overlay = self.overlays.get_mut(&id).filter(|o| o.is_open)?;
        if let Some(hook) = overlay.options.on_cancel.as_mut() {
            hook(id);
        }
        self.close(id);
        Some(OverlayEvent::Cancelled(id))
    }

    /// Routes a click on `target` to the active overlay.
    ///
    /// Only a click on the backdrop itself dismisses. Clicks inside the
    /// overlay content never do.
    pub fn handle_click(&mut self, target: ElementId) -> Option<OverlayEvent> {
        let id = self.active()?;
        let overlay = self.overlays.get(&id)?;

        if Some(target) == self.backdrop {
            if overlay.options.dismiss_on_backdrop_click && self.close(id) {
                return Some(OverlayEvent::Closed(id));
            }
            return None;
        }
        if !self.surface.contains(overlay.elements.root, target) {
            return None;
        }

        let elements = overlay.elements;
        if Some(target) == elements.close {
            self.close(id);
            return Some(OverlayEvent::Closed(id));
        }
        if Some(target) == elements.confirm {
            return self.confirm(id);
        }
        if Some(target) == elements.cancel {
            return self.cancel(id);
        }

        let focusable = overlay
            .focus_trap
            .as_ref()
            .is_some_and(|trap| trap.elements().contains(&target));
        if focusable {
            self.surface.focus(target);
            return Some(OverlayEvent::Activated { id, element: target });
        }
        None
    }

    /// Routes a key press to the active overlay.
    pub fn handle_key(&mut self, key: Key) -> Option<OverlayEvent> {
        let id = self.active()?;
        let overlay = self.overlays.get(&id)?;
        match key {
            Key::Escape => {
                if overlay.options.dismiss_on_escape && self.close(id) {
                    Some(OverlayEvent::Closed(id))
                } else {
                    None
                }
            }
            Key::Tab { shift } => {
                let next = overlay
                    .focus_trap
                    .as_ref()?
                    .step(self.surface.focused(), shift)?;
                self.surface.focus(next);
                Some(OverlayEvent::FocusMoved(next))
            }
            Key::Enter => {
                let name = overlay.value_field.as_deref()?;
                let input = self
                    .surface
                    .find_by_attribute(overlay.elements.body, "name", name)?;
                if self.surface.focused() == Some(input) {
                    self.confirm(id)
                } else {
                    None
                }
            }
            Key::Other => None,
        }
    }

    /// Writes `value` into an input of the active overlay.
    pub fn set_input_value(&mut self, element: ElementId, value: &str) {
        let inside_active = self
            .active()
            .and_then(|id| self.overlays.get(&id))
            .is_some_and(|o| self.surface.contains(o.elements.root, element));
        if inside_active {
            self.surface.set_value(element, value);
        }
    }

    /// Records a page scroll. Ignored while the scroll lock is held.
    pub fn scroll_page(&mut self, offset: f32) {
        if self.scroll_lock.is_engaged() {
            trace!(offset, "page scroll ignored: scroll lock held");
            return;
        }
        self.surface.scroll_to(offset);
    }

    pub(crate) fn mark_transient(&mut self, id: OverlayId, value_field: Option<String>) {
        if let Some(overlay) = self.overlays.get_mut(&id) {
            overlay.transient = true;
            overlay.value_field = value_field;
        }
    }

    fn restack(&mut self) {
        let base = self.settings.z_index_base;
        for (position, id) in self.stack.iter().enumerate() {
            if let Some(overlay) = self.overlays.get(id) {
                let element = overlay.elements.root;
                self.surface
                    .set_z_index(element, base + 1 + position as i32);
                self.surface
                    .set_attribute(element, "data-stack-position", &position.to_string());
            }
        }

        if let Some(backdrop) = self.backdrop {
            match self.stack.last() {
                Some(active) => {
                    let top = base + self.stack.len() as i32;
                    self.surface.set_z_index(backdrop, top - 1);
                    self.surface
                        .set_attribute(backdrop, "data-active-modal", &active.to_string());
                    self.surface.set_visible(backdrop, true);
                }
                None => {
                    self.surface.set_z_index(backdrop, base);
                    self.surface.remove_attribute(backdrop, "data-active-modal");
                    self.surface.set_visible(backdrop, false);
                }
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: OverlayId) -> Option<&Overlay<S::Content>> {
        self.overlays.get(&id)
    }

    #[must_use]
    pub fn is_open(&self, id: OverlayId) -> bool {
        self.overlays.get(&id).is_some_and(|o| o.is_open)
    }

    /// The overlay eligible for Escape and backdrop dismissal.
    #[must_use]
    pub fn active(&self) -> Option<OverlayId> {
        self.stack.last().copied()
    }

    #[must_use]
    pub fn stack_position(&self, id: OverlayId) -> Option<usize> {
        self.stack.iter().position(|open| *open == id)
    }

    /// Open overlays, bottom of the stack first.
    #[must_use]
    pub fn open_overlays(&self) -> &[OverlayId] {
        &self.stack
    }

    #[must_use]
    pub fn open_count(&self) -> usize {
        self.stack.len()
    }

    /// Number of registered overlays, open or closed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_engaged()
    }

    #[must_use]
    pub fn backdrop(&self) -> Option<ElementId> {
        self.backdrop
    }

    #[must_use]
    pub fn settings(&self) -> RegistrySettings {
        self.settings
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, Node};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn registry() -> Registry<MemorySurface> {
        Registry::new(MemorySurface::new()).unwrap()
    }

    fn form() -> Node {
        Node::group(vec![
            Node::input("lab-name", ""),
            Node::input("capacity", "24"),
            Node::button("save", "Save"),
        ])
    }

    #[test]
    fn create_registers_a_hidden_closed_overlay() {
        let mut registry = registry();
        let id = registry.create(Node::text("body"), OverlayOptions::default()).unwrap();

        let overlay = registry.get(id).unwrap();
        assert!(!overlay.is_open());
        assert!(!registry.surface().element(overlay.element()).unwrap().is_visible());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.open_count(), 0);
    }

    #[test]
    fn ids_are_unique() {
        let mut registry = registry();
        let a = registry.create(Node::text("a"), OverlayOptions::default()).unwrap();
        let b = registry.create(Node::text("b"), OverlayOptions::default()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn overlay_element_carries_dialog_semantics() {
        let mut registry = registry();
        let id = registry
            .create(Node::text("body"), OverlayOptions::new().title("<Edit> lab"))
            .unwrap();
        let overlay = registry.get(id).unwrap();
        let surface = registry.surface();
        let element = surface.element(overlay.element()).unwrap();

        assert_eq!(element.attribute("role"), Some("dialog"));
        assert_eq!(element.attribute("aria-modal"), Some("true"));
        assert!(element.has_class("modal-md"));

        let labelled_by = element.attribute("aria-labelledby").unwrap();
        let title = surface
            .find_by_attribute(overlay.element(), "id", labelled_by)
            .unwrap();
        assert_eq!(surface.element(title).unwrap().markup(), "&lt;Edit&gt; lab");
    }

    #[test]
    fn open_focuses_the_first_focusable_element() {
        let mut registry = registry();
        let id = registry
            .create(form(), OverlayOptions::new().show_close_control(false))
            .unwrap();
        registry.open(id);

        let trap = registry.get(id).unwrap().focus_trap().unwrap().clone();
        assert_eq!(trap.elements().len(), 3);
        assert_eq!(registry.surface().focused(), trap.first());
    }

    #[test]
    fn open_twice_does_not_double_stack() {
        let mut registry = registry();
        let id = registry.create(Node::text("x"), OverlayOptions::default()).unwrap();
        assert!(registry.open(id));
        assert!(!registry.open(id));
        assert_eq!(registry.open_count(), 1);
    }

    #[test]
    fn z_index_follows_stack_position() {
        let mut registry = registry();
        let a = registry.create(Node::text("a"), OverlayOptions::default()).unwrap();
        let b = registry.create(Node::text("b"), OverlayOptions::default()).unwrap();
        registry.open(a);
        registry.open(b);

        let surface = registry.surface();
        let z = |id| surface.element(registry.get(id).unwrap().element()).unwrap().z_index();
        assert_eq!(z(a), 1001);
        assert_eq!(z(b), 1002);

        let backdrop = surface.element(registry.backdrop().unwrap()).unwrap();
        assert!(backdrop.is_visible());
        assert_eq!(backdrop.z_index(), 1001);
    }

    #[test]
    fn closing_the_lower_overlay_renumbers_the_stack() {
        let mut registry = registry();
        let a = registry.create(Node::text("a"), OverlayOptions::default()).unwrap();
        let b = registry.create(Node::text("b"), OverlayOptions::default()).unwrap();
        let c = registry.create(Node::text("c"), OverlayOptions::default()).unwrap();
        registry.open(a);
        registry.open(b);
        registry.open(c);

        registry.close(a);

        assert_eq!(registry.stack_position(b), Some(0));
        assert_eq!(registry.stack_position(c), Some(1));
        assert_eq!(registry.stack_position(a), None);
        assert_eq!(registry.active(), Some(c));
        let element = registry.get(b).unwrap().element();
        assert_eq!(
            registry
                .surface()
                .element(element)
                .unwrap()
                .attribute("data-stack-position"),
            Some("0")
        );
    }

    #[test]
    fn escape_respects_dismiss_on_escape() {
        let mut registry = registry();
        let id = registry
            .create(Node::text("x"), OverlayOptions::new().dismiss_on_escape(false))
            .unwrap();
        registry.open(id);

        assert_eq!(registry.handle_key(Key::Escape), None);
        assert!(registry.is_open(id));
    }

    #[test]
    fn escape_closes_only_the_active_overlay() {
        let mut registry = registry();
        let a = registry.create(Node::text("a"), OverlayOptions::default()).unwrap();
        let b = registry.create(Node::text("b"), OverlayOptions::default()).unwrap();
        registry.open(a);
        registry.open(b);

        assert_eq!(registry.handle_key(Key::Escape), Some(OverlayEvent::Closed(b)));
        assert!(registry.is_open(a));
        assert!(!registry.is_open(b));
    }

    #[test]
    fn backdrop_click_dismisses_but_content_click_does_not() {
        let mut registry = registry();
        let id = registry.create(form(), OverlayOptions::default()).unwrap();
        registry.open(id);
        let body = registry.get(id).unwrap().body();

        assert_eq!(registry.handle_click(body), None);
        assert!(registry.is_open(id));

        let backdrop = registry.backdrop().unwrap();
        assert_eq!(registry.handle_click(backdrop), Some(OverlayEvent::Closed(id)));
        assert!(!registry.is_open(id));
    }

    #[test]
    fn backdrop_click_respects_option() {
        let mut registry = registry();
        let id = registry
            .create(
                Node::text("x"),
                OverlayOptions::new().dismiss_on_backdrop_click(false),
            )
            .unwrap();
        registry.open(id);

        let backdrop = registry.backdrop().unwrap();
        assert_eq!(registry.handle_click(backdrop), None);
        assert!(registry.is_open(id));
    }

    #[test]
    fn scroll_lock_restores_the_exact_offset() {
        let mut registry = registry();
        registry.scroll_page(345.5);
        let a = registry.create(Node::text("a"), OverlayOptions::default()).unwrap();
        let b = registry.create(Node::text("b"), OverlayOptions::default()).unwrap();

        registry.open(a);
        registry.open(b);
        assert!(registry.is_scroll_locked());
        assert!(registry.surface().is_scroll_locked());
        registry.scroll_page(0.0);

        registry.close(a);
        assert!(registry.is_scroll_locked());
        registry.close(b);
        assert!(!registry.is_scroll_locked());
        assert_eq!(registry.surface().scroll_offset(), 345.5);
    }

    #[test]
    fn locked_registry_ignores_page_scroll_on_any_surface() {
        let mut registry = registry();
        registry.scroll_page(120.0);
        let id = registry.create(Node::text("a"), OverlayOptions::default()).unwrap();
        registry.open(id);

        // A surface that does not enforce the lock itself.
        registry.surface.set_scroll_locked(false);
        registry.scroll_page(800.0);
        assert_eq!(registry.surface().scroll_offset(), 120.0);

        registry.close(id);
        registry.scroll_page(64.0);
        assert_eq!(registry.surface().scroll_offset(), 64.0);
    }

    #[test]
    fn tab_cycles_inside_the_overlay() {
        let mut registry = registry();
        let id = registry
            .create(form(), OverlayOptions::new().show_close_control(false))
            .unwrap();
        registry.open(id);
        let trap = registry.get(id).unwrap().focus_trap().unwrap().clone();
        let e = trap.elements();

        registry.handle_key(Key::Tab { shift: false });
        registry.handle_key(Key::Tab { shift: false });
        assert_eq!(registry.surface().focused(), Some(e[2]));
        assert_eq!(
            registry.handle_key(Key::Tab { shift: false }),
            Some(OverlayEvent::FocusMoved(e[0]))
        );
        registry.handle_key(Key::Tab { shift: true });
        assert_eq!(registry.surface().focused(), Some(e[2]));
    }

    #[test]
    fn close_restores_previous_focus() {
        let mut registry = registry();
        let page_button = registry
            .create(Node::button("open", "Open"), OverlayOptions::default())
            .unwrap();
        registry.open(page_button);
        let opener = registry.surface().focused().unwrap();

        let dialog = registry.create(form(), OverlayOptions::default()).unwrap();
        registry.open(dialog);
        assert_ne!(registry.surface().focused(), Some(opener));

        registry.close(dialog);
        assert_eq!(registry.surface().focused(), Some(opener));
    }

    #[test]
    fn lifecycle_hooks_fire_once_per_transition() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (on_open, on_close) = (Rc::clone(&log), Rc::clone(&log));
        let mut registry = registry();
        let id = registry
            .create(
                Node::text("x"),
                OverlayOptions::new()
                    .on_open(move |_| on_open.borrow_mut().push("open"))
                    .on_close(move |_| on_close.borrow_mut().push("close")),
            )
            .unwrap();

        registry.open(id);
        registry.open(id);
        registry.close(id);
        registry.close(id);

        assert_eq!(*log.borrow(), vec!["open", "close"]);
    }

    #[test]
    fn destroy_releases_elements_and_ignores_later_calls() {
        let mut registry = registry();
        let id = registry.create(form(), OverlayOptions::default()).unwrap();
        let element = registry.get(id).unwrap().element();
        registry.open(id);

        assert!(registry.destroy(id));
        assert!(!registry.surface().exists(element));
        assert!(!registry.is_scroll_locked());

        assert!(!registry.open(id));
        assert!(!registry.close(id));
        assert!(!registry.destroy(id));
        assert!(registry.update_content(id, Node::text("y")).is_ok());
        assert!(registry.update_title(id, "y").is_ok());
        assert_eq!(registry.confirm(id), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn update_content_recaptures_focus_trap() {
        let mut registry = registry();
        let id = registry
            .create(Node::button("a", "A"), OverlayOptions::new().show_close_control(false))
            .unwrap();
        registry.open(id);

        registry.update_content(id, form()).unwrap();

        let trap = registry.get(id).unwrap().focus_trap().unwrap();
        assert_eq!(trap.elements().len(), 3);
        assert_eq!(registry.surface().focused(), trap.first());
    }

    #[test]
    fn update_title_creates_missing_heading() {
        let mut registry = registry();
        let id = registry.create(Node::text("x"), OverlayOptions::default()).unwrap();
        registry.update_title(id, "Reservations").unwrap();

        let overlay = registry.get(id).unwrap();
        assert_eq!(overlay.options().title.as_deref(), Some("Reservations"));
        let element = registry.surface().element(overlay.element()).unwrap();
        assert!(element.attribute("aria-labelledby").is_some());
    }

    #[test]
    fn unavailable_surface_is_reported_on_create() {
        let mut surface = MemorySurface::new();
        surface.set_available(false);
        assert!(Registry::new(surface).is_err());

        let settings = RegistrySettings {
            z_index_base: 10,
            backdrop: false,
        };
        let mut registry = Registry::with_settings(MemorySurface::new(), settings).unwrap();
        assert!(registry.backdrop().is_none());
        let id = registry.create(Node::text("x"), OverlayOptions::default()).unwrap();
        registry.open(id);
        let element = registry.get(id).unwrap().element();
        assert_eq!(registry.surface().element(element).unwrap().z_index(), 11);
    }

    #[test]
    fn close_all_closes_top_first() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut registry = registry();
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            let id = registry
                .create(
                    Node::text(name),
                    OverlayOptions::new().on_close(move |id| order.borrow_mut().push(id)),
                )
                .unwrap();
            registry.open(id);
            ids.push(id);
        }

        registry.close_all();

        ids.reverse();
        assert_eq!(*order.borrow(), ids);
        assert_eq!(registry.open_count(), 0);
        assert_eq!(registry.len(), 3);
        assert!(!registry
            .surface()
            .element(registry.backdrop().unwrap())
            .unwrap()
            .is_visible());
    }
}
