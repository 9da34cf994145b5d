// SPDX-License-Identifier: MPL-2.0
//! Overlay data: identifiers, size classes, options and the registered
//! record.

use super::focus::FocusTrap;
use crate::surface::ElementId;
use std::fmt;

/// Identifier of a registered overlay, unique within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub(crate) u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modal-{}", self.0)
    }
}

/// Width class of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlaySize {
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
    Full,
}

impl OverlaySize {
    /// Class recorded on the overlay element.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            OverlaySize::Small => "modal-sm",
            OverlaySize::Medium => "modal-md",
            OverlaySize::Large => "modal-lg",
            OverlaySize::XLarge => "modal-xl",
            OverlaySize::Full => "modal-full",
        }
    }

    /// Parses the class written by [`OverlaySize::class_name`].
    #[must_use]
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "modal-sm" => Some(OverlaySize::Small),
            "modal-md" => Some(OverlaySize::Medium),
            "modal-lg" => Some(OverlaySize::Large),
            "modal-xl" => Some(OverlaySize::XLarge),
            "modal-full" => Some(OverlaySize::Full),
            _ => None,
        }
    }

    /// Maximum dialog width in logical pixels. `None` fills the window.
    #[must_use]
    pub fn max_width(self) -> Option<f32> {
        match self {
            OverlaySize::Small => Some(400.0),
            OverlaySize::Medium => Some(500.0),
            OverlaySize::Large => Some(700.0),
            OverlaySize::XLarge => Some(900.0),
            OverlaySize::Full => None,
        }
    }
}

pub type LifecycleHook = Box<dyn FnMut(OverlayId)>;
pub type ConfirmHook = Box<dyn FnMut(OverlayId, Option<&str>)>;

/// Configuration for [`Registry::create`](super::Registry::create).
pub struct OverlayOptions {
    pub title: Option<String>,
    pub size: OverlaySize,
    pub dismiss_on_backdrop_click: bool,
    pub dismiss_on_escape: bool,
    pub show_close_control: bool,
    /// Label of the footer confirm button; no button when `None`.
    pub confirm_label: Option<String>,
    /// Label of the footer cancel button; no button when `None`.
    pub cancel_label: Option<String>,
    pub(crate) on_open: Option<LifecycleHook>,
    pub(crate) on_close: Option<LifecycleHook>,
    pub(crate) on_confirm: Option<ConfirmHook>,
    pub(crate) on_cancel: Option<LifecycleHook>,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            title: None,
            size: OverlaySize::default(),
            dismiss_on_backdrop_click: true,
            dismiss_on_escape: true,
            show_close_control: true,
            confirm_label: None,
            cancel_label: None,
            on_open: None,
            on_close: None,
            on_confirm: None,
            on_cancel: None,
        }
    }
}

impl fmt::Debug for OverlayOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayOptions")
            .field("title", &self.title)
            .field("size", &self.size)
            .field("dismiss_on_backdrop_click", &self.dismiss_on_backdrop_click)
            .field("dismiss_on_escape", &self.dismiss_on_escape)
            .field("show_close_control", &self.show_close_control)
            .field("confirm_label", &self.confirm_label)
            .field("cancel_label", &self.cancel_label)
            .finish_non_exhaustive()
    }
}

impl OverlayOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn size(mut self, size: OverlaySize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn dismiss_on_backdrop_click(mut self, enabled: bool) -> Self {
        self.dismiss_on_backdrop_click = enabled;
        self
    }

    #[must_use]
    pub fn dismiss_on_escape(mut self, enabled: bool) -> Self {
        self.dismiss_on_escape = enabled;
        self
    }

    #[must_use]
    pub fn show_close_control(mut self, enabled: bool) -> Self {
        self.show_close_control = enabled;
        self
    }

    #[must_use]
    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }

    /// Runs after the overlay enters the stack.
    #[must_use]
    pub fn on_open(mut self, hook: impl FnMut(OverlayId) + 'static) -> Self {
        self.on_open = Some(Box::new(hook));
        self
    }

    /// Runs after the overlay leaves the stack.
    #[must_use]
    pub fn on_close(mut self, hook: impl FnMut(OverlayId) + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }

    /// Runs when the confirm button is pressed, with the prompt value if any.
    #[must_use]
    pub fn on_confirm(mut self, hook: impl FnMut(OverlayId, Option<&str>) + 'static) -> Self {
        self.on_confirm = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_cancel(mut self, hook: impl FnMut(OverlayId) + 'static) -> Self {
        self.on_cancel = Some(Box::new(hook));
        self
    }
}

/// Elements the registry created for one overlay.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OverlayElements {
    pub root: ElementId,
    pub header: ElementId,
    pub title: Option<ElementId>,
    pub close: Option<ElementId>,
    pub body: ElementId,
    pub confirm: Option<ElementId>,
    pub cancel: Option<ElementId>,
}

/// A registered overlay.
pub struct Overlay<C> {
    pub(crate) id: OverlayId,
    pub(crate) content: C,
    pub(crate) options: OverlayOptions,
    pub(crate) is_open: bool,
    pub(crate) elements: OverlayElements,
    pub(crate) focus_trap: Option<FocusTrap>,
    pub(crate) restore_focus: Option<ElementId>,
    /// Name of the input whose value is reported on confirm.
    pub(crate) value_field: Option<String>,
    /// Dialog presets are destroyed once answered.
    pub(crate) transient: bool,
}

impl<C> Overlay<C> {
    #[must_use]
    pub fn id(&self) -> OverlayId {
        self.id
    }

    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    #[must_use]
    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Root element on the render surface.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.elements.root
    }

    #[must_use]
    pub fn body(&self) -> ElementId {
        self.elements.body
    }

    #[must_use]
    pub fn focus_trap(&self) -> Option<&FocusTrap> {
        self.focus_trap.as_ref()
    }
}

impl<C: fmt::Debug> fmt::Debug for Overlay<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlay")
            .field("id", &self.id)
            .field("content", &self.content)
            .field("options", &self.options)
            .field("is_open", &self.is_open)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_allow_every_dismissal() {
        let options = OverlayOptions::default();
        assert!(options.dismiss_on_backdrop_click);
        assert!(options.dismiss_on_escape);
        assert!(options.show_close_control);
        assert_eq!(options.size, OverlaySize::Medium);
        assert!(options.title.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let options = OverlayOptions::new()
            .title("New lab")
            .size(OverlaySize::Large)
            .dismiss_on_escape(false)
            .confirm_label("Save");

        assert_eq!(options.title.as_deref(), Some("New lab"));
        assert_eq!(options.size, OverlaySize::Large);
        assert!(!options.dismiss_on_escape);
        assert_eq!(options.confirm_label.as_deref(), Some("Save"));
        assert!(options.cancel_label.is_none());
    }

    #[test]
    fn size_classes_round_trip() {
        for size in [
            OverlaySize::Small,
            OverlaySize::Medium,
            OverlaySize::Large,
            OverlaySize::XLarge,
            OverlaySize::Full,
        ] {
            assert_eq!(OverlaySize::from_class(size.class_name()), Some(size));
        }
        assert_eq!(OverlaySize::from_class("modal"), None);
    }

    #[test]
    fn widths_grow_with_size() {
        let small = OverlaySize::Small.max_width().unwrap();
        let xlarge = OverlaySize::XLarge.max_width().unwrap();
        assert!(xlarge > small);
        assert!(OverlaySize::Full.max_width().is_none());
    }
}
