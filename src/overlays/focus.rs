// SPDX-License-Identifier: MPL-2.0
//! Keyboard focus trap for an open overlay.

use crate::surface::{ElementId, RenderSurface};

/// Ordered focusable elements of one overlay.
///
/// The list is captured when the overlay opens and recaptured whenever its
/// content changes, so Tab never leaves the overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTrap {
    elements: Vec<ElementId>,
}

impl FocusTrap {
    /// Captures the focusable descendants of `scope`.
    pub fn capture<S: RenderSurface + ?Sized>(surface: &S, scope: ElementId) -> Self {
        Self {
            elements: surface.focusable_descendants(scope),
        }
    }

    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<ElementId> {
        self.elements.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<ElementId> {
        self.elements.last().copied()
    }

    /// Element that should receive focus after Tab (or Shift+Tab when
    /// `backwards`) from `current`.
    ///
    /// Wraps at both ends. Focus outside the trap is pulled back to the
    /// first element going forward and to the last going backward.
    #[must_use]
    pub fn step(&self, current: Option<ElementId>, backwards: bool) -> Option<ElementId> {
        let len = self.elements.len();
        if len == 0 {
            return None;
        }
        let position = current.and_then(|c| self.elements.iter().position(|e| *e == c));
        let index = match (position, backwards) {
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
            (None, false) => 0,
            (None, true) => len - 1,
        };
        Some(self.elements[index])
    }
}
