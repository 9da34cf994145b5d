// SPDX-License-Identifier: MPL-2.0
//! Ready-made dialogs built on the registry.
//!
//! Each preset creates and opens an overlay in one call. The overlay is
//! released as soon as it closes, whichever way it closes.

use super::overlay::{OverlayId, OverlayOptions, OverlaySize};
use super::registry::Registry;
use crate::error::Result;
use crate::surface::{Node, RenderSurface};

/// Name of the input a prompt dialog reports on confirm.
pub const PROMPT_FIELD: &str = "prompt-value";

impl<S: RenderSurface<Content = Node>> Registry<S> {
    /// Asks a yes/no question.
    ///
    /// Missing title and button labels fall back to English defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the dialog.
    pub fn show_confirm(&mut self, message: &str, options: OverlayOptions) -> Result<OverlayId> {
        let options = with_defaults(options, "Confirmation", "Confirm", Some("Cancel"));
        self.show_preset(Node::text(message), options, None)
    }

    /// Shows a message with a single acknowledgement button.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the dialog.
    pub fn show_alert(&mut self, message: &str, options: OverlayOptions) -> Result<OverlayId> {
        let options = with_defaults(options, "Alert", "OK", None);
        self.show_preset(Node::text(message), options, None)
    }

    /// Asks for one line of text. The value is reported in
    /// [`OverlayEvent::Confirmed`](super::OverlayEvent::Confirmed) and
    /// passed to `on_confirm`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the dialog.
    pub fn show_prompt(
        &mut self,
        message: &str,
        default_value: &str,
        placeholder: &str,
        options: OverlayOptions,
    ) -> Result<OverlayId> {
        let options = with_defaults(options, "Prompt", "OK", Some("Cancel"));
        let content = Node::group(vec![
            Node::text(message),
            Node::Input {
                name: PROMPT_FIELD.to_string(),
                value: default_value.to_string(),
                placeholder: placeholder.to_string(),
            },
        ]);
        self.show_preset(content, options, Some(PROMPT_FIELD.to_string()))
    }

    /// Shows a blocking progress dialog. It cannot be dismissed by the
    /// user; the caller closes it by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot render the dialog.
    pub fn show_loading(&mut self, message: &str, options: OverlayOptions) -> Result<OverlayId> {
        let mut options = options
            .show_close_control(false)
            .dismiss_on_backdrop_click(false)
            .dismiss_on_escape(false)
            .size(OverlaySize::Small);
        if options.title.is_none() {
            options.title = Some("Please Wait".to_string());
        }
        let content = Node::group(vec![Node::markup(SPINNER), Node::text(message)]);
        self.show_preset(content, options, None)
    }

    fn show_preset(
        &mut self,
        content: Node,
        options: OverlayOptions,
        value_field: Option<String>,
    ) -> Result<OverlayId> {
        let id = self.create(content, options)?;
        self.mark_transient(id, value_field);
        self.open(id);
        Ok(id)
    }
}

const SPINNER: &str = r#"<div class="loading-spinner" role="progressbar"></div>"#;

fn with_defaults(
    mut options: OverlayOptions,
    title: &str,
    confirm: &str,
    cancel: Option<&str>,
) -> OverlayOptions {
    if options.title.is_none() {
        options.title = Some(title.to_string());
    }
    if options.confirm_label.is_none() {
        options.confirm_label = Some(confirm.to_string());
    }
    if options.cancel_label.is_none() {
        options.cancel_label = cancel.map(str::to_string);
    }
    options
}
