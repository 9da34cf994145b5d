// SPDX-License-Identifier: MPL-2.0
//! Draws a subtree of a [`MemorySurface`] with iced widgets.
//!
//! Presses and edits are reported as [`SurfaceMessage`]s carrying the
//! element id, so the component that owns the element resolves them.

use crate::surface::{Element as SurfaceElement, ElementId, ElementKind, MemorySurface, RenderSurface};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, text, text_input, Column, Row, Space};
use iced::{alignment, Color, Element, Length};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceMessage {
    Click(ElementId),
    Input(ElementId, String),
    Submit(ElementId),
}

/// Values the tree itself does not carry.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext {
    pub spinner_rotation: f32,
    pub accent: Color,
}

/// Containers laid out horizontally.
const ROW_CLASSES: [&str; 3] = ["modal-header", "modal-footer", "notification-actions"];

/// Renders `id` and its visible descendants. Hidden or missing elements
/// render as nothing.
pub fn view<'a>(
    surface: &'a MemorySurface,
    id: ElementId,
    ctx: ViewContext,
) -> Element<'a, SurfaceMessage> {
    let Some(element) = surface.element(id).filter(|el| el.is_visible()) else {
        return Space::new().into();
    };
    let focused = surface.focused() == Some(id);

    match element.kind() {
        ElementKind::Container => container_view(surface, element, ctx),
        ElementKind::Heading => text(element.text().to_string())
            .size(typography::TITLE_MD)
            .into(),
        ElementKind::Paragraph | ElementKind::Icon => paragraph(element, ctx),
        ElementKind::Button if element.has_class("modal-close") => {
            button(text(element.text().to_string()).size(typography::TITLE_SM))
                .on_press(SurfaceMessage::Click(id))
                .padding(spacing::XXS)
                .style(styles::button::dismiss(focused))
                .into()
        }
        ElementKind::Button => {
            let label = button(text(element.text().to_string()).size(typography::BODY))
                .on_press(SurfaceMessage::Click(id))
                .padding([spacing::XS, spacing::MD]);
            if element.has_class("modal-confirm") {
                label.style(styles::button::primary(focused)).into()
            } else {
                label.style(styles::button::secondary(focused)).into()
            }
        }
        ElementKind::Link => button(text(element.text().to_string()).size(typography::BODY))
            .on_press(SurfaceMessage::Click(id))
            .padding(0)
            .style(styles::button::link(focused))
            .into(),
        ElementKind::Input => {
            let placeholder = element.attribute("placeholder").unwrap_or_default();
            text_input(placeholder, element.value())
                .on_input(move |value| SurfaceMessage::Input(id, value))
                .on_submit(SurfaceMessage::Submit(id))
                .padding(spacing::XS)
                .size(typography::BODY_LG)
                .width(Length::Fill)
                .into()
        }
        ElementKind::Progress => Space::new().into(),
    }
}

fn container_view<'a>(
    surface: &'a MemorySurface,
    element: &'a SurfaceElement,
    ctx: ViewContext,
) -> Element<'a, SurfaceMessage> {
    let children = element
        .children()
        .iter()
        .map(|child| view(surface, *child, ctx));

    if ROW_CLASSES.iter().any(|class| element.has_class(class)) {
        let row = Row::with_children(children)
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center);
        // Header: title left, close control right. Footer: buttons right.
        if element.has_class("modal-header") || element.has_class("modal-footer") {
            row.push(Space::new().width(Length::Fill)).into()
        } else {
            row.into()
        }
    } else {
        Column::with_children(children).spacing(spacing::SM).into()
    }
}

fn paragraph<'a>(element: &'a SurfaceElement, ctx: ViewContext) -> Element<'a, SurfaceMessage> {
    if !element.is_raw() {
        return text(element.text().to_string()).size(typography::BODY).into();
    }
    if element.markup().contains("loading-spinner") {
        return AnimatedSpinner::new(ctx.accent, ctx.spinner_rotation)
            .size(sizing::ICON_XL)
            .into_element();
    }
    text(strip_markup(element.markup()))
        .size(typography::BODY)
        .into()
}

/// Plain text of a markup fragment: tags dropped, common entities decoded.
#[must_use]
pub fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
