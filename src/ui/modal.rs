// SPDX-License-Identifier: MPL-2.0
//! Layers for the open overlays of a [`Registry`].
//!
//! Overlays are drawn in stack order. The backdrop goes directly beneath
//! the active overlay and swallows pointer input, so lower overlays and the
//! page behind them stop receiving clicks and wheel scrolling.

use crate::overlays::{OverlayId, Registry};
use crate::surface::MemorySurface;
use crate::ui::design_tokens::spacing;
use crate::ui::styles;
use crate::ui::surface_view::{self, SurfaceMessage, ViewContext};
use iced::widget::{container, mouse_area, opaque, Space};
use iced::{Color, Element, Length};

/// One element per layer, bottom first. Empty while nothing is open.
pub fn layers<'a>(
    registry: &'a Registry<MemorySurface>,
    backdrop_color: Color,
    ctx: ViewContext,
) -> Vec<Element<'a, SurfaceMessage>> {
    let stack = registry.open_overlays();
    let mut layers = Vec::with_capacity(stack.len() + 1);

    for (position, id) in stack.iter().enumerate() {
        if position + 1 == stack.len() {
            if let Some(backdrop) = registry.backdrop() {
                let layer = mouse_area(
                    container(Space::new())
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .style(styles::container::backdrop(backdrop_color)),
                )
                .on_press(SurfaceMessage::Click(backdrop));
                layers.push(opaque(layer));
            }
        }
        if let Some(card) = card(registry, *id, ctx) {
            layers.push(card);
        }
    }
    layers
}

fn card<'a>(
    registry: &'a Registry<MemorySurface>,
    id: OverlayId,
    ctx: ViewContext,
) -> Option<Element<'a, SurfaceMessage>> {
    let overlay = registry.get(id)?;
    let root = overlay.element();
    let content = surface_view::view(registry.surface(), root, ctx);

    let panel = container(content)
        .padding(spacing::LG)
        .style(styles::container::modal_card);
    let panel = match overlay.options().size.max_width() {
        Some(max_width) => panel.width(Length::Fill).max_width(max_width),
        None => panel.width(Length::Fill).height(Length::Fill),
    };

    // Presses on the card itself must not reach the backdrop.
    let panel = mouse_area(panel).on_press(SurfaceMessage::Click(root));

    Some(
        container(panel)
            .center(Length::Fill)
            .padding(spacing::XL)
            .into(),
    )
}
