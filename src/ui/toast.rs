// SPDX-License-Identifier: MPL-2.0
//! Toast cards for the live notifications of a [`Manager`].
//!
//! Toasts appear as small cards with severity-colored accents, stacked in
//! the corner chosen by the queue's [`Position`]. Hovering a toast holds
//! its countdown.

use crate::clock::Clock;
use crate::notifications::{LiveNotification, Manager, NotificationMessage, Position};
use crate::surface::{ElementId, MemorySurface, RenderSurface};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::surface_view::strip_markup;
use crate::ui::theming::ColorScheme;
use iced::widget::{button, container, mouse_area, progress_bar, text, Column, Container, Row};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone, PartialEq)]
pub enum ToastMessage {
    /// A toast element was pressed: resolved by [`Manager::handle_click`].
    Pressed(ElementId),
    Queue(NotificationMessage),
}

/// Window alignment of the toast column.
#[must_use]
pub fn alignment_for(position: Position) -> (alignment::Horizontal, alignment::Vertical) {
    let horizontal = match position {
        Position::TopLeft | Position::BottomLeft => alignment::Horizontal::Left,
        Position::TopCenter | Position::BottomCenter => alignment::Horizontal::Center,
        Position::TopRight | Position::BottomRight => alignment::Horizontal::Right,
    };
    let vertical = if position.is_top() {
        alignment::Vertical::Top
    } else {
        alignment::Vertical::Bottom
    };
    (horizontal, vertical)
}

/// Share of the lifetime left, in `0.0..=1.0`. `None` for persistent toasts.
#[must_use]
pub fn remaining_fraction<C: Clock>(
    manager: &Manager<MemorySurface, C>,
    notification: &LiveNotification,
) -> Option<f32> {
    if notification.is_persistent() || notification.duration().is_zero() {
        return None;
    }
    let remaining = manager.remaining(notification.id())?;
    Some((remaining.as_secs_f32() / notification.duration().as_secs_f32()).clamp(0.0, 1.0))
}

/// Wall time the toast appeared, as `HH:MM`.
#[must_use]
pub fn shown_label(notification: &LiveNotification) -> String {
    notification.shown_at().format("%H:%M").to_string()
}

fn toast<'a, C: Clock>(
    manager: &'a Manager<MemorySurface, C>,
    notification: &'a LiveNotification,
    colors: &ColorScheme,
) -> Element<'a, ToastMessage> {
    let id = notification.id();
    let root = notification.element();
    let accent = colors.severity(notification.severity());

    let message = if notification.is_raw() {
        strip_markup(notification.text())
    } else {
        notification.text().to_string()
    };

    let dismiss = button(text("\u{00d7}").size(typography::TITLE_SM))
        .on_press(ToastMessage::Pressed(notification.elements.close))
        .padding(spacing::XXS)
        .style(styles::button::dismiss(false));

    let header = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(
            text(notification.severity().icon())
                .size(typography::TITLE_SM)
                .color(accent),
        )
        .push(
            Container::new(text(message).size(typography::BODY))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Left),
        )
        .push(
            text(shown_label(notification))
                .size(typography::CAPTION)
                .color(colors.text_secondary),
        )
        .push(dismiss);

    let mut card = Column::new().spacing(spacing::XS).push(header);

    if !notification.actions().is_empty() {
        let surface = manager.surface();
        let actions = notification.actions().iter().filter_map(|action| {
            let element = surface.find_by_attribute(root, "data-action", &action.name)?;
            Some(Element::from(
                button(text(action.label.clone()).size(typography::BODY_SM))
                    .on_press(ToastMessage::Pressed(element))
                    .padding([spacing::XXS, spacing::SM])
                    .style(styles::button::secondary(false)),
            ))
        });
        card = card.push(
            Row::with_children(actions)
                .spacing(spacing::XS)
                .align_y(alignment::Vertical::Center),
        );
    }

    if let Some(fraction) = remaining_fraction(manager, notification) {
        card = card.push(
            container(progress_bar(0.0..=1.0, fraction))
                .height(Length::Fixed(sizing::TOAST_PROGRESS_HEIGHT)),
        );
    }

    let card = Container::new(card)
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(styles::container::toast(accent));

    mouse_area(card)
        .on_press(ToastMessage::Pressed(root))
        .on_enter(ToastMessage::Queue(NotificationMessage::Pause(id)))
        .on_exit(ToastMessage::Queue(NotificationMessage::Resume(id)))
        .into()
}

/// Full-window layer holding every live toast, oldest first.
pub fn view_overlay<'a, C: Clock>(
    manager: &'a Manager<MemorySurface, C>,
    colors: &ColorScheme,
) -> Option<Element<'a, ToastMessage>> {
    if manager.is_empty() {
        return None;
    }
    let (horizontal, vertical) = alignment_for(manager.settings().position);
    let toasts = manager.iter().map(|n| toast(manager, n, colors));

    Some(
        Container::new(
            Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(horizontal),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(horizontal)
        .align_y(vertical)
        .padding(spacing::MD)
        .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::notifications::QueueSettings;
    use std::time::Duration;

    fn manager() -> (Manager<MemorySurface, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let manager =
            Manager::with_clock(MemorySurface::new(), clock.clone(), QueueSettings::default())
                .unwrap();
        (manager, clock)
    }

    #[test]
    fn positions_map_to_corners() {
        assert_eq!(
            alignment_for(Position::TopRight),
            (alignment::Horizontal::Right, alignment::Vertical::Top)
        );
        assert_eq!(
            alignment_for(Position::BottomCenter),
            (alignment::Horizontal::Center, alignment::Vertical::Bottom)
        );
    }

    #[test]
    fn countdown_fraction_follows_the_clock() {
        let (mut manager, clock) = manager();
        let id = manager.info("Lab 2 reserved", Some(Duration::from_secs(4))).unwrap();
        clock.advance(Duration::from_secs(1));

        let live = manager.get(id).unwrap();
        let fraction = remaining_fraction(&manager, live).unwrap();
        assert!((fraction - 0.75).abs() < 1e-3);
    }

    #[test]
    fn shown_label_is_hours_and_minutes() {
        let (mut manager, _clock) = manager();
        let id = manager.success("Booking approved", None).unwrap();
        let live = manager.get(id).unwrap();

        let label = shown_label(live);
        assert_eq!(label, live.shown_at().format("%H:%M").to_string());
        assert_eq!(label.len(), 5);
        assert_eq!(label.as_bytes()[2], b':');
    }

    #[test]
    fn persistent_toasts_have_no_countdown() {
        let (mut manager, _clock) = manager();
        let id = manager.loading("Syncing calendar", None).unwrap();
        let live = manager.get(id).unwrap();
        assert_eq!(remaining_fraction(&manager, live), None);
    }
}
