// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard input is routed explicitly: the render surfaces keep their own
//! focus, so Escape, Tab and Enter are forwarded as [`Key`]s instead of
//! being left to iced's widget focus.

use super::Message;
use crate::app::config::TICK_INTERVAL_MS;
use crate::surface::Key;
use iced::keyboard::{self, key::Named};
use iced::{event, time, window, Event, Subscription};
use std::time::Duration;

/// Maps a key press to the keys the overlay registry understands.
///
/// Enter already captured by a widget (a text input submitting) is
/// dropped so a prompt does not confirm twice.
#[must_use]
pub fn map_key(key: &keyboard::Key, modifiers: keyboard::Modifiers, captured: bool) -> Option<Key> {
    match key {
        keyboard::Key::Named(Named::Escape) => Some(Key::Escape),
        keyboard::Key::Named(Named::Tab) => Some(Key::Tab {
            shift: modifiers.shift(),
        }),
        keyboard::Key::Named(Named::Enter) if !captured => Some(Key::Enter),
        _ => None,
    }
}

/// Keyboard and window focus events.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            map_key(&key, modifiers, status == event::Status::Captured).map(Message::Key)
        }
        Event::Window(window::Event::Focused) => Some(Message::WindowFocus(true)),
        Event::Window(window::Event::Unfocused) => Some(Message::WindowFocus(false)),
        _ => None,
    })
}

/// Periodic tick, only while something on screen is counting down.
pub fn create_tick_subscription(has_notifications: bool, is_loading: bool) -> Subscription<Message> {
    if has_notifications || is_loading {
        time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_tab_moves_backwards() {
        let key = keyboard::Key::Named(Named::Tab);
        assert_eq!(
            map_key(&key, keyboard::Modifiers::SHIFT, false),
            Some(Key::Tab { shift: true })
        );
        assert_eq!(
            map_key(&key, keyboard::Modifiers::default(), false),
            Some(Key::Tab { shift: false })
        );
    }

    #[test]
    fn captured_enter_is_ignored() {
        let key = keyboard::Key::Named(Named::Enter);
        assert_eq!(map_key(&key, keyboard::Modifiers::default(), true), None);
        assert_eq!(
            map_key(&key, keyboard::Modifiers::default(), false),
            Some(Key::Enter)
        );
    }

    #[test]
    fn escape_is_forwarded_even_when_captured() {
        let key = keyboard::Key::Named(Named::Escape);
        assert_eq!(
            map_key(&key, keyboard::Modifiers::default(), true),
            Some(Key::Escape)
        );
    }

    #[test]
    fn other_keys_are_dropped() {
        let key = keyboard::Key::Character("a".into());
        assert_eq!(map_key(&key, keyboard::Modifiers::default(), false), None);
    }
}
