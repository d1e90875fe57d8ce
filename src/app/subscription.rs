// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard events are reduced to physical key codes (`"KeyT"`, `"Escape"`)
//! so the hotkey matches regardless of layout; modifier state arrives
//! separately.

use super::Message;
use crate::config::TICK_INTERVAL_MS;
use iced::keyboard::{self, key};
use iced::{event, time, Subscription};
use std::time::Duration;

/// Periodic tick driving toast timers and exit transitions.
pub fn create_tick_subscription() -> Subscription<Message> {
    time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick)
}

/// Keyboard presses, releases and modifier changes.
pub fn create_keyboard_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Keyboard(keyboard::Event::KeyPressed { physical_key, .. }) => {
            physical_code(&physical_key).map(Message::KeyPressed)
        }
        event::Event::Keyboard(keyboard::Event::KeyReleased { physical_key, .. }) => {
            physical_code(&physical_key).map(Message::KeyReleased)
        }
        event::Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
            Some(Message::ModifiersChanged(modifiers))
        }
        _ => None,
    })
}

fn physical_code(physical: &key::Physical) -> Option<String> {
    match physical {
        key::Physical::Code(code) => Some(format!("{code:?}")),
        key::Physical::Unidentified(_) => None,
    }
}

/// Names of the held modifiers, in the form hotkeys are configured with.
#[must_use]
pub fn modifier_names(modifiers: keyboard::Modifiers) -> Vec<&'static str> {
    let mut names = Vec::new();
    if modifiers.alt() {
        names.push("alt");
    }
    if modifiers.control() {
        names.push("ctrl");
    }
    if modifiers.shift() {
        names.push("shift");
    }
    if modifiers.logo() {
        names.push("meta");
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_codes_use_variant_names() {
        assert_eq!(
            physical_code(&key::Physical::Code(key::Code::KeyT)).as_deref(),
            Some("KeyT")
        );
        assert_eq!(
            physical_code(&key::Physical::Code(key::Code::Escape)).as_deref(),
            Some("Escape")
        );
    }

    #[test]
    fn modifier_names_follow_flags() {
        assert!(modifier_names(keyboard::Modifiers::empty()).is_empty());
        assert_eq!(modifier_names(keyboard::Modifiers::ALT), vec!["alt"]);
        assert_eq!(
            modifier_names(keyboard::Modifiers::ALT | keyboard::Modifiers::SHIFT),
            vec!["alt", "shift"]
        );
    }
}
