//! Translation from egui input to engine events.

use eframe::egui;
use engine_core::{Event, Key, Modifiers, MouseButton};

/// Points per "line" of wheel scroll, for mice that report line deltas.
const POINTS_PER_SCROLL_LINE: f32 = 20.0;

pub fn translate_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        alt: modifiers.alt,
        ctrl: modifiers.ctrl,
        shift: modifiers.shift,
    }
}

fn translate_key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::Space => Some(Key::Space),
        egui::Key::R => Some(Key::R),
        _ => None,
    }
}

fn translate_button(button: egui::PointerButton) -> Option<MouseButton> {
    match button {
        egui::PointerButton::Primary => Some(MouseButton::Left),
        egui::PointerButton::Secondary => Some(MouseButton::Right),
        egui::PointerButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Converts one egui event into an engine event.
///
/// Kinds the scene does not consume translate to `None` and are dropped.
pub fn translate_event(event: &egui::Event) -> Option<Event> {
    match event {
        egui::Event::PointerMoved(pos) => Some(Event::MouseMoved { x: pos.x, y: pos.y }),
        egui::Event::MouseWheel { unit, delta, .. } => {
            let scale = match unit {
                egui::MouseWheelUnit::Point => 1.0,
                egui::MouseWheelUnit::Line => POINTS_PER_SCROLL_LINE,
                egui::MouseWheelUnit::Page => 8.0 * POINTS_PER_SCROLL_LINE,
            };
            Some(Event::MouseScrolled {
                dx: delta.x * scale,
                dy: delta.y * scale,
            })
        }
        egui::Event::PointerButton {
            button, pressed, ..
        } => translate_button(*button).map(|button| {
            if *pressed {
                Event::MouseButtonPressed { button }
            } else {
                Event::MouseButtonReleased { button }
            }
        }),
        egui::Event::Key {
            key,
            pressed,
            repeat,
            ..
        } => translate_key(*key).map(|key| {
            if *pressed {
                Event::KeyPressed {
                    key,
                    repeat: *repeat,
                }
            } else {
                Event::KeyReleased { key }
            }
        }),
        _ => None,
    }
}

/// What the previous UI pass allows through to the scene.
///
/// Mirrors the viewport panel state: key events reach the scene only while
/// the panel holds focus, pointer events only while it is hovered.
/// Window-resize and modifier changes always pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputGate {
    pub block_keys: bool,
    pub block_pointer: bool,
}

impl InputGate {
    pub fn allows(&self, event: &Event) -> bool {
        match event {
            Event::KeyPressed { .. } | Event::KeyReleased { .. } => !self.block_keys,
            Event::MouseMoved { .. }
            | Event::MouseScrolled { .. }
            | Event::MouseButtonPressed { .. }
            | Event::MouseButtonReleased { .. } => !self.block_pointer,
            Event::WindowResize { .. } | Event::ModifiersChanged(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_and_key_events_translate() {
        let moved = translate_event(&egui::Event::PointerMoved(egui::pos2(3.0, 4.0)));
        assert_eq!(moved, Some(Event::MouseMoved { x: 3.0, y: 4.0 }));

        let pressed = translate_event(&egui::Event::PointerButton {
            pos: egui::pos2(0.0, 0.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::default(),
        });
        assert_eq!(
            pressed,
            Some(Event::MouseButtonPressed {
                button: MouseButton::Left
            })
        );

        let key = translate_event(&egui::Event::Key {
            key: egui::Key::Space,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::default(),
        });
        assert_eq!(
            key,
            Some(Event::KeyPressed {
                key: Key::Space,
                repeat: false
            })
        );
    }

    #[test]
    fn unbound_keys_and_buttons_are_dropped() {
        assert_eq!(
            translate_event(&egui::Event::Key {
                key: egui::Key::F5,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::default(),
            }),
            None
        );
        assert_eq!(
            translate_event(&egui::Event::PointerButton {
                pos: egui::pos2(0.0, 0.0),
                button: egui::PointerButton::Extra1,
                pressed: true,
                modifiers: egui::Modifiers::default(),
            }),
            None
        );
    }

    #[test]
    fn line_scroll_is_scaled_to_points() {
        let scrolled = translate_event(&egui::Event::MouseWheel {
            unit: egui::MouseWheelUnit::Line,
            delta: egui::vec2(0.0, 2.0),
            modifiers: egui::Modifiers::default(),
        });
        assert_eq!(
            scrolled,
            Some(Event::MouseScrolled {
                dx: 0.0,
                dy: 2.0 * POINTS_PER_SCROLL_LINE
            })
        );
    }

    #[test]
    fn gate_blocks_by_category() {
        let key = Event::KeyPressed {
            key: Key::Space,
            repeat: false,
        };
        let pointer = Event::MouseMoved { x: 0.0, y: 0.0 };
        let resize = Event::WindowResize {
            width: 800,
            height: 600,
        };

        let open = InputGate::default();
        assert!(open.allows(&key));
        assert!(open.allows(&pointer));

        let blocked = InputGate {
            block_keys: true,
            block_pointer: true,
        };
        assert!(!blocked.allows(&key));
        assert!(!blocked.allows(&pointer));
        // Window state always reaches the layer.
        assert!(blocked.allows(&resize));
        assert!(blocked.allows(&Event::ModifiersChanged(Modifiers::default())));
    }

    #[test]
    fn gate_axes_are_independent_for_focus_and_hover() {
        let gate = InputGate {
            block_keys: true,
            block_pointer: false,
        };
        assert!(!gate.allows(&Event::KeyPressed {
            key: Key::R,
            repeat: false
        }));
        assert!(gate.allows(&Event::MouseScrolled { dx: 0.0, dy: 1.0 }));
    }
}
