//! Event pump over the shared IDCMP port and the Workbench app port

use std::time::Duration;

use glint_platform::{
    CursorMode, Event, EventSink, InputEvent, MouseEvent, Result, WindowEvent, WindowId,
};

use crate::input;
use crate::native::{IdcmpClass, MessageKind, NativeOs, PortId};
use crate::platform::Os4Platform;
use crate::window::WindowKey;

impl<N: NativeOs> Os4Platform<N> {
    /// Handle and reply to every queued message; returns how many
    pub(crate) fn dispatch_pending(&mut self, sink: &mut dyn EventSink) -> Result<usize> {
        self.ensure_active()?;
        let mut handled = 0;
        for port in [self.user_port(), self.app_port()].into_iter().flatten() {
            handled += self.drain_port(port, sink);
        }
        if handled > 0 {
            tracing::trace!("Dispatched {} messages", handled);
        }
        Ok(handled)
    }

    pub(crate) fn wait_and_dispatch(
        &mut self,
        sink: &mut dyn EventSink,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let port = self.require_user_port()?;
        if !self.native.wait_port(port, timeout) {
            tracing::trace!("Wait ended without a signal");
        }
        self.dispatch_pending(sink).map(|_| ())
    }

    fn drain_port(&mut self, port: PortId, sink: &mut dyn EventSink) -> usize {
        let mut handled = 0;
        while let Some(msg) = self.native.get_msg(port) {
            self.handle_message(&msg.kind, sink);
            self.native.reply_msg(msg);
            handled += 1;
        }
        handled
    }

    fn handle_message(&mut self, kind: &MessageKind, sink: &mut dyn EventSink) {
        match kind {
            MessageKind::Wakeup => sink.push(Event::Empty),
            MessageKind::AppMessage { id } => self.handle_app_message(*id, sink),
            MessageKind::Idcmp { window, class } => match self.find_window(*window) {
                Some(key) => self.handle_idcmp(key, class, sink),
                None => tracing::trace!("Dropping {:?} for unknown window {:?}", class, window),
            },
        }
    }

    /// Double-clicking the AppIcon of an iconified window brings it back
    fn handle_app_message(&mut self, id: u32, sink: &mut dyn EventSink) {
        let Some((key, window)) = self
            .windows
            .iter_mut()
            .find(|(_, w)| w.native.0 == id && w.iconified)
        else {
            tracing::trace!("AppMessage {} matches no iconified window", id);
            return;
        };
        self.native.iconify_window(window.native, false);
        window.iconified = false;
        sink.push(Event::Window {
            window: key.into(),
            event: WindowEvent::Iconified(false),
        });
    }

    fn handle_idcmp(&mut self, key: WindowKey, class: &IdcmpClass, sink: &mut dyn EventSink) {
        let id = WindowId::from(key);
        let window_event = |event| Event::Window { window: id, event };
        let input_event = |event| Event::Input { window: id, event };

        match *class {
            IdcmpClass::RawKey { code, qualifier } => {
                let Some(tables) = self.keys.as_deref() else {
                    return;
                };
                let event = input::convert_raw_key(tables, code, qualifier);
                sink.push(input_event(InputEvent::Keyboard(event)));
            }
            IdcmpClass::MouseMove { x, y } => self.handle_mouse_move(key, x, y, sink),
            IdcmpClass::MouseButtons { code, qualifier } => {
                sink.push(input_event(input::convert_mouse_buttons(code, qualifier)));
            }
            IdcmpClass::ExtendedMouse { wheel_x, wheel_y } => {
                sink.push(input_event(input::convert_wheel(wheel_x, wheel_y)));
            }
            IdcmpClass::CloseWindow => sink.push(window_event(WindowEvent::CloseRequested)),
            IdcmpClass::NewSize { width, height } => {
                let window = &mut self.windows[key];
                window.width = width;
                window.height = height;
                sink.push(window_event(WindowEvent::Resized { width, height }));
            }
            IdcmpClass::ChangeWindow { x, y } => {
                let window = &mut self.windows[key];
                if (window.x, window.y) != (x, y) {
                    window.x = x;
                    window.y = y;
                    sink.push(window_event(WindowEvent::Moved { x, y }));
                }
            }
            IdcmpClass::ActiveWindow => {
                for (other, window) in self.windows.iter_mut() {
                    window.focused = other == key;
                }
                sink.push(window_event(WindowEvent::Focused(true)));
            }
            IdcmpClass::InactiveWindow => {
                self.windows[key].focused = false;
                sink.push(window_event(WindowEvent::Focused(false)));
            }
            IdcmpClass::RefreshWindow => sink.push(window_event(WindowEvent::Refresh)),
            IdcmpClass::Iconify(iconified) => {
                self.windows[key].iconified = iconified;
                sink.push(window_event(WindowEvent::Iconified(iconified)));
            }
        }
    }

    fn handle_mouse_move(&mut self, key: WindowKey, x: i32, y: i32, sink: &mut dyn EventSink) {
        let id = WindowId::from(key);
        let window = &mut self.windows[key];

        let inside = window.contains(x, y);
        if inside != window.hovered {
            window.hovered = inside;
            let event = if inside {
                MouseEvent::Entered
            } else {
                MouseEvent::Left
            };
            sink.push(Event::Input {
                window: id,
                event: InputEvent::Mouse(event),
            });
        }

        let (px, py) = if window.cursor_mode == CursorMode::Disabled {
            let (cx, cy) = window.center();
            if (x, y) == (cx, cy) {
                // Our own re-centring warp
                return;
            }
            window.virtual_cursor.0 += f64::from(x - cx);
            window.virtual_cursor.1 += f64::from(y - cy);
            self.native.move_pointer(window.native, cx, cy);
            window.virtual_cursor
        } else {
            (f64::from(x), f64::from(y))
        };

        sink.push(Event::Input {
            window: id,
            event: input::mouse_moved(px, py),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Os4Config;
    use crate::keys::rawkey;
    use crate::mock::MockOs;
    use crate::native::{button_code, NativeWindow};
    use glint_platform::{Key, KeyState, MouseButton, Platform, WindowConfig};

    struct Fixture {
        native: MockOs,
        platform: Os4Platform<MockOs>,
        window: WindowId,
        handle: NativeWindow,
        port: PortId,
    }

    impl Fixture {
        fn new() -> Self {
            let native = MockOs::new();
            let mut platform = Os4Platform::new(native.clone(), Os4Config::default());
            platform.init().unwrap();
            let window = platform.create_window(&WindowConfig::default()).unwrap();
            let handle = platform.window(window).unwrap().native;
            let port = platform.user_port().unwrap();
            Self {
                native,
                platform,
                window,
                handle,
                port,
            }
        }

        fn send(&self, class: IdcmpClass) {
            self.native.queue(
                self.port,
                MessageKind::Idcmp {
                    window: self.handle,
                    class,
                },
            );
        }

        fn poll(&mut self) -> Vec<Event> {
            let mut events: Vec<Event> = Vec::new();
            self.platform.poll_events(&mut events).unwrap();
            events
        }
    }

    #[test]
    fn test_every_message_is_replied() {
        let mut f = Fixture::new();
        for _ in 0..7 {
            f.send(IdcmpClass::RefreshWindow);
        }
        let events = f.poll();
        assert_eq!(events.len(), 7);
        assert_eq!(f.native.replies(), 7);
        assert_eq!(f.native.pending(), 0);
        f.platform.terminate();
    }

    #[test]
    fn test_raw_key_events() {
        let mut f = Fixture::new();
        f.send(IdcmpClass::RawKey {
            code: rawkey::ENTER,
            qualifier: 0,
        });
        f.send(IdcmpClass::RawKey {
            code: rawkey::ENTER | crate::keys::UP_PREFIX,
            qualifier: 0,
        });

        let events = f.poll();
        let states: Vec<(Key, KeyState)> = events
            .iter()
            .filter_map(|e| match e {
                Event::Input {
                    event: InputEvent::Keyboard(k),
                    ..
                } => Some((k.key, k.state)),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![(Key::KpEnter, KeyState::Pressed), (Key::KpEnter, KeyState::Released)]
        );
        f.platform.terminate();
    }

    #[test]
    fn test_mouse_enter_move_leave() {
        let mut f = Fixture::new();
        f.send(IdcmpClass::MouseMove { x: 10, y: 10 });
        f.send(IdcmpClass::MouseMove { x: -5, y: 10 });
        let window = f.window;

        assert_eq!(
            f.poll(),
            vec![
                Event::Input {
                    window,
                    event: InputEvent::Mouse(MouseEvent::Entered)
                },
                Event::Input {
                    window,
                    event: InputEvent::Mouse(MouseEvent::Moved { x: 10.0, y: 10.0 })
                },
                Event::Input {
                    window,
                    event: InputEvent::Mouse(MouseEvent::Left)
                },
                Event::Input {
                    window,
                    event: InputEvent::Mouse(MouseEvent::Moved { x: -5.0, y: 10.0 })
                },
            ]
        );
        assert!(!f.platform.window_hovered(window).unwrap());
        f.platform.terminate();
    }

    #[test]
    fn test_disabled_cursor_reports_virtual_motion() {
        let mut f = Fixture::new();
        f.native.set_pointer(0, 0);
        f.platform
            .set_cursor_mode(f.window, CursorMode::Disabled)
            .unwrap();

        f.send(IdcmpClass::MouseMove { x: 330, y: 235 });
        f.send(IdcmpClass::MouseMove { x: 320, y: 240 });
        let moves: Vec<Event> = f
            .poll()
            .into_iter()
            .filter(|e| {
                matches!(
                    e,
                    Event::Input {
                        event: InputEvent::Mouse(MouseEvent::Moved { .. }),
                        ..
                    }
                )
            })
            .collect();
        assert_eq!(
            moves,
            vec![Event::Input {
                window: f.window,
                event: InputEvent::Mouse(MouseEvent::Moved { x: 10.0, y: -5.0 })
            }]
        );
        f.platform.terminate();
    }

    #[test]
    fn test_window_state_messages() {
        let mut f = Fixture::new();
        f.send(IdcmpClass::NewSize {
            width: 800,
            height: 600,
        });
        f.send(IdcmpClass::ChangeWindow { x: 5, y: 6 });
        f.send(IdcmpClass::InactiveWindow);
        f.send(IdcmpClass::Iconify(true));
        f.send(IdcmpClass::CloseWindow);
        f.send(IdcmpClass::MouseButtons {
            code: button_code::MBUTTON,
            qualifier: 0,
        });

        let events = f.poll();
        assert_eq!(events.len(), 6);
        assert_eq!(f.platform.window_size(f.window).unwrap(), (800, 600));
        assert_eq!(f.platform.window_pos(f.window).unwrap(), (5, 6));
        assert!(!f.platform.window_focused(f.window).unwrap());
        assert!(f.platform.window_iconified(f.window).unwrap());
        assert!(events.contains(&Event::Window {
            window: f.window,
            event: WindowEvent::CloseRequested
        }));
        assert!(matches!(
            events[5],
            Event::Input {
                event: InputEvent::Mouse(MouseEvent::ButtonPressed {
                    button: MouseButton::Middle,
                    ..
                }),
                ..
            }
        ));
        f.platform.terminate();
    }

    #[test]
    fn test_unknown_window_is_replied_and_dropped() {
        let mut f = Fixture::new();
        f.native.queue(
            f.port,
            MessageKind::Idcmp {
                window: NativeWindow(9999),
                class: IdcmpClass::CloseWindow,
            },
        );
        assert!(f.poll().is_empty());
        assert_eq!(f.native.replies(), 1);
        f.platform.terminate();
    }

    #[test]
    fn test_empty_event_wakes_waiter() {
        let mut f = Fixture::new();
        f.platform.post_empty_event().unwrap();
        let mut events: Vec<Event> = Vec::new();
        f.platform.wait_events(&mut events).unwrap();
        assert_eq!(events, vec![Event::Empty]);
        assert_eq!(f.native.waits(), 1);

        events.clear();
        f.platform
            .wait_events_timeout(&mut events, Duration::from_millis(10))
            .unwrap();
        assert!(events.is_empty());
        f.platform.terminate();
    }

    #[test]
    fn test_app_message_uniconifies() {
        let mut f = Fixture::new();
        f.platform.iconify_window(f.window).unwrap();
        let app_port = f.platform.app_port().unwrap();
        f.native
            .queue(app_port, MessageKind::AppMessage { id: f.handle.0 });

        assert_eq!(
            f.poll(),
            vec![Event::Window {
                window: f.window,
                event: WindowEvent::Iconified(false)
            }]
        );
        assert!(!f.platform.window_iconified(f.window).unwrap());
        f.platform.terminate();
    }

    #[test]
    fn test_destroyed_window_messages_are_stripped() {
        let mut f = Fixture::new();
        f.send(IdcmpClass::RefreshWindow);
        f.send(IdcmpClass::RefreshWindow);
        f.platform.destroy_window(f.window).unwrap();
        assert_eq!(f.native.pending(), 0);
        assert_eq!(f.native.replies(), 2);
        assert!(f.poll().is_empty());
        f.platform.terminate();
    }
}
