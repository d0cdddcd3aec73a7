//! Drives the AmigaOS 4 backend through the platform-neutral dispatch trait

use glint_platform::prelude::*;
use glint_platform::KEY_NAME_MAX;
use glint_platform_os4::native::{IdcmpClass, MessageKind};
use glint_platform_os4::{MockOs, Os4Config, Os4Connector, Os4Platform};

fn connect(native: &MockOs) -> Box<dyn Platform> {
    let connectors: Vec<Box<dyn Connector>> = vec![Box::new(Os4Connector::new(
        native.clone(),
        Os4Config::default(),
    ))];
    select_platform(PlatformId::Any, connectors).unwrap()
}

#[test]
fn selects_os4_backend() {
    let native = MockOs::new();
    let platform = connect(&native);
    assert_eq!(platform.id(), PlatformId::Os4);
    assert_eq!(platform.mapping_name(), "AmigaOS4");
    // Connecting acquires nothing
    assert!(native.opened_libraries().is_empty());
}

#[test]
fn specific_platform_not_built() {
    let native = MockOs::new();
    let connectors: Vec<Box<dyn Connector>> =
        vec![Box::new(Os4Connector::new(native, Os4Config::default()))];
    let err = select_platform(PlatformId::Wayland, connectors).err().unwrap();
    assert!(matches!(err, PlatformError::Unsupported(_)));
}

#[test]
fn full_cycle_releases_everything() {
    let native = MockOs::new().cli_name("MyApp");
    let mut platform = connect(&native);

    platform.init().unwrap();
    let window = platform
        .create_window(&WindowConfig::new("Cycle").size(320, 240))
        .unwrap();
    platform.set_clipboard_string("copied").unwrap();
    platform.init_joysticks().unwrap();
    platform.terminate();

    assert_eq!(native.open_library_count(), 0);
    assert_eq!(native.live_interfaces(), 0);
    assert_eq!(native.ports_allocated(), native.ports_freed());
    assert_eq!(native.open_windows(), 0);
    assert_eq!(native.double_releases(), 0);
    assert!(matches!(
        platform.window_size(window),
        Err(PlatformError::NotInitialized)
    ));
}

#[test]
fn failure_at_third_library_releases_two() {
    let native = MockOs::new().fail_library("intuition.library");
    let mut platform = connect(&native);

    let err = platform.init().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Couldn't open intuition.library version 51+"
    );
    // intuition is not open yet, so the message went to the shell
    assert_eq!(
        native.diagnostics(),
        vec!["Couldn't open intuition.library version 51+.\n".to_string()]
    );
    assert!(native.requesters().is_empty());

    platform.terminate();
    assert_eq!(
        native.closed_libraries(),
        vec!["graphics.library".to_string(), "dos.library".to_string()]
    );
    assert_eq!(native.double_releases(), 0);
}

#[test]
fn configured_versions_are_requested() {
    let native = MockOs::new().fail_library("textclip.library");
    let config = Os4Config::from_toml_str(
        r#"
        requester_title = "Demo: fatal"

        [libraries]
        textclip = 53
        "#,
    )
    .unwrap();
    let mut platform = Os4Platform::new(native.clone(), config);

    assert_eq!(
        platform.init(),
        Err(PlatformError::LibraryUnavailable {
            name: "textclip.library".to_string(),
            version: 53
        })
    );
    assert_eq!(
        native.requesters(),
        vec![(
            "Demo: fatal".to_string(),
            "Couldn't open textclip.library version 53+.\n".to_string()
        )]
    );
    platform.terminate();
    assert_eq!(native.open_library_count(), 0);
}

#[test]
fn pump_replies_n_times() {
    let native = MockOs::new();
    let mut platform = Os4Platform::new(native.clone(), Os4Config::default());
    platform.init().unwrap();
    let id = platform.create_window(&WindowConfig::default()).unwrap();
    let port = platform.user_port().unwrap();

    let handle = platform.native_window(id).unwrap();

    for code in [0x20, 0x21, 0x22, 0x20 | 0x80] {
        native.queue(
            port,
            MessageKind::Idcmp {
                window: handle,
                class: IdcmpClass::RawKey { code, qualifier: 0 },
            },
        );
    }
    native.queue(port, MessageKind::Wakeup);

    let mut events: Vec<Event> = Vec::new();
    platform.poll_events(&mut events).unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(native.replies(), 5);
    assert_eq!(
        events[0],
        Event::Input {
            window: id,
            event: InputEvent::Keyboard(KeyboardEvent {
                key: Key::A,
                scancode: 0x20,
                state: KeyState::Pressed,
                modifiers: Modifiers::default(),
            })
        }
    );
    assert_eq!(events[4], Event::Empty);
    platform.terminate();
}

#[test]
fn app_name_from_shell_or_task() {
    let native = MockOs::new().cli_name("MyApp");
    let mut platform = Os4Platform::new(native, Os4Config::default());
    platform.init().unwrap();
    assert_eq!(
        platform.app_name().unwrap().to_bytes_with_nul(),
        b"MyApp\0"
    );
    platform.terminate();

    let native = MockOs::new().task_name("Workbench Launch");
    let mut platform = Os4Platform::new(native, Os4Config::default());
    platform.init().unwrap();
    assert_eq!(
        platform.app_name().unwrap().to_str().unwrap(),
        "Workbench Launch"
    );
    platform.terminate();
}

#[test]
fn key_queries_through_dispatch() {
    let native = MockOs::new();
    let mut platform = connect(&native);
    platform.init().unwrap();

    assert_eq!(platform.key_scancode(Key::A).unwrap(), Some(0x20));
    assert_eq!(platform.scancode_name(0x20).unwrap(), Some("A"));
    assert_eq!(platform.key_scancode(Key::Minus).unwrap(), None);
    assert_eq!(platform.scancode_name(0x7f).unwrap(), None);
    assert!(matches!(
        platform.scancode_name(600),
        Err(PlatformError::InvalidValue(_))
    ));

    for &key in Key::ALL {
        if let Some(scancode) = platform.key_scancode(key).unwrap() {
            let name = platform.scancode_name(scancode).unwrap().unwrap();
            assert!(name.len() < KEY_NAME_MAX);
        }
    }
    platform.terminate();
}
