//! In-memory [`NativeOs`] for tests
//!
//! `MockOs` is a cheap handle over shared state: clone it before handing it
//! to the platform and keep the clone to queue messages and inspect what the
//! backend acquired and released.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use glint_platform::FrameSize;

use crate::native::{
    AinDevice, AinSample, Interface, LibraryBase, Message, MessageKind, NativeOs, NativePointer,
    NativeWindow, NativeWindowSpec, PointerShape, PortId, ScreenInfo,
};

/// Border sizes reported for decorated windows
pub const MOCK_BORDERS: FrameSize = FrameSize {
    left: 4,
    top: 20,
    right: 18,
    bottom: 4,
};

/// State of a window opened through the mock
#[derive(Clone, Debug, PartialEq)]
pub struct MockWindow {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub decorated: bool,
    pub hidden: bool,
    pub iconified: bool,
    pub active: bool,
    pub front_count: usize,
    pub opacity: u8,
    pub pointer: PointerShape,
    pub limits: (Option<(u32, u32)>, Option<(u32, u32)>),
    pub port: PortId,
}

#[derive(Default)]
struct MockState {
    next_handle: u32,
    next_token: u64,

    failing_libraries: HashSet<String>,
    failing_interfaces: HashSet<String>,
    requesters_unavailable: bool,
    port_limit: Option<usize>,
    windows_fail: bool,
    clip_write_fails: bool,

    bases: HashMap<u32, String>,
    opened: Vec<String>,
    closed: Vec<String>,
    live_interfaces: HashSet<u32>,
    dropped_interfaces: usize,
    double_releases: usize,

    ports: HashMap<u32, VecDeque<Message>>,
    ports_allocated: usize,
    ports_freed: usize,
    replies: usize,
    waits: usize,

    task_name: String,
    cli_name: Option<String>,
    requesters: Vec<(String, String)>,
    diagnostics: Vec<String>,

    screens: Vec<ScreenInfo>,
    windows: HashMap<u32, MockWindow>,
    windows_closed: usize,
    pointer: (i32, i32),
    pointers: HashSet<u32>,
    pointers_disposed: usize,

    clipboard: Option<String>,

    devices: Vec<AinDevice>,
    samples: HashMap<u32, AinSample>,
    released_devices: Vec<u32>,
}

impl MockState {
    fn handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

/// Shared, inspectable fake operating system
#[derive(Clone)]
pub struct MockOs {
    inner: Rc<RefCell<MockState>>,
}

impl Default for MockOs {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("MockOs")
            .field("libraries", &state.bases.len())
            .field("ports", &state.ports.len())
            .field("windows", &state.windows.len())
            .finish()
    }
}

impl MockOs {
    /// A healthy system with one Workbench screen
    pub fn new() -> Self {
        let state = MockState {
            task_name: "Shell Process".to_string(),
            screens: vec![ScreenInfo {
                name: "Workbench".to_string(),
                x: 0,
                y: 0,
                width: 1920,
                height: 1080,
                depth: 32,
                bar_height: 20,
                refresh_rate: 60,
                modes: vec![(640, 480, 16), (1024, 768, 32), (1920, 1080, 32)],
            }],
            ..Default::default()
        };
        Self {
            inner: Rc::new(RefCell::new(state)),
        }
    }

    // Builders

    /// Make `OpenLibrary` fail for `name`
    pub fn fail_library(self, name: &str) -> Self {
        self.inner.borrow_mut().failing_libraries.insert(name.to_string());
        self
    }

    /// Make `GetInterface` fail for `name`
    pub fn fail_interface(self, name: &str) -> Self {
        self.inner.borrow_mut().failing_interfaces.insert(name.to_string());
        self
    }

    /// Make every requester fail to open
    pub fn without_requesters(self) -> Self {
        self.inner.borrow_mut().requesters_unavailable = true;
        self
    }

    /// Allow `n` port allocations, fail the rest
    pub fn fail_port_after(self, n: usize) -> Self {
        self.inner.borrow_mut().port_limit = Some(n);
        self
    }

    /// Make `OpenWindowTags` fail
    pub fn fail_windows(self) -> Self {
        self.inner.borrow_mut().windows_fail = true;
        self
    }

    /// Make clipboard writes fail
    pub fn fail_clip_write(self) -> Self {
        self.inner.borrow_mut().clip_write_fails = true;
        self
    }

    /// Name returned by `GetCliProgramName`
    pub fn cli_name(self, name: &str) -> Self {
        self.inner.borrow_mut().cli_name = Some(name.to_string());
        self
    }

    /// Name of the running task
    pub fn task_name(self, name: &str) -> Self {
        self.inner.borrow_mut().task_name = name.to_string();
        self
    }

    /// Replace the public screen list
    pub fn screens(self, screens: Vec<ScreenInfo>) -> Self {
        self.inner.borrow_mut().screens = screens;
        self
    }

    /// Plug in a joystick
    pub fn joystick(self, device: AinDevice, sample: AinSample) -> Self {
        {
            let mut state = self.inner.borrow_mut();
            state.samples.insert(device.id, sample);
            state.devices.push(device);
        }
        self
    }

    /// Text already on the system clipboard
    pub fn clipboard_text(self, text: &str) -> Self {
        self.inner.borrow_mut().clipboard = Some(text.to_string());
        self
    }

    // Driving

    /// Queue a message on a port
    pub fn queue(&self, port: PortId, kind: MessageKind) {
        let mut state = self.inner.borrow_mut();
        state.next_token += 1;
        let token = state.next_token;
        state
            .ports
            .entry(port.0)
            .or_default()
            .push_back(Message { token, kind });
    }

    /// Update a joystick reading; `None` unplugs it
    pub fn set_sample(&self, device: u32, sample: Option<AinSample>) {
        let mut state = self.inner.borrow_mut();
        match sample {
            Some(sample) => {
                state.samples.insert(device, sample);
            }
            None => {
                state.samples.remove(&device);
            }
        }
    }

    /// Move the pointer, window relative
    pub fn set_pointer(&self, x: i32, y: i32) {
        self.inner.borrow_mut().pointer = (x, y);
    }

    /// Change what another program put on the clipboard
    pub fn set_clipboard(&self, text: Option<&str>) {
        self.inner.borrow_mut().clipboard = text.map(str::to_string);
    }

    // Inspection

    /// Libraries opened, in order
    pub fn opened_libraries(&self) -> Vec<String> {
        self.inner.borrow().opened.clone()
    }

    /// Libraries closed, in order
    pub fn closed_libraries(&self) -> Vec<String> {
        self.inner.borrow().closed.clone()
    }

    /// Libraries currently open
    pub fn open_library_count(&self) -> usize {
        self.inner.borrow().bases.len()
    }

    /// Number of `DropInterface` calls
    pub fn dropped_interfaces(&self) -> usize {
        self.inner.borrow().dropped_interfaces
    }

    /// Releases of handles that were never acquired or already released
    pub fn double_releases(&self) -> usize {
        self.inner.borrow().double_releases
    }

    /// Interfaces currently held
    pub fn live_interfaces(&self) -> usize {
        self.inner.borrow().live_interfaces.len()
    }

    /// Requesters shown, as (title, body)
    pub fn requesters(&self) -> Vec<(String, String)> {
        self.inner.borrow().requesters.clone()
    }

    /// Text printed to the diagnostic stream
    pub fn diagnostics(&self) -> Vec<String> {
        self.inner.borrow().diagnostics.clone()
    }

    /// Messages replied to
    pub fn replies(&self) -> usize {
        self.inner.borrow().replies
    }

    /// Messages queued on any port and not yet taken
    pub fn pending(&self) -> usize {
        self.inner.borrow().ports.values().map(VecDeque::len).sum()
    }

    /// Successful port allocations
    pub fn ports_allocated(&self) -> usize {
        self.inner.borrow().ports_allocated
    }

    /// Ports freed
    pub fn ports_freed(&self) -> usize {
        self.inner.borrow().ports_freed
    }

    /// Number of `wait_port` calls
    pub fn waits(&self) -> usize {
        self.inner.borrow().waits
    }

    /// Windows currently open
    pub fn open_windows(&self) -> usize {
        self.inner.borrow().windows.len()
    }

    /// Windows closed
    pub fn windows_closed(&self) -> usize {
        self.inner.borrow().windows_closed
    }

    /// Snapshot of an open window
    pub fn window(&self, window: NativeWindow) -> Option<MockWindow> {
        self.inner.borrow().windows.get(&window.0).cloned()
    }

    /// Pointer objects not yet disposed
    pub fn live_pointers(&self) -> usize {
        self.inner.borrow().pointers.len()
    }

    /// Text on the system clipboard
    pub fn clipboard(&self) -> Option<String> {
        self.inner.borrow().clipboard.clone()
    }

    /// Joystick devices released
    pub fn released_devices(&self) -> Vec<u32> {
        self.inner.borrow().released_devices.clone()
    }
}

impl NativeOs for MockOs {
    fn open_library(&mut self, name: &str, _version: u32) -> Option<LibraryBase> {
        let mut state = self.inner.borrow_mut();
        if state.failing_libraries.contains(name) {
            return None;
        }
        let handle = state.handle();
        state.bases.insert(handle, name.to_string());
        state.opened.push(name.to_string());
        Some(LibraryBase(handle))
    }

    fn get_interface(
        &mut self,
        base: LibraryBase,
        _name: &str,
        _version: u32,
    ) -> Option<Interface> {
        let mut state = self.inner.borrow_mut();
        let library = state.bases.get(&base.0)?.clone();
        if state.failing_interfaces.contains(&library) {
            return None;
        }
        let handle = state.handle();
        state.live_interfaces.insert(handle);
        Some(Interface(handle))
    }

    fn drop_interface(&mut self, iface: Interface) {
        let mut state = self.inner.borrow_mut();
        if state.live_interfaces.remove(&iface.0) {
            state.dropped_interfaces += 1;
        } else {
            state.double_releases += 1;
        }
    }

    fn close_library(&mut self, base: LibraryBase) {
        let mut state = self.inner.borrow_mut();
        match state.bases.remove(&base.0) {
            Some(name) => state.closed.push(name),
            None => state.double_releases += 1,
        }
    }

    fn alloc_port(&mut self) -> Option<PortId> {
        let mut state = self.inner.borrow_mut();
        if let Some(limit) = state.port_limit {
            if state.ports_allocated >= limit {
                return None;
            }
        }
        let handle = state.handle();
        state.ports.insert(handle, VecDeque::new());
        state.ports_allocated += 1;
        Some(PortId(handle))
    }

    fn free_port(&mut self, port: PortId) {
        let mut state = self.inner.borrow_mut();
        if state.ports.remove(&port.0).is_some() {
            state.ports_freed += 1;
        } else {
            state.double_releases += 1;
        }
    }

    fn get_msg(&mut self, port: PortId) -> Option<Message> {
        self.inner.borrow_mut().ports.get_mut(&port.0)?.pop_front()
    }

    fn reply_msg(&mut self, _msg: Message) {
        self.inner.borrow_mut().replies += 1;
    }

    fn wait_port(&mut self, port: PortId, _timeout: Option<Duration>) -> bool {
        let mut state = self.inner.borrow_mut();
        state.waits += 1;
        state.ports.get(&port.0).is_some_and(|q| !q.is_empty())
    }

    fn put_wakeup(&mut self, port: PortId) {
        self.queue(port, MessageKind::Wakeup);
    }

    fn current_task_name(&self) -> String {
        self.inner.borrow().task_name.clone()
    }

    fn cli_program_name(&self) -> Option<String> {
        self.inner.borrow().cli_name.clone()
    }

    fn show_requester(&mut self, title: &str, body: &str) -> bool {
        let mut state = self.inner.borrow_mut();
        if state.requesters_unavailable {
            return false;
        }
        state.requesters.push((title.to_string(), body.to_string()));
        true
    }

    fn print_diagnostic(&mut self, text: &str) {
        self.inner.borrow_mut().diagnostics.push(text.to_string());
    }

    fn screens(&self) -> Vec<ScreenInfo> {
        self.inner.borrow().screens.clone()
    }

    fn open_window(&mut self, spec: &NativeWindowSpec<'_>) -> Option<NativeWindow> {
        let mut state = self.inner.borrow_mut();
        if state.windows_fail {
            return None;
        }
        let handle = state.handle();
        state.windows.insert(
            handle,
            MockWindow {
                title: spec.title.to_string(),
                x: spec.x,
                y: spec.y,
                width: spec.width,
                height: spec.height,
                decorated: spec.decorated,
                hidden: spec.hidden,
                iconified: false,
                active: spec.activate,
                front_count: 0,
                opacity: 255,
                pointer: PointerShape::Default,
                limits: (None, None),
                port: spec.user_port,
            },
        );
        Some(NativeWindow(handle))
    }

    fn close_window(&mut self, window: NativeWindow) {
        let mut state = self.inner.borrow_mut();
        let Some(closed) = state.windows.remove(&window.0) else {
            return;
        };
        state.windows_closed += 1;

        let mut stripped = 0;
        if let Some(queue) = state.ports.get_mut(&closed.port.0) {
            queue.retain(|msg| match &msg.kind {
                MessageKind::Idcmp { window: w, .. } if *w == window => {
                    stripped += 1;
                    false
                }
                _ => true,
            });
        }
        state.replies += stripped;
    }

    fn set_window_title(&mut self, window: NativeWindow, title: &str) {
        if let Some(w) = self.inner.borrow_mut().windows.get_mut(&window.0) {
            w.title = title.to_string();
        }
    }

    fn change_window_box(&mut self, window: NativeWindow, x: i32, y: i32, width: u32, height: u32) {
        if let Some(w) = self.inner.borrow_mut().windows.get_mut(&window.0) {
            w.x = x;
            w.y = y;
            w.width = width;
            w.height = height;
        }
    }

    fn set_window_limits(
        &mut self,
        window: NativeWindow,
        min: Option<(u32, u32)>,
        max: Option<(u32, u32)>,
    ) {
        if let Some(w) = self.inner.borrow_mut().windows.get_mut(&window.0) {
            w.limits = (min, max);
        }
    }

    fn set_window_hidden(&mut self, window: NativeWindow, hidden: bool) {
        if let Some(w) = self.inner.borrow_mut().windows.get_mut(&window.0) {
            w.hidden = hidden;
        }
    }

    fn window_to_front(&mut self, window: NativeWindow) {
        if let Some(w) = self.inner.borrow_mut().windows.get_mut(&window.0) {
            w.front_count += 1;
        }
    }

    fn activate_window(&mut self, window: NativeWindow) {
        let mut state = self.inner.borrow_mut();
        for (handle, w) in state.windows.iter_mut() {
            w.active = *handle == window.0;
        }
    }

    fn iconify_window(&mut self, window: NativeWindow, iconify: bool) -> bool {
        match self.inner.borrow_mut().windows.get_mut(&window.0) {
            Some(w) => {
                w.iconified = iconify;
                true
            }
            None => false,
        }
    }

    fn set_window_opacity(&mut self, window: NativeWindow, opacity: u8) {
        if let Some(w) = self.inner.borrow_mut().windows.get_mut(&window.0) {
            w.opacity = opacity;
        }
    }

    fn window_borders(&self, window: NativeWindow) -> FrameSize {
        match self.inner.borrow().windows.get(&window.0) {
            Some(w) if w.decorated => MOCK_BORDERS,
            _ => FrameSize::default(),
        }
    }

    fn pointer_position(&self, _window: NativeWindow) -> (i32, i32) {
        self.inner.borrow().pointer
    }

    fn move_pointer(&mut self, _window: NativeWindow, x: i32, y: i32) {
        self.inner.borrow_mut().pointer = (x, y);
    }

    fn set_window_pointer(&mut self, window: NativeWindow, shape: PointerShape) {
        if let Some(w) = self.inner.borrow_mut().windows.get_mut(&window.0) {
            w.pointer = shape;
        }
    }

    fn new_pointer(
        &mut self,
        _width: u32,
        _height: u32,
        _pixels: &[u8],
        _xhot: i32,
        _yhot: i32,
    ) -> Option<NativePointer> {
        let mut state = self.inner.borrow_mut();
        let handle = state.handle();
        state.pointers.insert(handle);
        Some(NativePointer(handle))
    }

    fn dispose_pointer(&mut self, pointer: NativePointer) {
        let mut state = self.inner.borrow_mut();
        if state.pointers.remove(&pointer.0) {
            state.pointers_disposed += 1;
        }
    }

    fn write_clip_text(&mut self, text: &str) -> bool {
        let mut state = self.inner.borrow_mut();
        if state.clip_write_fails {
            return false;
        }
        state.clipboard = Some(text.to_string());
        true
    }

    fn read_clip_text(&mut self) -> Option<String> {
        self.inner.borrow().clipboard.clone()
    }

    fn ain_devices(&mut self) -> Vec<AinDevice> {
        self.inner.borrow().devices.clone()
    }

    fn ain_read(&mut self, id: u32) -> Option<AinSample> {
        self.inner.borrow().samples.get(&id).cloned()
    }

    fn ain_release(&mut self, id: u32) {
        self.inner.borrow_mut().released_devices.push(id);
    }
}
