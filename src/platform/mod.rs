//! Platform abstraction layer
//!
//! The engine talks to its host through `Host`: a process-wide keyboard
//! source it subscribes to while attached, and a one-shot frame scheduler.
//! The browser implementation lives in `web::widget`; `HeadlessHost` runs
//! the same engine natively and in tests.

/// Identifier of a scheduled frame callback
pub type FrameHandle = i32;

/// Services the engine needs from its environment
pub trait Host {
    /// Start delivering key events to the engine
    fn subscribe_input(&mut self);
    /// Stop delivering key events
    fn unsubscribe_input(&mut self);
    /// Schedule one frame callback. `None` if the host could not schedule it.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    /// Cancel a scheduled frame callback
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// In-memory host: records subscriptions and frame requests
#[derive(Debug, Default)]
pub struct HeadlessHost {
    subscribed: bool,
    subscribe_calls: u32,
    unsubscribe_calls: u32,
    next_handle: FrameHandle,
    pending: Option<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn subscribe_calls(&self) -> u32 {
        self.subscribe_calls
    }

    pub fn unsubscribe_calls(&self) -> u32 {
        self.unsubscribe_calls
    }

    /// Frame scheduled and not yet delivered or cancelled
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn cancelled_frames(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    /// Take the pending frame as if the host were about to run it
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl Host for HeadlessHost {
    fn subscribe_input(&mut self) {
        self.subscribed = true;
        self.subscribe_calls += 1;
    }

    fn unsubscribe_input(&mut self) {
        self.subscribed = false;
        self.unsubscribe_calls += 1;
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_handle += 1;
        self.pending = Some(self.next_handle);
        self.pending
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}
