//! Browser scheduler backed by `requestAnimationFrame` and `setTimeout`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::sim::schedule::{FrameHandle, Scheduler, TimerHandle, Wakeup};

/// Receives every wakeup; the shell routes it back into the game
pub type WakeupSink = Rc<dyn Fn(Wakeup)>;

/// Handle -> raw browser id, for requests that have not fired yet
type Pending = Rc<RefCell<HashMap<u32, i32>>>;

pub struct BrowserScheduler {
    window: web_sys::Window,
    sink: WakeupSink,
    next_handle: u32,
    frames: Pending,
    timers: Pending,
}

impl BrowserScheduler {
    pub fn new(window: web_sys::Window, sink: WakeupSink) -> Self {
        Self {
            window,
            sink,
            next_handle: 0,
            frames: Rc::default(),
            timers: Rc::default(),
        }
    }

    fn next_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);
        handle
    }

    /// Callback that forgets its own pending entry before waking the game
    fn callback(&self, pending: &Pending, key: u32, wakeup: Wakeup) -> JsValue {
        let sink = self.sink.clone();
        let pending = pending.clone();
        Closure::once_into_js(move |_: JsValue| {
            pending.borrow_mut().remove(&key);
            sink(wakeup);
        })
    }
}

impl Scheduler for BrowserScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_handle());
        let callback = self.callback(&self.frames, handle.0, Wakeup::Frame(handle));
        match self.window.request_animation_frame(callback.unchecked_ref()) {
            Ok(raw) => {
                self.frames.borrow_mut().insert(handle.0, raw);
            }
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let raw = self.frames.borrow_mut().remove(&handle.0);
        if let Some(raw) = raw {
            let _ = self.window.cancel_animation_frame(raw);
        }
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle {
        let handle = TimerHandle(self.next_handle());
        let callback = self.callback(&self.timers, handle.0, Wakeup::Timeout(handle));
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                i32::try_from(delay_ms).unwrap_or(i32::MAX),
            ) {
            Ok(raw) => {
                self.timers.borrow_mut().insert(handle.0, raw);
            }
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        let raw = self.timers.borrow_mut().remove(&handle.0);
        if let Some(raw) = raw {
            self.window.clear_timeout_with_handle(raw);
        }
    }
}
