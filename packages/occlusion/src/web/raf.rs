use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::{FrameScheduler, OcclusionError, Result};

/// A [`FrameScheduler`] that runs work in the next `requestAnimationFrame` callback.
#[derive(Debug, Clone)]
pub struct RafScheduler {
    window: Window,
}

impl RafScheduler {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(OcclusionError::NoWindow)?;
        Ok(Self { window })
    }

    pub fn request(&self, work: Box<dyn FnOnce()>) -> Result<i32> {
        let callback = Closure::once_into_js(move || work());
        self.window
            .request_animation_frame(callback.unchecked_ref())
            .map_err(|err| OcclusionError::AnimationFrame(format!("{err:?}")))
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule_work(&self, work: Box<dyn FnOnce()>) {
        if let Err(err) = self.request(work) {
            tracing::error!("{err}");
        }
    }
}
