//! The viewport service an occludable area subscribes to.

use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Margins applied to the viewport before intersections are computed, in pixels.
///
/// Negative values push the corresponding edge of the viewport outward, so a bottom margin of
/// `-100.0` reports an element as visible while it is still 100 pixels below the fold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// Format the margin as a CSS `rootMargin` string for a native `IntersectionObserver`.
    ///
    /// Native observers grow the root for positive margins, so every side is negated.
    pub fn to_css(&self) -> String {
        fn side(value: f64) -> String {
            let value = -value;
            if value == 0.0 {
                "0px".to_string()
            } else {
                format!("{value}px")
            }
        }

        format!(
            "{} {} {} {}",
            side(self.top),
            side(self.right),
            side(self.bottom),
            side(self.left)
        )
    }
}

/// Options passed along with a viewport subscription.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportOptions {
    pub root_margin: RootMargin,
}

impl ViewportOptions {
    /// Build the options for a bottom buffer.
    ///
    /// A missing, zero or NaN buffer yields `None` so the watcher falls back to its own defaults.
    pub fn from_bottom_buffer(buffer: Option<f64>) -> Option<Self> {
        let buffer = buffer.filter(|buffer| *buffer != 0.0 && !buffer.is_nan())?;

        Some(Self {
            root_margin: RootMargin {
                top: 0.0,
                right: 0.0,
                bottom: -buffer,
                left: 0.0,
            },
        })
    }
}

/// A one-shot cancellation handle for a viewport subscription.
///
/// The inner closure runs at most once. Calling an exhausted (or [`Unregister::noop`]) handle does
/// nothing.
#[derive(Default)]
pub struct Unregister {
    inner: Option<Box<dyn FnOnce()>>,
}

impl Unregister {
    pub fn new(unregister: impl FnOnce() + 'static) -> Self {
        Self {
            inner: Some(Box::new(unregister)),
        }
    }

    pub fn noop() -> Self {
        Self { inner: None }
    }

    /// Whether calling this handle would still run the cancellation.
    pub fn is_armed(&self) -> bool {
        self.inner.is_some()
    }

    pub fn call(&mut self) {
        if let Some(unregister) = self.inner.take() {
            unregister();
        }
    }
}

impl Debug for Unregister {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unregister")
            .field("armed", &self.is_armed())
            .finish()
    }
}

/// Something that can tell when an element enters the viewport.
///
/// `T` is whatever handle the renderer uses to identify the observed element.
pub trait ViewportWatcher<T> {
    /// Run `callback` the first time `target` enters the viewport.
    ///
    /// Implementations are expected to deliver the callback at most once, but callers must not
    /// rely on it. The returned handle cancels the subscription; it must stay safe to call after
    /// the callback fired.
    fn on_in_viewport_once(
        &self,
        target: &T,
        callback: Rc<dyn Fn()>,
        options: Option<ViewportOptions>,
    ) -> Unregister;
}

impl<T, W: ViewportWatcher<T> + ?Sized> ViewportWatcher<T> for Rc<W> {
    fn on_in_viewport_once(
        &self,
        target: &T,
        callback: Rc<dyn Fn()>,
        options: Option<ViewportOptions>,
    ) -> Unregister {
        (**self).on_in_viewport_once(target, callback, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn bottom_buffer_expands_bottom_only() {
        let options = ViewportOptions::from_bottom_buffer(Some(100.0)).unwrap();
        assert_eq!(
            options.root_margin,
            RootMargin {
                top: 0.0,
                right: 0.0,
                bottom: -100.0,
                left: 0.0
            }
        );
    }

    #[test]
    fn falsy_buffers_use_watcher_defaults() {
        assert_eq!(ViewportOptions::from_bottom_buffer(None), None);
        assert_eq!(ViewportOptions::from_bottom_buffer(Some(0.0)), None);
        assert_eq!(ViewportOptions::from_bottom_buffer(Some(f64::NAN)), None);
    }

    #[test]
    fn css_margin_flips_signs() {
        let options = ViewportOptions::from_bottom_buffer(Some(100.0)).unwrap();
        assert_eq!(options.root_margin.to_css(), "0px 0px 100px 0px");
        assert_eq!(RootMargin::default().to_css(), "0px 0px 0px 0px");
    }

    #[test]
    fn unregister_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let mut unregister = Unregister::new({
            let calls = calls.clone();
            move || calls.set(calls.get() + 1)
        });

        assert!(unregister.is_armed());
        unregister.call();
        unregister.call();
        assert!(!unregister.is_armed());
        assert_eq!(calls.get(), 1);

        let mut noop = Unregister::noop();
        noop.call();
        assert!(!noop.is_armed());
    }
}
