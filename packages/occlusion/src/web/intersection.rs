use std::cell::Cell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::{OcclusionError, Result, Unregister, ViewportOptions, ViewportWatcher};

/// A [`ViewportWatcher`] backed by one `IntersectionObserver` per subscription.
///
/// The observer disconnects itself after the first intersecting entry, so the callback is
/// delivered at most once.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionViewport;

impl IntersectionViewport {
    pub fn new() -> Self {
        Self
    }

    /// Observe `element` until it first intersects the viewport.
    pub fn observe(
        &self,
        element: &Element,
        callback: Rc<dyn Fn()>,
        options: Option<ViewportOptions>,
    ) -> Result<Unregister> {
        let fired = Rc::new(Cell::new(false));

        let listener: Closure<dyn FnMut(Array, IntersectionObserver)> = Closure::wrap(Box::new({
            let fired = fired.clone();
            move |entries: Array, observer: IntersectionObserver| {
                if fired.get() {
                    return;
                }

                let intersecting = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .any(|entry| entry.is_intersecting());

                if intersecting {
                    fired.set(true);
                    observer.disconnect();
                    callback();
                }
            }
        }));

        let init = IntersectionObserverInit::new();
        if let Some(options) = options {
            init.set_root_margin(&options.root_margin.to_css());
        }

        let observer =
            IntersectionObserver::new_with_options(listener.as_ref().unchecked_ref(), &init)
                .map_err(|err| OcclusionError::Observer(format!("{err:?}")))?;
        observer.observe(element);

        // the listener has to outlive the observer, so it is only dropped on unregister
        Ok(Unregister::new(move || {
            observer.disconnect();
            drop(listener);
        }))
    }
}

impl ViewportWatcher<Element> for IntersectionViewport {
    fn on_in_viewport_once(
        &self,
        target: &Element,
        callback: Rc<dyn Fn()>,
        options: Option<ViewportOptions>,
    ) -> Unregister {
        self.observe(target, callback, options).unwrap_or_else(|err| {
            tracing::error!("{err}");
            Unregister::noop()
        })
    }
}

#[cfg(feature = "dioxus")]
impl ViewportWatcher<Rc<dioxus::prelude::MountedData>> for IntersectionViewport {
    fn on_in_viewport_once(
        &self,
        target: &Rc<dioxus::prelude::MountedData>,
        callback: Rc<dyn Fn()>,
        options: Option<ViewportOptions>,
    ) -> Unregister {
        use dioxus::web::WebEventExt;

        match target.try_as_web_event() {
            Some(element) => self.on_in_viewport_once(&element, callback, options),
            None => {
                tracing::error!("{}", OcclusionError::NotAnElement);
                Unregister::noop()
            }
        }
    }
}
