use std::cell::RefCell;
use std::rc::Rc;

use crate::gate::{RenderGate, Visibility};
use crate::scheduler::{defer_reveal, FrameScheduler, RevealHandle};
use crate::viewport::{Unregister, ViewportOptions, ViewportWatcher};

/// Configuration of an occludable area.
///
/// ```rust
/// use dioxus_occlusion::AreaConfig;
///
/// let config = AreaConfig::new()
///     .with_occlusion(true)
///     .with_hint_class_name("feed-section")
///     .with_root_margin_bottom_buffer(200.0);
///
/// assert!(config.occlusion_enabled);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialize",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AreaConfig {
    /// Defer rendering the contents until the area enters the viewport.
    pub occlusion_enabled: bool,

    /// A CSS class that reserves the space of the unrendered contents, usually with a `min-height`.
    pub hint_class_name: String,

    /// Report the area as visible this many pixels before it crosses the bottom of the viewport.
    pub root_margin_bottom_buffer: Option<f64>,

    /// The element that wraps the contents while occlusion is enabled.
    pub tag_name: String,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            occlusion_enabled: false,
            hint_class_name: String::new(),
            root_margin_bottom_buffer: None,
            tag_name: "div".to_string(),
        }
    }
}

impl AreaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occlusion(mut self, enabled: bool) -> Self {
        self.occlusion_enabled = enabled;
        self
    }

    pub fn with_hint_class_name(mut self, class: impl Into<String>) -> Self {
        self.hint_class_name = class.into();
        self
    }

    pub fn with_root_margin_bottom_buffer(mut self, buffer: f64) -> Self {
        self.root_margin_bottom_buffer = Some(buffer);
        self
    }

    pub fn with_tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = tag.into();
        self
    }
}

/// The renderer side of an occludable area: the class list of its element and a way to ask for
/// another render pass.
pub trait AreaHost {
    fn add_class(&self, class: &str);

    /// Remove a class. Removing a class that is not present does nothing.
    fn remove_class(&self, class: &str);

    /// Ask the renderer to render the area again, batched with whatever else is pending.
    fn request_render(&self);
}

/// The collaborators an occludable area needs from its environment.
pub struct OcclusionServices<T> {
    pub viewport: Rc<dyn ViewportWatcher<T>>,
    pub scheduler: Rc<dyn FrameScheduler>,
}

impl<T> OcclusionServices<T> {
    pub fn new(
        viewport: impl ViewportWatcher<T> + 'static,
        scheduler: impl FrameScheduler + 'static,
    ) -> Self {
        Self {
            viewport: Rc::new(viewport),
            scheduler: Rc::new(scheduler),
        }
    }
}

impl<T> Clone for OcclusionServices<T> {
    fn clone(&self) -> Self {
        Self {
            viewport: self.viewport.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}

/// What the area renders around its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container<'a> {
    /// No markup of its own, the contents are rendered in place.
    Passthrough,

    /// A real element with the given tag, needed to carry the hint class and to be observed.
    Element(&'a str),
}

/// An area whose contents are only rendered once it scrolls into view.
///
/// The controller does not render anything itself. The renderer calls the lifecycle methods
/// ([`OccludableArea::did_insert_element`], [`OccludableArea::did_render`] and
/// [`OccludableArea::will_destroy`]) and reads [`OccludableArea::should_render`] to decide whether
/// to emit the contents.
///
/// With occlusion disabled the area is a transparent wrapper: the contents render immediately, no
/// class is touched and nothing subscribes to the viewport.
pub struct OccludableArea<T: 'static> {
    config: AreaConfig,
    lazy: bool,
    gate: Rc<RenderGate>,
    pending: Rc<RefCell<Option<RevealHandle>>>,
    unregister: Unregister,
    services: Option<OcclusionServices<T>>,
    host: Rc<dyn AreaHost>,
}

impl<T: 'static> OccludableArea<T> {
    pub fn new(config: AreaConfig, services: OcclusionServices<T>, host: Rc<dyn AreaHost>) -> Self {
        Self::build(config, Some(services), host)
    }

    /// Create an area with no viewport service. A lazy area built this way never reveals.
    pub fn detached(config: AreaConfig, host: Rc<dyn AreaHost>) -> Self {
        Self::build(config, None, host)
    }

    fn build(
        config: AreaConfig,
        services: Option<OcclusionServices<T>>,
        host: Rc<dyn AreaHost>,
    ) -> Self {
        let lazy = config.occlusion_enabled;

        Self {
            gate: Rc::new(RenderGate::new(lazy)),
            pending: Rc::new(RefCell::new(None)),
            unregister: Unregister::noop(),
            lazy,
            config,
            services,
            host,
        }
    }

    pub fn config(&self) -> &AreaConfig {
        &self.config
    }

    pub fn hint_class_name(&self) -> &str {
        &self.config.hint_class_name
    }

    /// Fixed at creation from [`AreaConfig::occlusion_enabled`].
    pub fn uses_lazy_rendering(&self) -> bool {
        self.lazy
    }

    pub fn visibility(&self) -> Visibility {
        self.gate.visibility()
    }

    pub fn should_render(&self) -> bool {
        self.gate.should_render()
    }

    pub fn is_rendered(&self) -> bool {
        self.gate.is_rendered()
    }

    /// Whether a reveal was scheduled and has not run yet.
    pub fn is_reveal_pending(&self) -> bool {
        self.pending
            .borrow()
            .as_ref()
            .is_some_and(RevealHandle::is_pending)
    }

    pub fn container(&self) -> Container<'_> {
        if self.lazy {
            Container::Element(&self.config.tag_name)
        } else {
            Container::Passthrough
        }
    }

    /// The classes the container should carry from its very first render.
    ///
    /// Renderers that build the element's class list declaratively read this before the element
    /// exists, so the hint holds the space before [`OccludableArea::did_insert_element`] runs.
    pub fn initial_classes(&self) -> Vec<&str> {
        if self.lazy && !self.gate.is_rendered() && !self.config.hint_class_name.is_empty() {
            vec![self.config.hint_class_name.as_str()]
        } else {
            Vec::new()
        }
    }

    pub fn viewport_options(&self) -> Option<ViewportOptions> {
        ViewportOptions::from_bottom_buffer(self.config.root_margin_bottom_buffer)
    }

    /// Called once the area's element is attached to the document.
    ///
    /// In lazy mode this applies the hint class and subscribes to the first viewport entry of
    /// `target`. Mounting again replaces the earlier subscription.
    pub fn did_insert_element(&mut self, target: &T) {
        if !self.lazy {
            return;
        }

        if !self.gate.is_rendered() && !self.config.hint_class_name.is_empty() {
            self.host.add_class(&self.config.hint_class_name);
        }

        let Some(services) = self.services.clone() else {
            tracing::warn!("occludable area mounted without a viewport service, it will stay hidden");
            return;
        };

        // re-entrant mount
        self.unregister.call();

        let callback: Rc<dyn Fn()> = Rc::new({
            let gate = self.gate.clone();
            let pending = self.pending.clone();
            let scheduler = services.scheduler.clone();
            let host = self.host.clone();

            move || {
                if gate.should_render() {
                    return;
                }

                if pending.borrow().as_ref().is_some_and(RevealHandle::is_pending) {
                    tracing::trace!("ignoring duplicate viewport entry");
                    return;
                }

                let handle = defer_reveal(scheduler.clone(), {
                    let gate = gate.clone();
                    let host = host.clone();
                    move || {
                        if gate.reveal() {
                            tracing::debug!("revealing occludable area");
                            host.request_render();
                        }
                    }
                });

                *pending.borrow_mut() = Some(handle);
            }
        });

        tracing::trace!(
            hint = %self.config.hint_class_name,
            buffer = ?self.config.root_margin_bottom_buffer,
            "subscribing occludable area to the viewport"
        );

        let options = self.viewport_options();
        self.unregister = services
            .viewport
            .on_in_viewport_once(target, callback, options);
    }

    /// Called after every render pass of the area.
    pub fn did_render(&self) {
        if self.gate.is_rendered() && !self.config.hint_class_name.is_empty() {
            self.host.remove_class(&self.config.hint_class_name);
        }
    }

    /// Called when the area is torn down.
    ///
    /// Releases the viewport subscription and drops a reveal that has not run yet. Calling this
    /// more than once, or on an area that never subscribed, does nothing.
    pub fn will_destroy(&mut self) {
        if self.unregister.is_armed() {
            tracing::trace!("unsubscribing occludable area from the viewport");
        }
        self.unregister.call();

        if let Some(handle) = self.pending.borrow_mut().take() {
            handle.cancel();
        }
    }
}

impl<T: 'static> Drop for OccludableArea<T> {
    fn drop(&mut self) {
        self.will_destroy();
    }
}

impl<T: 'static> std::fmt::Debug for OccludableArea<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OccludableArea")
            .field("config", &self.config)
            .field("visibility", &self.gate.visibility())
            .field("is_rendered", &self.gate.is_rendered())
            .field("unregister", &self.unregister)
            .finish()
    }
}
