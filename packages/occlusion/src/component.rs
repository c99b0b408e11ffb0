//! The occludable area as a Dioxus component.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::schedule_update;
use dioxus::prelude::*;

use crate::{AreaConfig, AreaHost, Container, OccludableArea, OcclusionServices};

/// The services the [`Occludable`] component looks up in its context.
pub type MountedServices = OcclusionServices<Rc<MountedData>>;

/// Provide the services every [`Occludable`] below this component will use.
///
/// ```rust, ignore
/// fn app() -> Element {
///     use_occlusion_services(|| OcclusionServices::web().expect("running in a browser"));
///
///     rsx! {
///         for section in 0..100 {
///             Occludable { occlusion_enabled: true, hint_class_name: "section", "section {section}" }
///         }
///     }
/// }
/// ```
pub fn use_occlusion_services(make: impl FnOnce() -> MountedServices) -> MountedServices {
    use_context_provider(make)
}

/// Create the occludable area backing a component.
///
/// The config is read once, when the component is created. The area is torn down with the
/// component. [`Occludable`] is built on this hook; use it directly to render the container
/// yourself.
pub fn use_occludable_area(config: impl FnOnce() -> AreaConfig) -> OccludableHandle {
    let services = try_use_context::<MountedServices>();
    let handle = use_hook(|| OccludableHandle::new(config(), services, schedule_update()));

    use_drop({
        let handle = handle.clone();
        move || handle.destroy()
    });

    handle
}

/// What a single render pass of an occludable area should emit.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    /// The tag of the container, or `None` to render the children in place.
    pub container: Option<String>,

    /// Whether the children are part of this pass.
    pub revealed: bool,

    /// The `class` attribute of the container.
    pub class: String,
}

/// A shared handle to the area behind a component, returned by [`use_occludable_area`].
#[derive(Clone)]
pub struct OccludableHandle {
    area: Rc<RefCell<OccludableArea<Rc<MountedData>>>>,
    host: Rc<ComponentHost>,
}

impl OccludableHandle {
    fn new(
        config: AreaConfig,
        services: Option<MountedServices>,
        update: Arc<dyn Fn() + Send + Sync>,
    ) -> Self {
        let host = Rc::new(ComponentHost::new(update));
        let area_host: Rc<dyn AreaHost> = host.clone();

        let area = match services {
            Some(services) => OccludableArea::new(config, services, area_host),
            None => OccludableArea::detached(config, area_host),
        };

        // the hint has to be on the first render, before the element is mounted
        host.seed(area.initial_classes());

        Self {
            area: Rc::new(RefCell::new(area)),
            host,
        }
    }

    /// Hand the mounted container to the area. Call this from the container's `onmounted`.
    pub fn mount(&self, target: Rc<MountedData>) {
        self.area.borrow_mut().did_insert_element(&target);
    }

    /// Run the render hook of the area and describe what to emit.
    ///
    /// The class list is rendered declaratively, so a hint dropped by the render hook is already
    /// gone from the returned `class`.
    pub fn render_pass(&self) -> RenderPass {
        let area = self.area.borrow();
        area.did_render();

        let container = match area.container() {
            Container::Passthrough => None,
            Container::Element(tag) => Some(tag.to_string()),
        };

        RenderPass {
            container,
            revealed: area.should_render(),
            class: self.host.class_attribute(),
        }
    }

    pub fn should_render(&self) -> bool {
        self.area.borrow().should_render()
    }

    fn destroy(&self) {
        self.area.borrow_mut().will_destroy();
    }
}

/// Defer rendering `children` until the component scrolls into view.
///
/// With `occlusion_enabled` unset the children are rendered in place without any wrapping markup.
/// Otherwise they are wrapped in a `tag_name` element that carries `hint_class_name` until the
/// contents are revealed. The class should give the element a `min-height` close to the size of
/// the contents, so revealing them does not shift the page.
///
/// The props are read once, when the component is created.
#[component]
pub fn Occludable(
    #[props(default)] occlusion_enabled: bool,
    #[props(default, into)] hint_class_name: String,
    root_margin_bottom_buffer: Option<f64>,
    #[props(default = "div".to_string(), into)] tag_name: String,
    children: Element,
) -> Element {
    let handle = use_occludable_area(|| AreaConfig {
        occlusion_enabled,
        hint_class_name,
        root_margin_bottom_buffer,
        tag_name,
    });

    let RenderPass {
        container,
        revealed,
        class,
    } = handle.render_pass();

    let Some(tag) = container else {
        return children;
    };

    let onmounted = move |evt: MountedEvent| handle.mount(evt.data());

    macro_rules! container {
        ($tag:ident) => {
            rsx! {
                $tag {
                    class: "{class}",
                    onmounted: onmounted,
                    if revealed {
                        {children}
                    }
                }
            }
        };
    }

    match tag.as_str() {
        "section" => container!(section),
        "article" => container!(article),
        "li" => container!(li),
        "span" => container!(span),
        _ => container!(div),
    }
}

/// Keeps the classes of the component's element and re-renders the component when they change.
///
/// Removals only happen from inside a render pass and are picked up by that same pass, so they do
/// not schedule another one.
struct ComponentHost {
    classes: RefCell<Vec<String>>,
    update: Arc<dyn Fn() + Send + Sync>,
}

impl ComponentHost {
    fn new(update: Arc<dyn Fn() + Send + Sync>) -> Self {
        Self {
            classes: RefCell::new(Vec::new()),
            update,
        }
    }

    /// Start with `classes` without asking for a render.
    fn seed<'a>(&self, classes: impl IntoIterator<Item = &'a str>) {
        let mut list = self.classes.borrow_mut();
        for class in classes {
            if !list.iter().any(|c| c == class) {
                list.push(class.to_string());
            }
        }
    }

    fn class_attribute(&self) -> String {
        self.classes.borrow().join(" ")
    }
}

impl AreaHost for ComponentHost {
    fn add_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if classes.iter().any(|c| c == class) {
            return;
        }

        classes.push(class.to_string());
        drop(classes);
        (self.update)();
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|c| c != class);
    }

    fn request_render(&self) {
        (self.update)();
    }
}
