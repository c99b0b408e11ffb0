use std::rc::Rc;

use web_sys::Element;

use crate::{AreaHost, OcclusionError};

/// An [`AreaHost`] that edits the class list of a DOM element directly.
///
/// This is for renderers that own their elements and drive an [`OccludableArea`] by hand; the
/// [`Occludable`] component renders its classes declaratively and does not use it. Render requests
/// are forwarded to the callback the host was created with.
///
/// ```rust, ignore
/// let host = Rc::new(ElementHost::new(element.clone(), move || redraw()));
/// let mut area = OccludableArea::new(config, OcclusionServices::web()?, host);
/// area.did_insert_element(&element);
/// ```
///
/// [`OccludableArea`]: crate::OccludableArea
/// [`Occludable`]: crate::Occludable
#[derive(Clone)]
pub struct ElementHost {
    element: Element,
    on_render: Rc<dyn Fn()>,
}

impl ElementHost {
    pub fn new(element: Element, on_render: impl Fn() + 'static) -> Self {
        Self {
            element,
            on_render: Rc::new(on_render),
        }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl AreaHost for ElementHost {
    fn add_class(&self, class: &str) {
        if let Err(err) = self.element.class_list().add_1(class) {
            tracing::warn!("{}", OcclusionError::ClassList(format!("{err:?}")));
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.element.class_list().remove_1(class) {
            tracing::warn!("{}", OcclusionError::ClassList(format!("{err:?}")));
        }
    }

    fn request_render(&self) {
        (self.on_render)()
    }
}
