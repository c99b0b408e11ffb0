//! Fake collaborators shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use dioxus_occlusion::{
    AreaConfig, AreaHost, FrameScheduler, OccludableArea, OcclusionServices, Unregister,
    ViewportOptions, ViewportWatcher,
};

pub type Target = &'static str;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub struct Subscription {
    pub target: Target,
    pub callback: Rc<dyn Fn()>,
    pub options: Option<ViewportOptions>,
    pub cancelled: Rc<Cell<usize>>,
}

/// A viewport that only reports entries when told to.
///
/// It does not enforce the "once" contract so duplicate deliveries can be simulated.
#[derive(Default)]
pub struct FakeViewport {
    pub subscriptions: RefCell<Vec<Subscription>>,
}

impl FakeViewport {
    /// Deliver an entry to the latest subscription.
    pub fn enter(&self) {
        let callback = self
            .subscriptions
            .borrow()
            .last()
            .map(|subscription| subscription.callback.clone())
            .expect("nothing subscribed to the viewport");
        callback();
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    pub fn cancel_count(&self, index: usize) -> usize {
        self.subscriptions.borrow()[index].cancelled.get()
    }

    pub fn options(&self, index: usize) -> Option<ViewportOptions> {
        self.subscriptions.borrow()[index].options
    }
}

impl FakeViewport {
    fn subscribe(
        &self,
        target: Target,
        callback: Rc<dyn Fn()>,
        options: Option<ViewportOptions>,
    ) -> Unregister {
        let cancelled = Rc::new(Cell::new(0));
        self.subscriptions.borrow_mut().push(Subscription {
            target,
            callback,
            options,
            cancelled: cancelled.clone(),
        });

        Unregister::new(move || cancelled.set(cancelled.get() + 1))
    }
}

impl ViewportWatcher<Target> for FakeViewport {
    fn on_in_viewport_once(
        &self,
        target: &Target,
        callback: Rc<dyn Fn()>,
        options: Option<ViewportOptions>,
    ) -> Unregister {
        self.subscribe(*target, callback, options)
    }
}

#[cfg(feature = "dioxus")]
impl ViewportWatcher<Rc<dioxus::prelude::MountedData>> for FakeViewport {
    fn on_in_viewport_once(
        &self,
        _target: &Rc<dioxus::prelude::MountedData>,
        callback: Rc<dyn Fn()>,
        options: Option<ViewportOptions>,
    ) -> Unregister {
        self.subscribe("mounted", callback, options)
    }
}

/// A scheduler whose frames are advanced by hand.
#[derive(Default)]
pub struct ManualScheduler {
    tasks: RefCell<VecDeque<Box<dyn FnOnce()>>>,
    pub scheduled: Cell<usize>,
}

impl ManualScheduler {
    /// Run every task queued before this frame. Tasks queued while running wait for the next one.
    pub fn flush(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for task in tasks {
            task();
        }
    }

    pub fn queued(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_work(&self, work: Box<dyn FnOnce()>) {
        self.scheduled.set(self.scheduled.get() + 1);
        self.tasks.borrow_mut().push_back(work);
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub classes: RefCell<Vec<String>>,
    pub added: Cell<usize>,
    pub render_requests: Cell<usize>,
}

impl RecordingHost {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }
}

impl AreaHost for RecordingHost {
    fn add_class(&self, class: &str) {
        self.added.set(self.added.get() + 1);
        if !self.has_class(class) {
            self.classes.borrow_mut().push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|c| c != class);
    }

    fn request_render(&self) {
        self.render_requests.set(self.render_requests.get() + 1);
    }
}

pub struct Harness {
    pub viewport: Rc<FakeViewport>,
    pub scheduler: Rc<ManualScheduler>,
    pub host: Rc<RecordingHost>,
    pub area: OccludableArea<Target>,
}

impl Harness {
    pub fn new(config: AreaConfig) -> Self {
        init_tracing();

        let viewport = Rc::new(FakeViewport::default());
        let scheduler = Rc::new(ManualScheduler::default());
        let host = Rc::new(RecordingHost::default());

        let services = OcclusionServices::<Target> {
            viewport: viewport.clone(),
            scheduler: scheduler.clone(),
        };
        let area = OccludableArea::new(config, services, host.clone());

        Self {
            viewport,
            scheduler,
            host,
            area,
        }
    }

    pub fn mount(&mut self) {
        self.area.did_insert_element(&"area");
        self.render("");
    }

    /// Run a render pass and return the text it produced.
    pub fn render(&self, contents: &str) -> String {
        let text = if self.area.should_render() {
            contents.to_string()
        } else {
            String::new()
        };
        self.area.did_render();
        text
    }
}
