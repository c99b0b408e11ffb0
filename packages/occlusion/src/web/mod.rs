//! Browser implementations of the occlusion collaborators.
//!
//! - [`IntersectionViewport`] observes elements with an `IntersectionObserver`
//! - [`RafScheduler`] queues work with `requestAnimationFrame`
//! - [`ElementHost`] drives the class list of a raw `web_sys::Element`

mod host;
mod intersection;
mod raf;

pub use host::ElementHost;
pub use intersection::IntersectionViewport;
pub use raf::RafScheduler;

use crate::{OcclusionServices, Result, ViewportWatcher};

impl<T> OcclusionServices<T>
where
    IntersectionViewport: ViewportWatcher<T>,
{
    /// Services backed by the browser's `IntersectionObserver` and `requestAnimationFrame`.
    pub fn web() -> Result<Self> {
        Ok(Self::new(IntersectionViewport::new(), RafScheduler::new()?))
    }
}
