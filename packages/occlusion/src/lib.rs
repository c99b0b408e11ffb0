//! Dioxus Occlusion
//!
//! ## Overview
//! ------------
//! An occludable area wraps content that is expensive to render and usually far below the fold.
//! Until the area scrolls into view only its container is rendered, sized by a hint class; once
//! the viewport service reports the first intersection the contents are revealed two animation
//! frames later, so the frame that noticed the intersection paints undisturbed.
//!
//! The core in this crate knows nothing about any renderer. The viewport, the frame scheduler and
//! the element's class list are traits ([`ViewportWatcher`], [`FrameScheduler`], [`AreaHost`]) that
//! a renderer implements. With the `dioxus` feature the [`Occludable`] component wires them up to
//! the Dioxus lifecycle, and with the `web` feature the browser implementations become available.

mod area;
mod error;
mod gate;
mod scheduler;
mod viewport;

#[cfg(feature = "dioxus")]
mod component;

#[cfg(feature = "web")]
pub mod web;

pub use area::{AreaConfig, AreaHost, Container, OccludableArea, OcclusionServices};
pub use error::{OcclusionError, Result};
pub use gate::{RenderGate, Visibility};
pub use scheduler::{defer_reveal, FrameScheduler, RevealHandle};
pub use viewport::{RootMargin, Unregister, ViewportOptions, ViewportWatcher};

#[cfg(feature = "dioxus")]
pub use component::{
    use_occludable_area, use_occlusion_services, MountedServices, Occludable, OccludableHandle,
    OccludableProps, RenderPass,
};
