/// The result type used by the browser integrations.
pub type Result<T, E = OcclusionError> = std::result::Result<T, E>;

/// Failures talking to the browser.
///
/// None of these reach the lifecycle methods of an area: a watcher that cannot observe an element
/// logs the error and leaves the area hidden.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OcclusionError {
    #[error("no global `window` is available")]
    NoWindow,

    #[error("failed to create an IntersectionObserver: {0}")]
    Observer(String),

    #[error("failed to request an animation frame: {0}")]
    AnimationFrame(String),

    #[error("failed to update the class list: {0}")]
    ClassList(String),

    #[error("the mounted node is not a DOM element")]
    NotAnElement,
}
