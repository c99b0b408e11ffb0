use std::cell::Cell;

/// The two states an occludable area can be in.
///
/// The only legal transition is `Hidden -> Revealed`. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    /// The contents are not rendered and the hint class holds the space.
    #[default]
    Hidden,

    /// The contents are rendered.
    Revealed,
}

/// The render gate of an occludable area.
///
/// Lazy gates start [`Visibility::Hidden`] and flip once, eager gates start (and stay)
/// [`Visibility::Revealed`]. `is_rendered` only becomes true through [`RenderGate::reveal`], so an
/// eager gate never asks for the hint class to be removed.
#[derive(Debug)]
pub struct RenderGate {
    visibility: Cell<Visibility>,
    rendered: Cell<bool>,
}

impl RenderGate {
    pub fn new(lazy: bool) -> Self {
        let visibility = if lazy {
            Visibility::Hidden
        } else {
            Visibility::Revealed
        };

        Self {
            visibility: Cell::new(visibility),
            rendered: Cell::new(false),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.get()
    }

    /// Whether the contents should be part of the rendered output.
    pub fn should_render(&self) -> bool {
        self.visibility.get() == Visibility::Revealed
    }

    /// Whether the gate was opened by a reveal.
    pub fn is_rendered(&self) -> bool {
        self.rendered.get()
    }

    /// Open the gate.
    ///
    /// Returns `true` if this call performed the transition and `false` if the gate was already open.
    pub fn reveal(&self) -> bool {
        if self.should_render() {
            return false;
        }

        self.visibility.set(Visibility::Revealed);
        self.rendered.set(true);
        true
    }
}
