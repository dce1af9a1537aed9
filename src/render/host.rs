//! The surface the view draws onto.
//!
//! A render host owns a persistent retained canvas. The view attaches
//! nodes to it, mutates them in place every frame and detaches them when
//! the entity they stand for disappears. The host decides how (and
//! whether) nodes actually reach pixels.

use glam::Vec2;

use super::colors::Color;

/// Opaque handle to a node attached to a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlign {
    /// Anchor at the text's centre
    Center,
    /// Anchor at the text's top-left corner
    TopLeft,
}

/// What a node draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Circle around the node position; radius set separately
    Circle,
    /// Text anchored at the node position
    Label { font_size: f32, align: LabelAlign },
}

/// Capabilities the view needs from a display surface.
///
/// Setters on a node that is not attached must be ignored, not panic.
/// Positions are screen pixels, origin top-left, Y down.
pub trait RenderHost {
    /// Attach a new node on top of everything attached so far.
    fn attach(&mut self, kind: NodeKind) -> NodeId;

    /// Remove a node from the surface. Unknown ids are ignored.
    fn detach(&mut self, node: NodeId);

    fn set_position(&mut self, node: NodeId, position: Vec2);

    fn set_fill(&mut self, node: NodeId, color: Color);

    fn set_stroke(&mut self, node: NodeId, color: Color);

    fn set_circle_radius(&mut self, node: NodeId, radius: f32);

    fn set_text(&mut self, node: NodeId, text: &str);

    /// Current size of the render surface in pixels.
    fn surface_size(&self) -> Vec2;
}
