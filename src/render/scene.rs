//! In-memory retained scene.
//!
//! Implements [`RenderHost`] without drawing anything. Backends that do
//! draw (the terminal UI) keep one of these and paint it each frame;
//! tests inspect it directly.

use std::collections::BTreeMap;

use glam::Vec2;

use super::colors::Color;
use super::host::{NodeId, NodeKind, RenderHost};

/// A node's current retained state.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Vec2,
    pub fill: Color,
    pub stroke: Color,
    pub radius: f32,
    pub text: String,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            position: Vec2::ZERO,
            fill: Color::WHITE,
            stroke: Color::CLEAR,
            radius: 0.0,
            text: String::new(),
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self.kind, NodeKind::Label { .. })
    }
}

/// Headless retained canvas.
#[derive(Debug, Clone)]
pub struct SceneCanvas {
    size: Vec2,
    // Ids are issued in increasing order, so key order is attach order.
    nodes: BTreeMap<NodeId, Node>,
    next_id: u32,
    attached_total: u64,
    detached_total: u64,
}

impl SceneCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            nodes: BTreeMap::new(),
            next_id: 0,
            attached_total: 0,
            detached_total: 0,
        }
    }

    /// Update surface size (call on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attached nodes, bottom-most first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn circle_count(&self) -> usize {
        self.nodes.values().filter(|n| n.kind == NodeKind::Circle).count()
    }

    pub fn label_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_label()).count()
    }

    /// Nodes attached over the canvas lifetime.
    pub fn attached_total(&self) -> u64 {
        self.attached_total
    }

    /// Nodes detached over the canvas lifetime.
    pub fn detached_total(&self) -> u64 {
        self.detached_total
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node)
    }
}

impl Default for SceneCanvas {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl RenderHost for SceneCanvas {
    fn attach(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.nodes.insert(id, Node::new(kind));
        self.attached_total += 1;
        id
    }

    fn detach(&mut self, node: NodeId) {
        if self.nodes.remove(&node).is_some() {
            self.detached_total += 1;
        }
    }

    fn set_position(&mut self, node: NodeId, position: Vec2) {
        if let Some(n) = self.node_mut(node) {
            n.position = position;
        }
    }

    fn set_fill(&mut self, node: NodeId, color: Color) {
        if let Some(n) = self.node_mut(node) {
            n.fill = color;
        }
    }

    fn set_stroke(&mut self, node: NodeId, color: Color) {
        if let Some(n) = self.node_mut(node) {
            n.stroke = color;
        }
    }

    fn set_circle_radius(&mut self, node: NodeId, radius: f32) {
        if let Some(n) = self.node_mut(node) {
            n.radius = radius;
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            n.text.clear();
            n.text.push_str(text);
        }
    }

    fn surface_size(&self) -> Vec2 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::host::LabelAlign;

    #[test]
    fn test_attach_order_is_draw_order() {
        let mut canvas = SceneCanvas::default();
        let a = canvas.attach(NodeKind::Circle);
        let b = canvas.attach(NodeKind::Label {
            font_size: 12.0,
            align: LabelAlign::Center,
        });
        let c = canvas.attach(NodeKind::Circle);
        canvas.detach(b);

        let order: Vec<NodeId> = canvas.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, c]);
        assert_eq!(canvas.attached_total(), 3);
        assert_eq!(canvas.detached_total(), 1);
    }

    #[test]
    fn test_setters_on_detached_node_are_ignored() {
        let mut canvas = SceneCanvas::default();
        let a = canvas.attach(NodeKind::Circle);
        canvas.detach(a);
        canvas.detach(a);

        canvas.set_position(a, Vec2::new(1.0, 2.0));
        canvas.set_text(a, "gone");
        assert!(!canvas.contains(a));
        assert_eq!(canvas.detached_total(), 1);
    }

    #[test]
    fn test_setters_update_node() {
        let mut canvas = SceneCanvas::new(100.0, 50.0);
        let a = canvas.attach(NodeKind::Circle);
        canvas.set_position(a, Vec2::new(3.0, 4.0));
        canvas.set_fill(a, Color::RED);
        canvas.set_stroke(a, Color::BLUE);
        canvas.set_circle_radius(a, 9.0);

        let node = canvas.get(a).unwrap();
        assert_eq!(node.position, Vec2::new(3.0, 4.0));
        assert_eq!(node.fill, Color::RED);
        assert_eq!(node.stroke, Color::BLUE);
        assert_eq!(node.radius, 9.0);
        assert_eq!(canvas.surface_size(), Vec2::new(100.0, 50.0));
    }
}
