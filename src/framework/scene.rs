use slotmap::{new_key_type, SlotMap};

use super::{camera::PerspectiveCamera, math::Transform};

new_key_type! { pub struct NodeId; }

#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Camera(PerspectiveCamera),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name:      String,
    pub transform: Transform,
    pub kind:      NodeKind,
    parent:        Option<NodeId>,
    children:      Vec<NodeId>,
}

impl Node {
    pub fn group(name: &str) -> Self {
        Self::new(name, NodeKind::Group, Transform::IDENTITY)
    }

    pub fn camera(name: &str, camera: PerspectiveCamera, transform: Transform) -> Self {
        Self::new(name, NodeKind::Camera(camera), transform)
    }

    fn new(name: &str, kind: NodeKind, transform: Transform) -> Self {
        Self {
            name: name.to_owned(),
            transform,
            kind,
            parent: None,
            children: vec![],
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Scene graph owning every object submitted for rendering, rooted in a single group node.
#[derive(Debug)]
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    root:  NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group("root"));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Adds node as a child of the root.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.attach(self.root, node)
    }

    /// Adds node as a child of `parent`, `None` when parent is not part of this scene.
    pub fn add_to(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        Some(self.attach(parent, node))
    }

    fn attach(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn camera(&self, id: NodeId) -> Option<&PerspectiveCamera> {
        match self.nodes.get(id).map(|node| &node.kind) {
            Some(NodeKind::Camera(camera)) => Some(camera),
            _ => None,
        }
    }

    pub fn camera_mut(&mut self, id: NodeId) -> Option<&mut PerspectiveCamera> {
        match self.nodes.get_mut(id).map(|node| &mut node.kind) {
            Some(NodeKind::Camera(camera)) => Some(camera),
            _ => None,
        }
    }

    /// Model matrix of the node composed through all of its ancestors.
    pub fn world_matrix(&self, id: NodeId) -> Option<glam::Mat4> {
        let mut node = self.nodes.get(id)?;
        let mut matrix = node.transform.as_mat();
        while let Some(parent) = node.parent.and_then(|p| self.nodes.get(p)) {
            matrix = parent.transform.as_mat() * matrix;
            node = parent;
        }
        Some(matrix)
    }
}
