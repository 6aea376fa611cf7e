//! Visual component: opaque pass-through for the rendering collaborator
//!
//! The simulation stores and forwards these values without interpreting
//! them, except for `size`, which doubles as the bounding-sphere radius for
//! the visibility gate.

/// Opaque rendering/collision data attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct VisualComponent {
    /// Model/shader identifier, consumed by the renderer
    pub mesh: String,
    /// Color value, consumed by the renderer
    pub color: String,
    /// Visual size; also the bounding-sphere radius for culling
    pub size: f32,
    /// Collision-layer identifier, consumed by the collision collaborator
    pub layer: u32,
}

impl Default for VisualComponent {
    fn default() -> Self {
        Self {
            mesh: String::new(),
            color: String::new(),
            size: 1.0,
            layer: 0,
        }
    }
}

impl VisualComponent {
    /// Create with a mesh identifier and size
    pub fn new(mesh: impl Into<String>, size: f32) -> Self {
        Self {
            mesh: mesh.into(),
            size,
            ..Default::default()
        }
    }

    /// Builder pattern: set the color value
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Builder pattern: set the collision layer
    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    /// Restore default values (pool reuse)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
