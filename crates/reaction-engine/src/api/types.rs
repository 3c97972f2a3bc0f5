use bytemuck::{Pod, Zeroable};

/// Opaque reference to the molecule a user is currently holding.
/// The scene layer picks the value (typically the picked mesh's unique id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionHandle(pub u32);

/// A sound event emitted by the lab logic.
/// The numeric value maps to a lab-defined sound on the TypeScript side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A lab event communicated from Rust to the scene layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LabEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl LabEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    /// An event that carries a single value.
    pub fn with_value(kind: f32, a: f32) -> Self {
        Self { kind, a, b: 0.0, c: 0.0 }
    }
}
