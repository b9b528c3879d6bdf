// File: crates/dash-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings).

/// Default chart width in pixels.
pub const WIDTH: u32 = 900;
/// Default chart height in pixels.
pub const HEIGHT: u32 = 500;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        // Room for the title above and the legend on the right.
        Self::new(72, 160, 48, 56)
    }
}
