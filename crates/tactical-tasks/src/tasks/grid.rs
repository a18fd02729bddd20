use tactical_core::Vec3;

/// Ranked grid formation: rows fill back from the anchor, columns alternate
/// right then left of the row center.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    pub agents_per_row: usize,
    /// Spacing between columns within a row.
    pub lateral_separation: f32,
    /// Spacing between rows.
    pub depth_separation: f32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            agents_per_row: 2,
            lateral_separation: 2.0,
            depth_separation: 2.0,
        }
    }
}

impl GridSpec {
    /// Local-frame offset of the slot at roster `index`.
    pub fn offset(&self, index: usize) -> Vec3 {
        let per_row = self.agents_per_row.max(1);
        let row = (index / per_row) as f32;
        let column = index % per_row;
        let z = -self.depth_separation * row;
        if column == 0 {
            return Vec3::new(0.0, 0.0, z);
        }
        let side = if column % 2 == 0 { -1.0 } else { 1.0 };
        let rank = ((column - 1) / 2 + 1) as f32;
        Vec3::new(self.lateral_separation * side * rank, 0.0, z)
    }
}
