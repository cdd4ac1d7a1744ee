/// Picks the side length of a still image from the iteration depth: deeper
/// renders show finer filaments, so they get more pixels.
///
/// `side = max(floor, base + iteration_depth · per_iteration)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPolicy {
    pub base: u32,
    pub floor: u32,
    pub per_iteration: u32,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            base: 2048,
            floor: 4096,
            per_iteration: 100,
        }
    }
}

impl ResolutionPolicy {
    #[must_use]
    pub fn target_side(&self, iteration_depth: u32) -> u32 {
        let scaled = self
            .base
            .saturating_add(iteration_depth.saturating_mul(self.per_iteration));

        scaled.max(self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shallow_depth_uses_floor() {
        assert_eq!(ResolutionPolicy::default().target_side(20), 4096);
    }

    #[test]
    fn test_floor_boundary() {
        // 2048 + 20 · 100 = 4048 < 4096, 2048 + 21 · 100 = 4148
        assert_eq!(ResolutionPolicy::default().target_side(21), 4148);
    }

    #[test]
    fn test_deep_render_grows_with_depth() {
        assert_eq!(ResolutionPolicy::default().target_side(143), 16348);
    }

    #[test]
    fn test_huge_depth_saturates() {
        assert_eq!(ResolutionPolicy::default().target_side(u32::MAX), u32::MAX);
    }
}
