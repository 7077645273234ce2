//! Dock geometry and the split of the CPU area between units.

/// Width and height of the dock surface.
pub const DOCK_SIZE: u32 = 64;

/// Rows shared by the CPU bars and the history graph.
pub const CPU_AREA_Y: u32 = 6;
pub const CPU_AREA_HEIGHT: u32 = 40;

pub const CPU_BAR_X: u32 = 56;
pub const CPU_BAR_WIDTH: u32 = 3;

/// Graph region, without the column where new samples are drawn.
pub const GRAPH_X: u32 = 6;
pub const GRAPH_WIDTH: u32 = 49;
pub const GRAPH_HEIGHT: u32 = 39;
/// Column where each new history sample lands.
pub const GRAPH_NEW_COLUMN_X: u32 = GRAPH_X + GRAPH_WIDTH;

pub const GAUGE_Y: u32 = 50;
pub const GAUGE_LENGTH: u32 = 23;
pub const GAUGE_HEIGHT: u32 = 8;
pub const MEMORY_GAUGE_X: u32 = 6;
pub const SWAP_GAUGE_X: u32 = 35;

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn dock() -> Self {
        Self::new(0, 0, DOCK_SIZE, DOCK_SIZE)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smallest region covering both.
    pub fn union(&self, other: &Region) -> Region {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Region::new(x, y, right - x, bottom - y)
    }
}

/// Split `total` into `count` lengths that add up to exactly `total`. The
/// first `total % count` entries get the leftover pixels.
pub fn partition(total: u32, count: usize) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }
    let count_u32 = count as u32;
    let base = total / count_u32;
    let remainder = (total % count_u32) as usize;
    (0..count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Vertical slice of the CPU area owned by one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitStrip {
    pub y: u32,
    /// Drawable length; the row after it is a separator.
    pub length: u32,
}

pub fn unit_strips(count: usize) -> Vec<UnitStrip> {
    let mut y = CPU_AREA_Y;
    partition(CPU_AREA_HEIGHT, count)
        .into_iter()
        .map(|segment| {
            let strip = UnitStrip {
                y,
                length: segment.saturating_sub(1),
            };
            y += segment;
            strip
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_sums_to_total() {
        for total in [39, 40, 41] {
            for count in 1..=4usize {
                let parts = partition(total, count);
                assert_eq!(parts.len(), count);
                assert_eq!(parts.iter().sum::<u32>(), total);

                let base = total / count as u32;
                let remainder = (total % count as u32) as usize;
                let larger = parts.iter().filter(|&&p| p == base + 1).count();
                let equal = parts.iter().filter(|&&p| p == base).count();
                assert_eq!(larger, remainder, "total={} count={}", total, count);
                assert_eq!(equal, count - remainder, "total={} count={}", total, count);
            }
        }
    }

    #[test]
    fn test_partition_remainder_goes_first() {
        assert_eq!(partition(40, 3), vec![14, 13, 13]);
        assert_eq!(partition(41, 3), vec![14, 14, 13]);
        assert_eq!(partition(39, 4), vec![10, 10, 10, 9]);
        assert_eq!(partition(40, 4), vec![10, 10, 10, 10]);
    }

    #[test]
    fn test_partition_is_deterministic() {
        assert_eq!(partition(41, 3), partition(41, 3));
        assert!(partition(40, 0).is_empty());
    }

    #[test]
    fn test_unit_strips_match_dockapp_layout() {
        assert_eq!(unit_strips(1), vec![UnitStrip { y: 6, length: 39 }]);
        assert_eq!(
            unit_strips(2),
            vec![UnitStrip { y: 6, length: 19 }, UnitStrip { y: 26, length: 19 }]
        );
        assert_eq!(
            unit_strips(3),
            vec![
                UnitStrip { y: 6, length: 13 },
                UnitStrip { y: 20, length: 12 },
                UnitStrip { y: 33, length: 12 },
            ]
        );
        let four = unit_strips(4);
        assert_eq!(four.iter().map(|s| s.y).collect::<Vec<_>>(), vec![6, 16, 26, 36]);
        assert!(four.iter().all(|s| s.length == 9));
    }

    #[test]
    fn test_region_union() {
        let a = Region::new(6, 50, 23, 8);
        let b = Region::new(56, 6, 3, 39);
        assert_eq!(a.union(&b), Region::new(6, 6, 53, 52));
        assert_eq!(Region::new(0, 0, 0, 0).union(&a), a);
    }
}
