//! Layout system - rectangles and flex-based positioning

/// Rectangle bounds in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering the entire screen
    pub fn fullscreen(cols: u16, rows: u16) -> Self {
        Rect::new(0, 0, cols, rows)
    }

    /// Right edge x-coordinate (exclusive)
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge y-coordinate (exclusive)
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if point is inside rectangle
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink horizontally by `padding` on both sides
    pub fn inset_x(&self, padding: u16) -> Self {
        Rect {
            x: self.x.saturating_add(padding),
            width: self.width.saturating_sub(padding.saturating_mul(2)),
            ..*self
        }
    }

    /// Single row at `offset` from the top, empty if outside
    pub fn row(&self, offset: u16) -> Self {
        if offset >= self.height {
            return Rect::new(self.x, self.bottom(), self.width, 0);
        }
        Rect::new(self.x, self.y + offset, self.width, 1)
    }

    /// Split horizontally into top and bottom
    pub fn split_horizontal(&self, top_height: u16) -> (Rect, Rect) {
        let top_height = top_height.min(self.height);
        let top = Rect {
            height: top_height,
            ..*self
        };
        let bottom = Rect {
            y: self.y.saturating_add(top_height),
            height: self.height - top_height,
            ..*self
        };
        (top, bottom)
    }
}

/// Flex direction for container layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

/// Size constraint for flex children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    /// Fixed size in cells
    Fixed(u16),
    /// Share of the remaining space (flex grow factor)
    Flex(u16),
}

/// Flex layout calculator
#[derive(Debug, Clone)]
pub struct FlexLayout {
    direction: FlexDirection,
    gap: u16,
}

impl FlexLayout {
    pub fn new(direction: FlexDirection) -> Self {
        FlexLayout { direction, gap: 0 }
    }

    /// Set gap between children
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Child rectangles for `sizes` within `container`
    pub fn layout(&self, container: Rect, sizes: &[Size]) -> Vec<Rect> {
        let main = match self.direction {
            FlexDirection::Row => container.width,
            FlexDirection::Column => container.height,
        };

        let gaps = self
            .gap
            .saturating_mul(sizes.len().saturating_sub(1) as u16);
        let (fixed, units) = sizes.iter().fold((0u16, 0u16), |(fixed, units), size| match size {
            Size::Fixed(s) => (fixed.saturating_add(*s), units),
            Size::Flex(f) => (fixed, units.saturating_add(*f)),
        });
        let unit = match units {
            0 => 0,
            units => main.saturating_sub(gaps).saturating_sub(fixed) / units,
        };

        let mut offset = 0u16;
        sizes
            .iter()
            .map(|size| {
                let length = match size {
                    Size::Fixed(s) => *s,
                    Size::Flex(f) => unit.saturating_mul(*f),
                };
                // Children past the container edge collapse to zero length
                let length = length.min(main.saturating_sub(offset));
                let rect = match self.direction {
                    FlexDirection::Row => Rect::new(
                        container.x.saturating_add(offset),
                        container.y,
                        length,
                        container.height,
                    ),
                    FlexDirection::Column => Rect::new(
                        container.x,
                        container.y.saturating_add(offset),
                        container.width,
                        length,
                    ),
                };
                offset = offset.saturating_add(length).saturating_add(self.gap);
                rect
            })
            .collect()
    }
}
