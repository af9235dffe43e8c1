use embedded_graphics::geometry::Size;

/// The pixel dimensions of a panel.
///
/// The controller addresses RAM in pages of 8 rows, so the number of pages is `height / 8`. A
/// height that is not a multiple of 8 is truncated: rows of the last partial page are never
/// transmitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of complete 8-row pages.
    pub const fn pages(&self) -> u32 {
        self.height / 8
    }

    /// Number of pixel rows that fall outside the last complete page.
    pub const fn truncated_rows(&self) -> u32 {
        self.height % 8
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl From<Size> for Geometry {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}
