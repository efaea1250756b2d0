#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Rectangle {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rectangle {
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_parts((x, y, width, height): (i16, i16, u16, u16)) -> Self {
        Self::new(x, y, width, height)
    }

    pub fn into_parts(self) -> (i16, i16, u16, u16) {
        (self.x, self.y, self.width, self.height)
    }

    /// Returns y-coordinate of the bottom edge.
    pub fn bottom_edge(&self) -> i16 {
        let height = i16::try_from(self.height).unwrap_or(i16::MAX);
        self.y.saturating_add(height)
    }
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

impl From<(i16, i16, u16, u16)> for Rectangle {
    fn from(val: (i16, i16, u16, u16)) -> Self {
        Rectangle::from_parts(val)
    }
}

impl From<Rectangle> for (i16, i16, u16, u16) {
    fn from(val: Rectangle) -> Self {
        val.into_parts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_edge() {
        assert_eq!(Rectangle::new(10, 20, 100, 24).bottom_edge(), 44);
        assert_eq!(Rectangle::new(0, 100, 40000, 1).bottom_edge(), i16::MAX);
        assert_eq!(Rectangle::new(0, -100, 40000, 1).bottom_edge(), i16::MAX - 100);
    }

    #[test]
    fn tuple_conversion() {
        let rect = Rectangle::from((5, -3, 40, 2));
        assert_eq!(rect, Rectangle::new(5, -3, 40, 2));
        assert_eq!(<(i16, i16, u16, u16)>::from(rect), (5, -3, 40, 2));
    }

    #[test]
    fn display_uses_geometry_notation() {
        assert_eq!(Rectangle::new(0, 1056, 1920, 24).to_string(), "1920x24+0+1056");
    }
}
