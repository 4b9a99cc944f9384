use image::RgbImage;

/// Pixel coordinate in a frame, `(0, 0)` at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({x}, {y})")]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A sampled pixel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mean of the three channels, used as the pixel's brightness.
    #[must_use]
    pub fn average(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }

    /// Euclidean distance between two colors in RGB space.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self { r, g, b }
    }
}

/// One decoded capture that can be point-sampled.
pub trait Frame {
    /// Returns the color at `point`, or `None` if it lies outside the frame.
    fn pixel_at(&self, point: Point) -> Option<Rgb>;
}

impl Frame for RgbImage {
    fn pixel_at(&self, point: Point) -> Option<Rgb> {
        self.get_pixel_checked(point.x, point.y).map(|p| Rgb::from(*p))
    }
}

/// Yields frames in capture order.
///
/// Fetching a frame may block on I/O. `Ok(None)` marks the end of the stream.
pub trait FrameSource {
    type Frame: Frame;
    type Error;

    fn next_frame(&mut self) -> Result<Option<Self::Frame>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_and_distance() {
        assert!((Rgb::WHITE.average() - 255.0).abs() < f64::EPSILON);
        assert!((Rgb::new(30, 60, 90).average() - 60.0).abs() < f64::EPSILON);
        assert!(Rgb::BLACK.distance(Rgb::BLACK).abs() < f64::EPSILON);
        assert!((Rgb::new(3, 4, 0).distance(Rgb::BLACK) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_image_frame_bounds() {
        let mut image = RgbImage::new(4, 3);
        image.put_pixel(3, 2, image::Rgb([10, 20, 30]));

        assert_eq!(image.pixel_at(Point::new(3, 2)), Some(Rgb::new(10, 20, 30)));
        assert_eq!(image.pixel_at(Point::new(0, 0)), Some(Rgb::BLACK));
        assert_eq!(image.pixel_at(Point::new(4, 0)), None);
        assert_eq!(image.pixel_at(Point::new(0, 3)), None);
    }
}
