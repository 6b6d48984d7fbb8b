use image::{Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point as PixelPoint;
use tracing::debug;

use crate::grid::{Lattice, Point};

impl Lattice {
    /// Fills every triangle with its color. Corners are rounded to whole pixels
    /// and anything outside `target` is clipped by the fill itself.
    ///
    /// The polygon fill also traces each edge in the fill color, so neighbours
    /// overlap by a pixel along shared edges instead of leaving a seam.
    pub fn draw(&self, target: &mut RgbImage) {
        for triangle in &self.triangles {
            let corners = self.corners(triangle).map(to_pixel);
            fill_triangle(target, corners, triangle.color.to_rgb());
        }
        debug!(
            triangles = self.triangles.len(),
            width = target.width(),
            height = target.height(),
            "rasterized lattice"
        );
    }

    /// Draws onto a fresh black canvas of the lattice's size.
    pub fn render(&self) -> RgbImage {
        let (width, height) = self.canvas;
        let mut image = RgbImage::new(width, height);
        self.draw(&mut image);
        image
    }
}

fn to_pixel(point: Point) -> PixelPoint<i32> {
    PixelPoint::new(point.x.round() as i32, point.y.round() as i32)
}

fn fill_triangle(target: &mut RgbImage, corners: [PixelPoint<i32>; 3], color: Rgb<u8>) {
    // draw_polygon_mut panics when the first and last points coincide.
    for shift in 0..3 {
        let points = [
            corners[shift],
            corners[(shift + 1) % 3],
            corners[(shift + 2) % 3],
        ];
        if points[0] != points[2] {
            draw_polygon_mut(target, &points, color);
            return;
        }
    }

    let PixelPoint { x, y } = corners[0];
    if x >= 0 && y >= 0 && (x as u32) < target.width() && (y as u32) < target.height() {
        target.put_pixel(x as u32, y as u32, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::grid::{CellSize, GridDims};
    use crate::triangulate::DiagonalRule;

    fn sentinel() -> Rgb<u8> {
        Rgb([1, 2, 3])
    }

    #[test]
    fn fills_whole_canvas_with_single_color() {
        let mut lattice =
            Lattice::build((37, 23), GridDims::new(4, 3), CellSize::new(10.0, 10.0)).unwrap();
        lattice.triangulate(DiagonalRule::Alternating);
        let gold = Color::new(250, 200, 20);
        lattice.gradient_colors(0.3, gold, gold).unwrap();

        let mut image = RgbImage::from_pixel(37, 23, sentinel());
        lattice.draw(&mut image);
        assert!(image.pixels().all(|pixel| *pixel == gold.to_rgb()));
    }

    #[test]
    fn render_matches_canvas_size() {
        let mut lattice =
            Lattice::build((130, 90), GridDims::new(2, 1), CellSize::new(120.0, 100.0)).unwrap();
        lattice.triangulate(DiagonalRule::Fixed);
        let image = lattice.render();
        assert_eq!(image.dimensions(), (130, 90));
    }

    #[test]
    fn collapsed_triangles_do_not_panic() {
        let mut image = RgbImage::from_pixel(4, 4, sentinel());
        let red = Rgb([255, 0, 0]);
        let p = PixelPoint::new(1, 1);
        let q = PixelPoint::new(3, 1);
        fill_triangle(&mut image, [p, q, p], red);
        fill_triangle(&mut image, [p, p, p], red);
        fill_triangle(&mut image, [PixelPoint::new(-5, -5); 3], red);
        assert_eq!(*image.get_pixel(1, 1), red);
        assert_eq!(*image.get_pixel(3, 1), red);
        assert_eq!(*image.get_pixel(0, 0), sentinel());
    }
}
