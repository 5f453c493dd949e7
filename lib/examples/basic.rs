/// Basic example: Convert a simple test image to an ASCII glyph grid
///
/// This creates a test image with a bright circle on a gray background and
/// prints the matched glyphs to the terminal
use ascii_mosaic::{Caches, CharMatcher, render_mosaic};
use image::{Rgba, RgbaImage};

fn main() {
    println!("ASCII Mosaic - Basic Example");
    println!("============================\n");

    // Create a simple 64x64 test image
    let width = 64;
    let height = 64;
    let mut img = RgbaImage::new(width, height);

    // Fill with dark gray background
    for y in 0..height {
        for x in 0..width {
            img.put_pixel(x, y, Rgba([40, 40, 40, 255]));
        }
    }

    // Draw a white circle in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 20.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
    }

    println!("Created test image: {}x{}", width, height);

    // A classic density ramp, darkest to brightest
    let mut caches = Caches::new();
    let matcher = CharMatcher::new(&[' ', '.', ':', '=', '+', '#', '@'], &mut caches);

    // Convert at 32 glyphs per row
    let grid = render_mosaic(&img, 32, &matcher).expect("charset is not empty");

    for row in &grid {
        println!("{}", row.iter().collect::<String>());
    }

    println!("\nASCII conversion complete!");
}
