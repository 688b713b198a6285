//! Icon rendering pipeline.
//!
//! The icon is a rounded square filled with a diagonal blue gradient,
//! with a stylized three-building skyline and window cutouts on top.
//! Rendering is a pure function of the edge length; the same size always
//! produces a byte-identical buffer.

use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, GrayImage, ImageBuffer, ImageEncoder, Luma, Rgba, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Gradient start color at the top-left corner (#1E3A8A, primary).
pub const COLOR1: [u8; 3] = [30, 58, 138];
/// Gradient end color at the bottom-right corner (#3B82F6, primary variant).
pub const COLOR2: [u8; 3] = [59, 130, 246];
/// Building fill.
pub const BUILDING: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Window fill, the same dark blue the gradient starts from.
pub const WINDOW: Rgba<u8> = Rgba([COLOR1[0], COLOR1[1], COLOR1[2], 255]);

/// Standard Android launcher densities and their icon edge lengths.
const ANDROID_DENSITIES: [(&str, u32); 5] = [
    ("mdpi", 48),
    ("hdpi", 72),
    ("xhdpi", 96),
    ("xxhdpi", 144),
    ("xxxhdpi", 192),
];

#[derive(Debug)]
pub struct Options {
    pub output: PathBuf,
    pub size: u32,
    pub png: Option<Vec<u32>>,
    pub android: bool,
}

/// Render the master icon and every requested extra output.
pub fn generate(opts: &Options) -> Result<()> {
    let out_dir = match opts.output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    create_dir_all(&out_dir).context("Can't create output directory")?;

    println!("Generating app icon...");
    let icon = render(opts.size)?;
    save_png(&icon, &opts.output)?;
    println!("✓ Generated {}", opts.output.display());
    println!("  Size: {0}x{0} pixels", opts.size);

    if let Some(sizes) = &opts.png {
        generate_custom_sizes(sizes, &out_dir)?;
    }

    if opts.android {
        generate_android_icons(&out_dir)?;
    }

    Ok(())
}

/// Render the complete icon at the given edge length.
///
/// The gradient is clipped by a rounded-rectangle mask (corner radius 20%
/// of the size) before the skyline is drawn, so the four corners of the
/// returned image are fully transparent.
pub fn render(size: u32) -> Result<RgbaImage> {
    if size == 0 {
        anyhow::bail!("Icon size must be positive");
    }

    let gradient = diagonal_gradient(size);
    let radius = (size as f32 * 0.2) as u32;
    let mask = rounded_mask(size, radius);
    let mut icon = apply_mask(&gradient, &mask);
    draw_skyline(&mut icon);

    Ok(icon)
}

/// Fill a fully opaque canvas with the diagonal brand gradient.
///
/// The blend factor of a pixel is the mean of its normalized x and y
/// coordinates, so the gradient runs from [`COLOR1`] at the top-left
/// corner toward [`COLOR2`] at the bottom-right one.
pub fn diagonal_gradient(size: u32) -> RgbaImage {
    ImageBuffer::from_fn(size, size, |x, y| {
        let ratio = (x as f32 / size as f32 + y as f32 / size as f32) / 2.0;
        let channel = |a: u8, b: u8| (a as f32 * (1.0 - ratio) + b as f32 * ratio) as u8;

        Rgba([
            channel(COLOR1[0], COLOR2[0]),
            channel(COLOR1[1], COLOR2[1]),
            channel(COLOR1[2], COLOR2[2]),
            255,
        ])
    })
}

/// Opacity mask for a rounded rectangle covering the whole canvas: 255
/// everywhere except the four corner regions outside the corner arcs.
pub fn rounded_mask(size: u32, radius: u32) -> GrayImage {
    let (s, r) = (size as i64, radius as i64);

    ImageBuffer::from_fn(size, size, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let inside = if (x >= r && x <= s - r) || (y >= r && y <= s - r) {
            true
        } else {
            // Corner region: check against the nearest arc center.
            let cx = if x < r { r } else { s - r };
            let cy = if y < r { r } else { s - r };
            let (dx, dy) = (x - cx, y - cy);
            dx * dx + dy * dy <= r * r
        };

        Luma([if inside { 255 } else { 0 }])
    })
}

/// Paste `src` onto a transparent canvas through `mask`.
pub fn apply_mask(src: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    ImageBuffer::from_fn(src.width(), src.height(), |x, y| {
        if mask.get_pixel(x, y)[0] > 0 {
            *src.get_pixel(x, y)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Draw the three-building skyline with its window grids.
///
/// All proportions derive from an icon area of 40% of the canvas:
/// buildings are a third of that wide and half of it tall, the center
/// building is 20% taller, and windows are laid out on a grid of one
/// third of the building width starting one unit from the top-left
/// interior corner. Every intermediate value truncates toward zero.
fn draw_skyline(img: &mut RgbaImage) {
    let size = img.width() as i64;
    let icon_size = (size as f32 * 0.4) as i64;
    let icon_x = size / 2;
    let icon_y = size / 2;

    let building_width = icon_size / 3;
    let building_height = icon_size / 2;
    let center_height = (building_height as f32 * 1.2) as i64;

    let left_x = icon_x - building_width - building_width / 3;
    let right_x = icon_x + building_width + building_width / 3;

    let window_size = building_width / 4;
    let window_spacing = building_width / 3;

    for (center_x, height, window_rows) in [
        (left_x, building_height, 2),
        (icon_x, center_height, 3),
        (right_x, building_height, 2),
    ] {
        fill_rect(
            img,
            center_x - building_width / 2,
            icon_y - height / 2,
            center_x + building_width / 2,
            icon_y + height / 2,
            BUILDING,
        );

        for i in 0..window_rows {
            for j in 0..2 {
                let wx = center_x - building_width / 2 + window_spacing + j * window_spacing;
                let wy = icon_y - height / 2 + window_spacing + i * window_spacing;

                fill_rect(
                    img,
                    wx - window_size / 2,
                    wy - window_size / 2,
                    wx + window_size / 2,
                    wy + window_size / 2,
                    WINDOW,
                );
            }
        }
    }
}

/// Fill the rectangle spanning (x0, y0) to (x1, y1), both corners
/// inclusive, clamped to the canvas.
fn fill_rect(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let max_x = img.width() as i64 - 1;
    let max_y = img.height() as i64 - 1;

    for y in y0.max(0)..=y1.min(max_y) {
        for x in x0.max(0)..=x1.min(max_x) {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Write `img` to `path` as a best-compression PNG.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_png(img.as_raw(), &mut out, img.width())?;
    out.flush()?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}

/// Render extra square PNGs next to the master icon.
fn generate_custom_sizes(sizes: &[u32], out_dir: &Path) -> Result<()> {
    println!("Generating custom PNG sizes...");
    for &size in sizes {
        let icon = render(size)?;
        let output_path = out_dir.join(format!("{size}x{size}.png"));
        save_png(&icon, &output_path)?;
        println!("  ✓ Generated {size}x{size}.png");
    }
    Ok(())
}

/// Render the launcher icon at each standard Android density.
fn generate_android_icons(out_dir: &Path) -> Result<()> {
    let android_dir = out_dir.join("android");

    println!("Generating Android icons...");
    for (density, size) in ANDROID_DENSITIES {
        let mipmap_dir = android_dir.join(format!("mipmap-{density}"));
        create_dir_all(&mipmap_dir)?;

        let icon = render(size)?;
        save_png(&icon, &mipmap_dir.join("ic_launcher.png"))?;
        println!("  ✓ Generated android/mipmap-{density}/ic_launcher.png");
    }
    Ok(())
}
