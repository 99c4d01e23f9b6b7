use std::io::Cursor;

use font8x8::{BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS, MISC_FONTS, UnicodeFonts};
use image::{ImageFormat, Rgb, RgbImage};
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier};
use unicode_width::UnicodeWidthStr;

use crate::error::{Error, Result};
use crate::export::{RegionRenderer, RenderOptions};

/// Base pixel size of one terminal cell before `quality_scale` is applied.
/// Glyph rows of the 8x8 font are doubled vertically.
pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 16;

const MAX_DIMENSION: u32 = 16_384;

/// Rasterizes cells with the `font8x8` bitmap tables. Characters the tables
/// do not cover (emoji, Cyrillic) become a filled diamond across their
/// display width, so every cell still reads as "something is here".
#[derive(Clone, Copy, Debug, Default)]
pub struct PngRasterizer;

impl PngRasterizer {
    pub fn rasterize(&self, region: &Buffer, options: &RenderOptions) -> Result<RgbImage> {
        let area = region.area;
        if area.width == 0 || area.height == 0 {
            return Err(Error::ExportFailure("cannot rasterize an empty region".to_string()));
        }
        let scale = options.quality_scale.max(1);
        let pixels = |cells: u16, cell: u32| {
            u32::from(cells)
                .checked_mul(cell)
                .and_then(|n| n.checked_mul(scale))
                .filter(|&n| n <= MAX_DIMENSION)
        };
        let (Some(width), Some(height)) = (pixels(area.width, CELL_WIDTH), pixels(area.height, CELL_HEIGHT))
        else {
            return Err(Error::ExportFailure(format!(
                "{}x{} cells at scale {scale} exceed {MAX_DIMENSION} pixels",
                area.width, area.height
            )));
        };

        let mut img = RgbImage::new(width, height);
        let mut canvas = Canvas { img: &mut img, scale };

        for row in 0..area.height {
            for col in 0..area.width {
                let cell = &region[(area.x + col, area.y + row)];
                canvas.fill(
                    u32::from(col) * CELL_WIDTH,
                    u32::from(row) * CELL_HEIGHT,
                    CELL_WIDTH,
                    CELL_HEIGHT,
                    to_rgb(cell.bg, Rgb([0, 0, 0])),
                );
            }
        }

        // Glyphs go in a second pass so wide characters are not painted over
        // by the background of the cell that follows them.
        for row in 0..area.height {
            for col in 0..area.width {
                let cell = &region[(area.x + col, area.y + row)];
                let symbol = cell.symbol();
                if symbol.trim().is_empty() {
                    continue;
                }
                let remaining = area.width - col;
                let span = (symbol.width().max(1) as u16).min(remaining);
                let fg = to_rgb(cell.fg, Rgb([255, 255, 255]));
                let x0 = u32::from(col) * CELL_WIDTH;
                let y0 = u32::from(row) * CELL_HEIGHT;
                match symbol.chars().next().and_then(glyph) {
                    Some(bits) => {
                        canvas.glyph(x0, y0, &bits, fg);
                        if cell.modifier.contains(Modifier::BOLD) {
                            canvas.glyph(x0 + 1, y0, &bits, fg);
                        }
                    }
                    None => canvas.diamond(x0, y0, u32::from(span) * CELL_WIDTH, CELL_HEIGHT, fg),
                }
            }
        }

        Ok(img)
    }
}

impl RegionRenderer for PngRasterizer {
    fn render_region(&self, region: &Buffer, options: &RenderOptions) -> Result<Vec<u8>> {
        let img = self.rasterize(region, options)?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Pixel writer in unscaled coordinates.
struct Canvas<'a> {
    img: &'a mut RgbImage,
    scale: u32,
}

impl Canvas<'_> {
    fn fill(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
        let (s, max_x, max_y) = (self.scale, self.img.width(), self.img.height());
        for py in (y * s)..((y + h) * s).min(max_y) {
            for px in (x * s)..((x + w) * s).min(max_x) {
                self.img.put_pixel(px, py, color);
            }
        }
    }

    fn glyph(&mut self, x: u32, y: u32, bits: &[u8; 8], color: Rgb<u8>) {
        for (r, row) in bits.iter().enumerate() {
            for b in 0..8u32 {
                if row & (1 << b) != 0 {
                    self.fill(x + b, y + r as u32 * 2, 1, 2, color);
                }
            }
        }
    }

    fn diamond(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
        let half_w = w as f32 / 2.0 - 1.0;
        let half_h = h as f32 / 2.0 - 3.0;
        if half_w <= 0.0 || half_h <= 0.0 {
            return;
        }
        let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
        for dy in 0..h {
            for dx in 0..w {
                let nx = ((dx as f32 + 0.5) - cx).abs() / half_w;
                let ny = ((dy as f32 + 0.5) - cy).abs() / half_h;
                if nx + ny <= 1.0 {
                    self.fill(x + dx, y + dy, 1, 1, color);
                }
            }
        }
    }
}

fn glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| BLOCK_FONTS.get(ch))
        .or_else(|| MISC_FONTS.get(ch))
}

fn to_rgb(color: Color, reset: Rgb<u8>) -> Rgb<u8> {
    match color {
        Color::Reset => reset,
        Color::Rgb(r, g, b) => Rgb([r, g, b]),
        Color::Indexed(i) => indexed_rgb(i),
        Color::Black => Rgb([0, 0, 0]),
        Color::Red => Rgb([205, 0, 0]),
        Color::Green => Rgb([0, 205, 0]),
        Color::Yellow => Rgb([205, 205, 0]),
        Color::Blue => Rgb([0, 0, 238]),
        Color::Magenta => Rgb([205, 0, 205]),
        Color::Cyan => Rgb([0, 205, 205]),
        Color::Gray => Rgb([229, 229, 229]),
        Color::DarkGray => Rgb([127, 127, 127]),
        Color::LightRed => Rgb([255, 0, 0]),
        Color::LightGreen => Rgb([0, 255, 0]),
        Color::LightYellow => Rgb([255, 255, 0]),
        Color::LightBlue => Rgb([92, 92, 255]),
        Color::LightMagenta => Rgb([255, 0, 255]),
        Color::LightCyan => Rgb([0, 255, 255]),
        Color::White => Rgb([255, 255, 255]),
    }
}

/// xterm 256-color palette.
fn indexed_rgb(i: u8) -> Rgb<u8> {
    const BASE: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::DarkGray,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::White,
    ];
    match i {
        0..=15 => to_rgb(BASE[i as usize], Rgb([0, 0, 0])),
        16..=231 => {
            let n = i - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            Rgb([level(n / 36), level((n / 6) % 6), level(n % 6)])
        }
        232..=255 => {
            let v = 8 + (i - 232) * 10;
            Rgb([v, v, v])
        }
    }
}
