//! 托盘图标绘制
//!
//! 用内置的 3×5 点阵数字字体把周数画到正方形 RGBA 画布上，
//! 按能放下的最大整数倍放大并居中。不依赖系统字体，因此不会失败：
//! 不认识的字符只占位不绘制，空字符串得到纯背景图标。

use image::{Rgba, RgbaImage};

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;
/// 字符间距（点阵单位）
const GLYPH_SPACING: u32 = 1;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// 图标配色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPalette {
    pub text: Rgba<u8>,
    pub background: Rgba<u8>,
}

impl IconPalette {
    /// 深色模式下加白底，浅色模式透明底；文字始终为黑色
    pub fn for_theme(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                text: BLACK,
                background: WHITE,
            }
        } else {
            Self {
                text: BLACK,
                background: TRANSPARENT,
            }
        }
    }
}

/// 数字点阵，每行低 3 位从左到右
fn glyph_rows(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        _ => return None,
    };
    Some(rows)
}

/// 绘制 `size × size` 的图标
pub fn render_glyph(text: &str, palette: IconPalette, size: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(size, size, palette.background);

    let count = text.chars().count() as u32;
    if count == 0 {
        return canvas;
    }

    let text_units = count * GLYPH_WIDTH + (count - 1) * GLYPH_SPACING;
    let scale = (size / text_units).min(size / GLYPH_HEIGHT);
    if scale == 0 {
        return canvas;
    }

    let origin_x = (size - text_units * scale) / 2;
    let origin_y = (size - GLYPH_HEIGHT * scale) / 2;

    for (index, c) in text.chars().enumerate() {
        let Some(rows) = glyph_rows(c) else {
            continue;
        };
        let glyph_x = origin_x + index as u32 * (GLYPH_WIDTH + GLYPH_SPACING) * scale;

        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0b100 >> col) == 0 {
                    continue;
                }
                let x = glyph_x + col * scale;
                let y = origin_y + row as u32 * scale;
                fill_cell(&mut canvas, x, y, scale, palette.text);
            }
        }
    }

    canvas
}

fn fill_cell(canvas: &mut RgbaImage, x: u32, y: u32, scale: u32, color: Rgba<u8>) {
    for dy in 0..scale {
        for dx in 0..scale {
            canvas.put_pixel(x + dx, y + dy, color);
        }
    }
}
