//! Large-digit rendering for the countdown readout.
//!
//! The readout is drawn from a five-row block-glyph font, scaled by an
//! integer factor so it can fill the height the layout assigns to it.

/// Rows in the base glyph font.
pub const GLYPH_ROWS: u16 = 5;

/// Derives the integer scale factor that fits the given row budget.
#[must_use]
pub fn scale_for_height(rows: u16) -> u16 {
    (rows / GLYPH_ROWS).max(1)
}

/// Renders `text` as block glyphs at the given scale.
///
/// Each glyph row is repeated `scale` times vertically and each cell
/// `scale` times horizontally; the result is `GLYPH_ROWS * scale` lines of
/// equal width.
#[must_use]
pub fn render(text: &str, scale: u16) -> Vec<String> {
    let scale = scale.max(1) as usize;
    let glyphs: Vec<[&'static str; 5]> = text.chars().map(glyph).collect();

    let mut lines = Vec::with_capacity(GLYPH_ROWS as usize * scale);
    for row in 0..GLYPH_ROWS as usize {
        let mut line = String::new();
        for (index, glyph) in glyphs.iter().enumerate() {
            if index > 0 {
                line.push_str(&" ".repeat(scale));
            }
            for cell in glyph[row].chars() {
                for _ in 0..scale {
                    line.push(cell);
                }
            }
        }
        for _ in 0..scale {
            lines.push(line.clone());
        }
    }
    lines
}

/// Base glyph for one readout character.
fn glyph(ch: char) -> [&'static str; 5] {
    match ch {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => [" █ ", "██ ", " █ ", " █ ", "███"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        _ => ["   ", "   ", "   ", "   ", "   "],
    }
}
