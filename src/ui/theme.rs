use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(140, 115, 200);
pub const HEADER_BG: Color = Color::Rgb(25, 25, 38);
pub const STATUS_BG: Color = Color::Rgb(30, 30, 40);
pub const SELECTED_BG: Color = Color::Rgb(50, 50, 80);
pub const SEPARATOR: Color = Color::Rgb(55, 55, 75);
pub const DIM_TEXT: Color = Color::Rgb(100, 100, 120);
pub const FILTER_COLOR: Color = Color::Cyan;
pub const ERROR_FG: Color = Color::LightRed;
pub const STAR_COLOR: Color = Color::Yellow;
pub const DIR_COLOR: Color = Color::Cyan;

/// Language dot colors come from the view-model as `#rrggbb` strings (short
/// neutral forms `#888`/`#555` included).
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    if expanded.len() != 6 {
        return DIM_TEXT;
    }
    match (
        u8::from_str_radix(&expanded[0..2], 16),
        u8::from_str_radix(&expanded[2..4], 16),
        u8::from_str_radix(&expanded[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => DIM_TEXT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex_forms() {
        assert_eq!(hex_color("#dea584"), Color::Rgb(0xde, 0xa5, 0x84));
        assert_eq!(hex_color("#888"), Color::Rgb(0x88, 0x88, 0x88));
        assert_eq!(hex_color("not-a-color"), DIM_TEXT);
    }
}
