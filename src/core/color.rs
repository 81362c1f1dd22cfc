use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a hexadecimal string.
    /// Accepts formats like "#RRGGBB" or "RRGGBB".
    pub fn from_hex(hex: &str) -> Result<Self, &'static str> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err("Hex string should be 6 characters long (RRGGBB).");
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid red component in hex")?;
        let g =
            u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid green component in hex")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid blue component in hex")?;

        Ok(Self::new(r, g, b))
    }

    const fn hex_char_to_u8(c: u8) -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => 0,
        }
    }

    const fn hex_pair_to_u8(high: u8, low: u8) -> u8 {
        (Self::hex_char_to_u8(high) << 4) | Self::hex_char_to_u8(low)
    }

    /// Const-context constructor for the predefined colors below. Input must be
    /// a well formed "RRGGBB" literal.
    const fn hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        let offset = if bytes[0] == b'#' { 1 } else { 0 };

        Self {
            r: Self::hex_pair_to_u8(bytes[offset], bytes[offset + 1]),
            g: Self::hex_pair_to_u8(bytes[offset + 2], bytes[offset + 3]),
            b: Self::hex_pair_to_u8(bytes[offset + 4], bytes[offset + 5]),
        }
    }

    /// Packs into minifb's 0x00RRGGBB layout.
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Uniform pick from `palette`. Falls back to white for an empty palette.
    pub fn random_from<R: Rng + ?Sized>(palette: &[Color], rng: &mut R) -> Color {
        if palette.is_empty() {
            return Color::WHITE;
        }
        palette[rng.gen_range(0..palette.len())]
    }
}

// Predefined colors
impl Color {
    pub const BLACK: Color = Color::hex("000000");
    pub const WHITE: Color = Color::hex("FFFFFF");
    pub const RED: Color = Color::hex("FF0000");
    pub const GREEN: Color = Color::hex("00FF00");
    pub const BLUE: Color = Color::hex("0000FF");
    pub const YELLOW: Color = Color::hex("FFFF00");
    pub const MAGENTA: Color = Color::hex("FF00FF");
    pub const CYAN: Color = Color::hex("00FFFF");
}

/// The colors a loaded mesh may be drawn in.
pub const PALETTE: [Color; 6] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::MAGENTA,
    Color::CYAN,
];

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}
