//! Resolved value types
//!
//! The value resolver turns term trees into `ParsedValue`s: a payload plus
//! a converter tag naming the downstream conversion, plus a lookup flag for
//! values that reference other properties and are resolved at apply time.

use crate::error::{CssError, CssResult};
use crate::tokenizer::{Token, TokenKind};

/// Units a size can carry. Unit-less numbers are pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnits {
    Px,
    Em,
    Ex,
    Cm,
    Mm,
    In,
    Pt,
    Pc,
    Deg,
    Grad,
    Rad,
    Turn,
    Percent,
}

/// A numeric value with a unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub value: f32,
    pub units: SizeUnits,
}

impl Size {
    pub fn new(value: f32, units: SizeUnits) -> Self {
        Self { value, units }
    }

    pub fn px(value: f32) -> Self {
        Self::new(value, SizeUnits::Px)
    }

    pub fn percent(value: f32) -> Self {
        Self::new(value, SizeUnits::Percent)
    }

    pub fn is_percent(&self) -> bool {
        self.units == SizeUnits::Percent
    }

    /// The size as a plain scalar: percentages become unit fractions,
    /// everything else is the raw value.
    pub fn as_fraction(&self) -> f32 {
        if self.is_percent() {
            self.value / 100.0
        } else {
            self.value
        }
    }

    /// Build a size from a numeric token by trimming its unit suffix.
    pub fn from_token(token: &Token) -> CssResult<Self> {
        let (units, trim) = match token.kind {
            TokenKind::Number => (SizeUnits::Px, 0),
            TokenKind::Percentage => (SizeUnits::Percent, 1),
            TokenKind::Ems => (SizeUnits::Em, 2),
            TokenKind::Exs => (SizeUnits::Ex, 2),
            TokenKind::Px => (SizeUnits::Px, 2),
            TokenKind::Cm => (SizeUnits::Cm, 2),
            TokenKind::Mm => (SizeUnits::Mm, 2),
            TokenKind::In => (SizeUnits::In, 2),
            TokenKind::Pt => (SizeUnits::Pt, 2),
            TokenKind::Pc => (SizeUnits::Pc, 2),
            TokenKind::Deg => (SizeUnits::Deg, 3),
            TokenKind::Rad => (SizeUnits::Rad, 3),
            TokenKind::Grad => (SizeUnits::Grad, 4),
            TokenKind::Turn => (SizeUnits::Turn, 4),
            _ => {
                return Err(CssError::expected("<size>", &token.text, token.location));
            }
        };
        let digits = &token.text[..token.text.len() - trim];
        let value: f32 = digits.parse().map_err(|_| {
            CssError::invalid_value(format!("Invalid number '{}'", token.text), token.location)
        })?;
        Ok(Self { value, units })
    }
}

/// Color value, channels in [0,1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    pub fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Build a color from hue/saturation/brightness. Saturation, brightness
    /// and alpha are expected in [0,1]; the hue is taken modulo 360 and is
    /// deliberately not clamped.
    pub fn from_hsb(h: f32, s: f32, b: f32, a: f32) -> Self {
        let (r, g, bl) = hsb_to_rgb(h, s.clamp(0.0, 1.0), b.clamp(0.0, 1.0));
        Self::rgba(r, g, bl, a.clamp(0.0, 1.0))
    }

    /// Parse a hex color string (without '#' or '0x' prefix)
    pub fn from_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let r = nibble(&hex[0..1])?;
                let g = nibble(&hex[1..2])?;
                let b = nibble(&hex[2..3])?;
                Some(Self::from_rgb8(r * 17, g * 17, b * 17))
            }
            4 => {
                let r = nibble(&hex[0..1])?;
                let g = nibble(&hex[1..2])?;
                let b = nibble(&hex[2..3])?;
                let a = nibble(&hex[3..4])?;
                let mut c = Self::from_rgb8(r * 17, g * 17, b * 17);
                c.a = (a * 17) as f32 / 255.0;
                Some(c)
            }
            6 => {
                let r = nibble(&hex[0..2])?;
                let g = nibble(&hex[2..4])?;
                let b = nibble(&hex[4..6])?;
                Some(Self::from_rgb8(r, g, b))
            }
            8 => {
                let r = nibble(&hex[0..2])?;
                let g = nibble(&hex[2..4])?;
                let b = nibble(&hex[4..6])?;
                let a = nibble(&hex[6..8])?;
                let mut c = Self::from_rgb8(r, g, b);
                c.a = a as f32 / 255.0;
                Some(c)
            }
            _ => None,
        }
    }

    /// Parse any textual color form: '#'-prefixed or '0x'-prefixed hex, or
    /// a named color.
    pub fn web(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex(hex);
        }
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return Self::from_hex(hex);
        }
        Self::from_name(s)
    }

    /// Get a named color
    pub fn from_name(name: &str) -> Option<Self> {
        let rgb8 = |r, g, b| Some(Self::from_rgb8(r, g, b));
        match name.to_ascii_lowercase().as_str() {
            // Basic colors
            "black" => rgb8(0, 0, 0),
            "white" => rgb8(255, 255, 255),
            "red" => rgb8(255, 0, 0),
            "green" => rgb8(0, 128, 0),
            "blue" => rgb8(0, 0, 255),
            "yellow" => rgb8(255, 255, 0),
            "cyan" | "aqua" => rgb8(0, 255, 255),
            "magenta" | "fuchsia" => rgb8(255, 0, 255),

            // Grays
            "gray" | "grey" => rgb8(128, 128, 128),
            "silver" => rgb8(192, 192, 192),
            "darkgray" | "darkgrey" => rgb8(169, 169, 169),
            "lightgray" | "lightgrey" => rgb8(211, 211, 211),
            "dimgray" | "dimgrey" => rgb8(105, 105, 105),
            "gainsboro" => rgb8(220, 220, 220),

            // Reds
            "maroon" => rgb8(128, 0, 0),
            "darkred" => rgb8(139, 0, 0),
            "crimson" => rgb8(220, 20, 60),
            "firebrick" => rgb8(178, 34, 34),
            "indianred" => rgb8(205, 92, 92),
            "lightcoral" => rgb8(240, 128, 128),
            "salmon" => rgb8(250, 128, 114),
            "darksalmon" => rgb8(233, 150, 122),
            "lightsalmon" => rgb8(255, 160, 122),
            "tomato" => rgb8(255, 99, 71),
            "orangered" => rgb8(255, 69, 0),
            "coral" => rgb8(255, 127, 80),

            // Oranges
            "orange" => rgb8(255, 165, 0),
            "darkorange" => rgb8(255, 140, 0),

            // Yellows
            "gold" => rgb8(255, 215, 0),
            "lightyellow" => rgb8(255, 255, 224),
            "lemonchiffon" => rgb8(255, 250, 205),
            "lightgoldenrodyellow" => rgb8(250, 250, 210),
            "palegoldenrod" => rgb8(238, 232, 170),
            "khaki" => rgb8(240, 230, 140),
            "darkkhaki" => rgb8(189, 183, 107),
            "goldenrod" => rgb8(218, 165, 32),
            "darkgoldenrod" => rgb8(184, 134, 11),

            // Greens
            "lime" => rgb8(0, 255, 0),
            "limegreen" => rgb8(50, 205, 50),
            "lightgreen" => rgb8(144, 238, 144),
            "palegreen" => rgb8(152, 251, 152),
            "darkgreen" => rgb8(0, 100, 0),
            "forestgreen" => rgb8(34, 139, 34),
            "seagreen" => rgb8(46, 139, 87),
            "olive" => rgb8(128, 128, 0),
            "olivedrab" => rgb8(107, 142, 35),
            "darkolivegreen" => rgb8(85, 107, 47),
            "mediumseagreen" => rgb8(60, 179, 113),
            "lightseagreen" => rgb8(32, 178, 170),
            "springgreen" => rgb8(0, 255, 127),
            "mediumspringgreen" => rgb8(0, 250, 154),
            "darkseagreen" => rgb8(143, 188, 143),
            "mediumaquamarine" => rgb8(102, 205, 170),
            "yellowgreen" => rgb8(154, 205, 50),
            "lawngreen" => rgb8(124, 252, 0),
            "chartreuse" => rgb8(127, 255, 0),
            "greenyellow" => rgb8(173, 255, 47),
            "honeydew" => rgb8(240, 255, 240),

            // Blues
            "navy" => rgb8(0, 0, 128),
            "darkblue" => rgb8(0, 0, 139),
            "mediumblue" => rgb8(0, 0, 205),
            "midnightblue" => rgb8(25, 25, 112),
            "royalblue" => rgb8(65, 105, 225),
            "steelblue" => rgb8(70, 130, 180),
            "dodgerblue" => rgb8(30, 144, 255),
            "deepskyblue" => rgb8(0, 191, 255),
            "cornflowerblue" => rgb8(100, 149, 237),
            "skyblue" => rgb8(135, 206, 235),
            "lightskyblue" => rgb8(135, 206, 250),
            "lightblue" => rgb8(173, 216, 230),
            "powderblue" => rgb8(176, 224, 230),
            "lightsteelblue" => rgb8(176, 196, 222),
            "cadetblue" => rgb8(95, 158, 160),
            "slateblue" => rgb8(106, 90, 205),
            "darkslateblue" => rgb8(72, 61, 139),
            "mediumslateblue" => rgb8(123, 104, 238),

            // Cyans and teals
            "teal" => rgb8(0, 128, 128),
            "darkcyan" => rgb8(0, 139, 139),
            "lightcyan" => rgb8(224, 255, 255),
            "aquamarine" => rgb8(127, 255, 212),
            "turquoise" => rgb8(64, 224, 208),
            "mediumturquoise" => rgb8(72, 209, 204),
            "darkturquoise" => rgb8(0, 206, 209),
            "paleturquoise" => rgb8(175, 238, 238),

            // Purples
            "purple" => rgb8(128, 0, 128),
            "darkmagenta" => rgb8(139, 0, 139),
            "darkviolet" => rgb8(148, 0, 211),
            "darkorchid" => rgb8(153, 50, 204),
            "mediumorchid" => rgb8(186, 85, 211),
            "orchid" => rgb8(218, 112, 214),
            "violet" => rgb8(238, 130, 238),
            "plum" => rgb8(221, 160, 221),
            "thistle" => rgb8(216, 191, 216),
            "lavender" => rgb8(230, 230, 250),
            "indigo" => rgb8(75, 0, 130),
            "mediumpurple" => rgb8(147, 112, 219),
            "blueviolet" => rgb8(138, 43, 226),

            // Pinks
            "pink" => rgb8(255, 192, 203),
            "lightpink" => rgb8(255, 182, 193),
            "hotpink" => rgb8(255, 105, 180),
            "deeppink" => rgb8(255, 20, 147),
            "mediumvioletred" => rgb8(199, 21, 133),
            "palevioletred" => rgb8(219, 112, 147),

            // Browns
            "brown" => rgb8(165, 42, 42),
            "saddlebrown" => rgb8(139, 69, 19),
            "sienna" => rgb8(160, 82, 45),
            "chocolate" => rgb8(210, 105, 30),
            "peru" => rgb8(205, 133, 63),
            "sandybrown" => rgb8(244, 164, 96),
            "burlywood" => rgb8(222, 184, 135),
            "tan" => rgb8(210, 180, 140),
            "rosybrown" => rgb8(188, 143, 143),

            // Whites
            "snow" => rgb8(255, 250, 250),
            "mintcream" => rgb8(245, 255, 250),
            "azure" => rgb8(240, 255, 255),
            "aliceblue" => rgb8(240, 248, 255),
            "ghostwhite" => rgb8(248, 248, 255),
            "whitesmoke" => rgb8(245, 245, 245),
            "seashell" => rgb8(255, 245, 238),
            "beige" => rgb8(245, 245, 220),
            "oldlace" => rgb8(253, 245, 230),
            "floralwhite" => rgb8(255, 250, 240),
            "ivory" => rgb8(255, 255, 240),
            "antiquewhite" => rgb8(250, 235, 215),
            "linen" => rgb8(250, 240, 230),
            "lavenderblush" => rgb8(255, 240, 245),
            "mistyrose" => rgb8(255, 228, 225),
            "papayawhip" => rgb8(255, 239, 213),
            "blanchedalmond" => rgb8(255, 235, 205),
            "bisque" => rgb8(255, 228, 196),
            "moccasin" => rgb8(255, 228, 181),
            "navajowhite" => rgb8(255, 222, 173),
            "peachpuff" => rgb8(255, 218, 185),
            "wheat" => rgb8(245, 222, 179),
            "cornsilk" => rgb8(255, 248, 220),

            // Slate grays
            "slategray" | "slategrey" => rgb8(112, 128, 144),
            "lightslategray" | "lightslategrey" => rgb8(119, 136, 153),
            "darkslategray" | "darkslategrey" => rgb8(47, 79, 79),

            "transparent" => Some(Self::transparent()),

            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

/// Convert hue (degrees, any range), saturation and brightness in [0,1]
/// to RGB in [0,1].
fn hsb_to_rgb(h: f32, s: f32, b: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        return (b, b, b);
    }
    let h = ((h % 360.0) + 360.0) % 360.0 / 60.0;
    let i = h.floor();
    let f = h - i;
    let p = b * (1.0 - s);
    let q = b * (1.0 - s * f);
    let t = b * (1.0 - s * (1.0 - f));
    match i as u32 {
        0 => (b, t, p),
        1 => (q, b, p),
        2 => (p, b, t),
        3 => (p, q, b),
        4 => (t, p, b),
        _ => (b, p, q),
    }
}

/// Converter tag carried by a `ParsedValue`, naming the conversion the
/// style engine applies when the value is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// No conversion: marker values, plain strings, lookups
    None,
    Boolean,
    String,
    Size,
    SizeSequence,
    Insets,
    InsetsSequence,
    Margins,
    MarginsSequence,
    Color,
    DeriveColor,
    Ladder,
    Stop,
    LinearGradient,
    RadialGradient,
    ImagePattern,
    PaintSequence,
    Url,
    UrlSequence,
    Effect,
    BlurType,
    CycleMethod,
    StrokeType,
    StrokeLineJoin,
    StrokeLineCap,
    BorderPaint,
    BorderPaintSequence,
    BorderStyle,
    BorderStyleSequence,
    CornerRadii,
    CornerRadiiSequence,
    BackgroundPosition,
    BackgroundPositionSequence,
    BackgroundSize,
    BackgroundSizeSequence,
    RepeatStyle,
    RepeatStyleSequence,
    BorderImageSlice,
    BorderImageSliceSequence,
    BorderImageWidth,
    BorderImageWidthSequence,
    Font,
    FontSize,
    FontStyle,
    FontWeight,
    FontFamily,
}

/// The data carried by a `ParsedValue`
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Absent slot, e.g. the unspecified focus angle of a radial gradient
    Null,
    Boolean(bool),
    Color(Color),
    Size(Size),
    String(String),
    Sequence(Vec<ParsedValue>),
}

/// A resolved property value
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedValue {
    pub payload: Payload,
    pub converter: Converter,
    /// True when the payload is a property name to be resolved at apply time
    pub lookup: bool,
}

impl ParsedValue {
    pub fn new(payload: Payload, converter: Converter) -> Self {
        Self { payload, converter, lookup: false }
    }

    pub fn null() -> Self {
        Self::new(Payload::Null, Converter::None)
    }

    pub fn color(c: Color) -> Self {
        Self::new(Payload::Color(c), Converter::Color)
    }

    pub fn size(s: Size) -> Self {
        Self::new(Payload::Size(s), Converter::Size)
    }

    pub fn boolean(b: bool) -> Self {
        Self::new(Payload::Boolean(b), Converter::Boolean)
    }

    pub fn string(s: impl Into<String>, converter: Converter) -> Self {
        Self::new(Payload::String(s.into()), converter)
    }

    pub fn sequence(values: Vec<ParsedValue>, converter: Converter) -> Self {
        Self::new(Payload::Sequence(values), converter)
    }

    pub fn lookup(name: impl Into<String>) -> Self {
        Self {
            payload: Payload::String(name.into()),
            converter: Converter::None,
            lookup: true,
        }
    }

    /// The payload as a size, if it is one
    pub fn as_size(&self) -> Option<Size> {
        match self.payload {
            Payload::Size(s) => Some(s),
            _ => None,
        }
    }

    /// The payload as a color, if it is one
    pub fn as_color(&self) -> Option<Color> {
        match self.payload {
            Payload::Color(c) => Some(c),
            _ => None,
        }
    }

    /// The payload as a string slice, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(s) => Some(s),
            _ => None,
        }
    }

    /// The payload as a value sequence, if it is one
    pub fn as_sequence(&self) -> Option<&[ParsedValue]> {
        match &self.payload {
            Payload::Sequence(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceLocation;
    use crate::tokenizer::Tokenizer;

    fn token(input: &str) -> Token {
        Tokenizer::new(input).next_token()
    }

    #[test]
    fn test_size_from_token() {
        let s = Size::from_token(&token("10px")).unwrap();
        assert_eq!(s, Size::new(10.0, SizeUnits::Px));

        let s = Size::from_token(&token("1.5em")).unwrap();
        assert_eq!(s, Size::new(1.5, SizeUnits::Em));

        let s = Size::from_token(&token("50%")).unwrap();
        assert_eq!(s, Size::percent(50.0));

        let s = Size::from_token(&token("45deg")).unwrap();
        assert_eq!(s, Size::new(45.0, SizeUnits::Deg));

        let s = Size::from_token(&token("0.25turn")).unwrap();
        assert_eq!(s, Size::new(0.25, SizeUnits::Turn));

        // bare numbers are pixels
        let s = Size::from_token(&token("7")).unwrap();
        assert_eq!(s, Size::px(7.0));
    }

    #[test]
    fn test_size_from_non_size_token() {
        let tok = Token::new(TokenKind::Ident, "red", SourceLocation::default());
        assert!(Size::from_token(&tok).is_err());
    }

    #[test]
    fn test_percent_fraction() {
        assert!((Size::percent(50.0).as_fraction() - 0.5).abs() < 1e-6);
        assert!((Size::px(3.0).as_fraction() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_hex_color_forms() {
        assert_eq!(Color::from_hex("fff").unwrap(), Color::white());
        assert_eq!(Color::from_hex("ff0000").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        let c = Color::from_hex("ff000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        let c = Color::from_hex("f008").unwrap();
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.a - 136.0 / 255.0).abs() < 1e-6);
        assert!(Color::from_hex("zzz").is_none());
        assert!(Color::from_hex("12345").is_none());
    }

    #[test]
    fn test_web_color_forms() {
        assert_eq!(Color::web("#ff0000").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::web("0xff0000ff").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::web("red").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert!(Color::web("no-such-color").is_none());
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::from_name("RED"), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(Color::from_name("transparent"), Some(Color::transparent()));
        assert_eq!(Color::from_name("grey"), Color::from_name("gray"));
    }

    #[test]
    fn test_hsb_to_rgb() {
        let c = Color::from_hsb(0.0, 1.0, 1.0, 1.0);
        assert!((c.r - 1.0).abs() < 0.01 && c.g.abs() < 0.01 && c.b.abs() < 0.01);

        let c = Color::from_hsb(120.0, 1.0, 1.0, 1.0);
        assert!(c.r.abs() < 0.01 && (c.g - 1.0).abs() < 0.01 && c.b.abs() < 0.01);

        let c = Color::from_hsb(240.0, 1.0, 1.0, 1.0);
        assert!(c.r.abs() < 0.01 && c.g.abs() < 0.01 && (c.b - 1.0).abs() < 0.01);

        // hue wraps rather than clamps
        let c = Color::from_hsb(480.0, 1.0, 1.0, 1.0);
        assert!((c.g - 1.0).abs() < 0.01);
    }
}
