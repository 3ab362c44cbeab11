//! Per-property value resolution
//!
//! Turns term trees into `ParsedValue`s. Dispatch is by property name;
//! properties without a dedicated handler fall back to a generic resolution
//! covering sizes, colors, booleans, property lookups and strings. All
//! errors here are semantic: the input tokenized and parsed, but the terms
//! do not fit the property.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::error::{CssError, CssResult, SourceLocation};
use crate::parser::{strip_quotes, Expr, Seq, Term};
use crate::tokenizer::{Token, TokenKind};
use crate::value::{Color, Converter, ParsedValue, Payload, Size, SizeUnits};

/// Resolves declaration values. Holds the set of property names declared
/// so far, so identifiers can be classified as lookups.
pub(crate) struct ValueResolver<'a> {
    properties: &'a FxHashSet<String>,
}

impl<'a> ValueResolver<'a> {
    pub(crate) fn new(properties: &'a FxHashSet<String>) -> Self {
        Self { properties }
    }

    /// Resolve the value of `property`. The property name is expected in
    /// lowercase.
    pub(crate) fn value_for(&self, property: &str, expr: &Expr) -> CssResult<ParsedValue> {
        // inherit / null / none apply to any property when they are the
        // entire value
        if let Some(term) = single_term(expr) {
            if term.is_ident("inherit") {
                return Ok(ParsedValue::string("inherit", Converter::None));
            }
            if term.is_ident("null") || term.is_ident("none") {
                return Ok(ParsedValue::null());
            }
        }

        match property {
            "-fx-fill" | "-fx-stroke" => self.paint(self.layer(expr)?),
            "-fx-background-color" => self.layers(expr, Self::paint, Converter::PaintSequence),
            "-fx-background-image" | "-fx-border-image-source" => {
                self.layers(expr, Self::uri, Converter::UrlSequence)
            }
            "-fx-background-insets" | "-fx-border-insets" | "-fx-border-image-insets" => {
                self.side_layers(expr, Converter::Insets, Converter::InsetsSequence)
            }
            // takes exactly one insets layer, unlike the background/border
            // insets properties
            "-fx-opaque-insets" => {
                if let [_, second, ..] = expr.layers.as_slice() {
                    return Err(CssError::invalid_value(
                        "Expected a single set of insets",
                        second.first().map(Term::location).unwrap_or_default(),
                    ));
                }
                self.sides(self.layer(expr)?, Converter::Insets)
            }
            "-fx-border-width" => {
                self.side_layers(expr, Converter::Margins, Converter::MarginsSequence)
            }
            "-fx-padding" | "-fx-label-padding" => {
                self.sides(self.layer(expr)?, Converter::Insets)
            }
            "-fx-background-position" => self.layers(
                expr,
                Self::background_position,
                Converter::BackgroundPositionSequence,
            ),
            "-fx-background-size" => {
                self.layers(expr, Self::background_size, Converter::BackgroundSizeSequence)
            }
            "-fx-background-repeat" | "-fx-border-image-repeat" => {
                self.layers(expr, Self::repeat_style, Converter::RepeatStyleSequence)
            }
            "-fx-background-radius" | "-fx-border-radius" => {
                self.layers(expr, Self::corner_radii, Converter::CornerRadiiSequence)
            }
            "-fx-border-color" => {
                self.layers(expr, Self::border_paint, Converter::BorderPaintSequence)
            }
            "-fx-border-style" => {
                self.layers(expr, Self::border_style, Converter::BorderStyleSequence)
            }
            "-fx-border-image-slice" => self.layers(
                expr,
                Self::border_image_slice,
                Converter::BorderImageSliceSequence,
            ),
            "-fx-border-image-width" => {
                self.side_layers(expr, Converter::BorderImageWidth, Converter::BorderImageWidthSequence)
            }
            "-fx-stroke-dash-array" => self.size_series(self.layer(expr)?),
            "-fx-stroke-line-cap" => self.keyword(
                self.layer(expr)?,
                &["butt", "round", "square"],
                Converter::StrokeLineCap,
            ),
            "-fx-stroke-line-join" => self.keyword(
                self.layer(expr)?,
                &["miter", "bevel", "round"],
                Converter::StrokeLineJoin,
            ),
            "-fx-stroke-type" => self.keyword(
                self.layer(expr)?,
                &["inside", "outside", "centered"],
                Converter::StrokeType,
            ),
            "-fx-blend-mode" | "-fx-font-smoothing-type" => {
                self.ident_string(self.layer(expr)?)
            }
            "-fx-effect" => self.effect(self.layer(expr)?),
            _ => {
                if property.ends_with("font") {
                    return self.font(self.layer(expr)?);
                }
                if property.ends_with("font-family") {
                    return self.font_family(self.layer(expr)?);
                }
                if property.ends_with("font-size") {
                    return self.font_size(self.layer(expr)?);
                }
                if property.ends_with("font-style") {
                    return self.font_style(self.layer(expr)?);
                }
                if property.ends_with("font-weight") {
                    return self.font_weight(self.layer(expr)?);
                }
                self.generic(expr)
            }
        }
    }

    fn layer<'e>(&self, expr: &'e Expr) -> CssResult<&'e [Term]> {
        self.nonempty(&expr.layers[0])
    }

    fn nonempty<'e>(&self, seq: &'e [Term]) -> CssResult<&'e [Term]> {
        if seq.is_empty() {
            return Err(CssError::invalid_value(
                "Expected value",
                SourceLocation::default(),
            ));
        }
        Ok(seq)
    }

    /// Resolve per comma layer into a sequence under `converter`. The layer
    /// count is part of the value's shape, so a lone layer still wraps.
    fn layers(
        &self,
        expr: &Expr,
        f: fn(&Self, &[Term]) -> CssResult<ParsedValue>,
        converter: Converter,
    ) -> CssResult<ParsedValue> {
        let mut values = Vec::with_capacity(expr.layers.len());
        for seq in &expr.layers {
            values.push(f(self, self.nonempty(seq)?)?);
        }
        Ok(ParsedValue::sequence(values, converter))
    }

    fn side_layers(
        &self,
        expr: &Expr,
        single: Converter,
        series: Converter,
    ) -> CssResult<ParsedValue> {
        let mut values = Vec::with_capacity(expr.layers.len());
        for seq in &expr.layers {
            values.push(self.sides(self.nonempty(seq)?, single)?);
        }
        Ok(ParsedValue::sequence(values, series))
    }

    /// 1 to 4 sizes expanded to top, right, bottom, left
    fn sides(&self, seq: &[Term], converter: Converter) -> CssResult<ParsedValue> {
        let sizes = self.sizes(seq)?;
        if sizes.is_empty() || sizes.len() > 4 {
            return Err(CssError::invalid_value(
                format!("Expected 1 to 4 sizes, found {}", sizes.len()),
                seq[0].location(),
            ));
        }
        let [top, right, bottom, left] = expand_sides(&sizes);
        Ok(ParsedValue::sequence(
            vec![
                ParsedValue::size(top),
                ParsedValue::size(right),
                ParsedValue::size(bottom),
                ParsedValue::size(left),
            ],
            converter,
        ))
    }

    fn sizes(&self, seq: &[Term]) -> CssResult<SmallVec<[Size; 4]>> {
        seq.iter().map(|term| self.size(term)).collect()
    }

    fn size(&self, term: &Term) -> CssResult<Size> {
        match term.token() {
            Some(token) if token.kind.is_size() => Size::from_token(token),
            _ => Err(CssError::expected(
                "<size>",
                term_text(term),
                term.location(),
            )),
        }
    }

    fn size_series(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        let sizes = self.sizes(seq)?;
        Ok(ParsedValue::sequence(
            sizes.into_iter().map(ParsedValue::size).collect(),
            Converter::SizeSequence,
        ))
    }

    /// A single paint: color, gradient, lookup or image fill
    fn paint(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if let Some(first) = seq.first() {
            if first.is_ident("linear") && seq.len() > 1 {
                return self.deprecated_linear_gradient(seq);
            }
            if first.is_ident("radial") && seq.len() > 1 {
                return self.deprecated_radial_gradient(seq);
            }
            if first.is_ident("ladder") && seq.len() > 1 {
                return self.deprecated_ladder(seq);
            }
        }
        if seq.len() != 1 {
            return Err(CssError::invalid_value(
                "Expected a single paint",
                seq[0].location(),
            ));
        }
        let value = self.term_value(&seq[0])?;
        // a bare url fill is an image pattern
        if value.converter == Converter::Url {
            return Ok(ParsedValue::sequence(vec![value], Converter::ImagePattern));
        }
        Ok(value)
    }

    fn uri(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if seq.len() != 1 {
            return Err(CssError::invalid_value(
                "Expected a single <uri>",
                seq[0].location(),
            ));
        }
        let value = self.term_value(&seq[0])?;
        match (&value.payload, value.converter) {
            (_, Converter::Url) => Ok(value),
            (Payload::String(url), Converter::String) => Ok(url_value(url.clone())),
            _ => Err(CssError::expected(
                "<uri>",
                term_text(&seq[0]),
                seq[0].location(),
            )),
        }
    }

    /// Generic single-term resolution
    fn term_value(&self, term: &Term) -> CssResult<ParsedValue> {
        let token = match term {
            Term::Call { name, args } => return self.call_value(name, args),
            Term::Leaf(token) => token,
        };
        if token.kind.is_size() {
            return Ok(ParsedValue::size(Size::from_token(token)?));
        }
        match token.kind {
            TokenKind::String => Ok(ParsedValue::string(
                strip_quotes(&token.text),
                Converter::String,
            )),
            TokenKind::Hash => match Color::from_hex(&token.text[1..]) {
                Some(color) => Ok(ParsedValue::color(color)),
                None => Err(CssError::invalid_color(&token.text, token.location)),
            },
            TokenKind::Ident => {
                let lower = token.text.to_lowercase();
                match lower.as_str() {
                    "infinity" => return Ok(ParsedValue::size(Size::px(f32::MAX))),
                    "true" => return Ok(ParsedValue::boolean(true)),
                    "false" => return Ok(ParsedValue::boolean(false)),
                    "inherit" => return Ok(ParsedValue::string("inherit", Converter::None)),
                    "null" | "none" => return Ok(ParsedValue::null()),
                    _ => {}
                }
                // a previously declared property name wins over colors
                if self.properties.contains(&lower) {
                    return Ok(ParsedValue::lookup(token.text.clone()));
                }
                if let Some(color) = Color::from_name(&lower) {
                    return Ok(ParsedValue::color(color));
                }
                // '0x'-prefixed hex colors are lexed as identifiers
                if lower.starts_with("0x") {
                    return match Color::from_hex(&lower[2..]) {
                        Some(color) => Ok(ParsedValue::color(color)),
                        None => Err(CssError::invalid_color(&token.text, token.location)),
                    };
                }
                Ok(ParsedValue::string(token.text.clone(), Converter::String))
            }
            _ => Err(CssError::unexpected_token(&token.text, token.location)),
        }
    }

    /// Dispatch a function term by exact, case-insensitive name
    fn call_value(&self, name: &Token, args: &[Seq]) -> CssResult<ParsedValue> {
        if name.kind == TokenKind::LParen {
            return self.paren_group(name, args);
        }
        let func = name.text.trim_end_matches('(').to_lowercase();
        match func.as_str() {
            "rgb" => self.rgb(name, args, false),
            "rgba" => self.rgb(name, args, true),
            "hsb" => self.hsb(name, args, false),
            "hsba" => self.hsb(name, args, true),
            "derive" => self.derive(name, args),
            "ladder" => self.ladder(name, args),
            "url" => self.url(name, args),
            "linear-gradient" => self.linear_gradient(name, args),
            "radial-gradient" => self.radial_gradient(name, args),
            "dropshadow" => self.shadow(name, args, "dropshadow"),
            "innershadow" => self.shadow(name, args, "innershadow"),
            "image-pattern" => self.image_pattern(name, args),
            "repeating-image-pattern" => self.image_pattern(name, args),
            "segments" => self.segments(name, args),
            _ => Err(CssError::invalid_value(
                format!("Unknown function '{}'", func),
                name.location,
            )),
        }
    }

    /// A bare parenthesized group: either the deprecated
    /// '(<offset>, <color>)' stop form, or a simple grouping.
    fn paren_group(&self, name: &Token, args: &[Seq]) -> CssResult<ParsedValue> {
        if args.len() == 2 {
            let offset = Size::from_token(self.single_token(&args[0], name)?)?;
            let color = self.color_value(&args[1])?;
            return Ok(ParsedValue::sequence(
                vec![ParsedValue::size(offset), color],
                Converter::Stop,
            ));
        }
        if args.len() == 1 && args[0].len() == 1 {
            return self.term_value(&args[0][0]);
        }
        Err(CssError::invalid_value(
            "Unexpected parenthesized group",
            name.location,
        ))
    }

    /// The single leaf token of a function argument
    fn single_token<'t>(&self, seq: &'t [Term], name: &Token) -> CssResult<&'t Token> {
        match seq {
            [Term::Leaf(token)] => Ok(token),
            _ => Err(CssError::invalid_value(
                format!("Malformed argument to '{}'", name.text.trim_end_matches('(')),
                seq.first().map(Term::location).unwrap_or(name.location),
            )),
        }
    }

    /// A value usable where a color is required: a literal color, a lookup,
    /// or a color function.
    fn color_value(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        let seq = self.nonempty(seq)?;
        if seq.len() != 1 {
            return Err(CssError::invalid_value(
                "Expected a single color",
                seq[0].location(),
            ));
        }
        let value = self.term_value(&seq[0])?;
        let ok = value.lookup
            || matches!(value.payload, Payload::Color(_))
            || matches!(value.converter, Converter::DeriveColor | Converter::Ladder);
        if !ok {
            return Err(CssError::invalid_color(
                term_text(&seq[0]),
                seq[0].location(),
            ));
        }
        Ok(value)
    }

    /// rgb(r, g, b) / rgba(r, g, b, a). Channels are all numbers out of 255
    /// or all percentages; mixing the two is an error. Alpha is a plain
    /// number. Everything is clamped to [0, 1].
    fn rgb(&self, name: &Token, args: &[Seq], alpha: bool) -> CssResult<ParsedValue> {
        let expected = if alpha { 4 } else { 3 };
        if args.len() != expected {
            return Err(CssError::invalid_value(
                format!(
                    "Expected {} arguments to '{}'",
                    expected,
                    name.text.trim_end_matches('(')
                ),
                name.location,
            ));
        }

        let channel_kind = self.single_token(&args[0], name)?.kind;
        if channel_kind != TokenKind::Number && channel_kind != TokenKind::Percentage {
            let token = self.single_token(&args[0], name)?;
            return Err(CssError::expected(
                "<number> or <percentage>",
                &token.text,
                token.location,
            ));
        }

        let mut channels = [0.0f32; 3];
        for (slot, seq) in channels.iter_mut().zip(args) {
            let token = self.single_token(seq, name)?;
            if token.kind != channel_kind {
                return Err(CssError::invalid_value(
                    "Cannot mix numbers and percentages in rgb()",
                    token.location,
                ));
            }
            let size = Size::from_token(token)?;
            *slot = if channel_kind == TokenKind::Percentage {
                (size.value / 100.0).clamp(0.0, 1.0)
            } else {
                (size.value / 255.0).clamp(0.0, 1.0)
            };
        }

        let a = if alpha {
            let token = self.single_token(&args[3], name)?;
            if token.kind != TokenKind::Number {
                return Err(CssError::expected("<number>", &token.text, token.location));
            }
            Size::from_token(token)?.value.clamp(0.0, 1.0)
        } else {
            1.0
        };

        let [r, g, b] = channels;
        Ok(ParsedValue::color(Color::rgba(r, g, b, a)))
    }

    /// hsb(h, s, b) / hsba(h, s, b, a). The hue is not clamped; it wraps.
    fn hsb(&self, name: &Token, args: &[Seq], alpha: bool) -> CssResult<ParsedValue> {
        let expected = if alpha { 4 } else { 3 };
        if args.len() != expected {
            return Err(CssError::invalid_value(
                format!(
                    "Expected {} arguments to '{}'",
                    expected,
                    name.text.trim_end_matches('(')
                ),
                name.location,
            ));
        }

        let hue_token = self.single_token(&args[0], name)?;
        if hue_token.kind != TokenKind::Number {
            return Err(CssError::expected("<number>", &hue_token.text, hue_token.location));
        }
        let h = Size::from_token(hue_token)?.value;

        let mut sb = [0.0f32; 2];
        for (slot, seq) in sb.iter_mut().zip(&args[1..3]) {
            let size = Size::from_token(self.single_token(seq, name)?)?;
            *slot = size.as_fraction();
        }

        let a = if alpha {
            let token = self.single_token(&args[3], name)?;
            Size::from_token(token)?.value
        } else {
            1.0
        };

        let [s, b] = sb;
        Ok(ParsedValue::color(Color::from_hsb(h, s, b, a)))
    }

    /// derive(color, brightness%)
    fn derive(&self, name: &Token, args: &[Seq]) -> CssResult<ParsedValue> {
        if args.len() != 2 {
            return Err(CssError::invalid_value(
                "Expected 2 arguments to 'derive'",
                name.location,
            ));
        }
        let color = self.color_value(&args[0])?;
        let brightness = Size::from_token(self.single_token(&args[1], name)?)?;
        Ok(ParsedValue::sequence(
            vec![color, ParsedValue::size(brightness)],
            Converter::DeriveColor,
        ))
    }

    /// ladder(color, stop, stop, ...)
    fn ladder(&self, name: &Token, args: &[Seq]) -> CssResult<ParsedValue> {
        if args.len() < 3 {
            return Err(CssError::invalid_value(
                "'ladder' needs a color and at least two stops",
                name.location,
            ));
        }
        let mut values = vec![self.color_value(&args[0])?];
        values.extend(self.color_stops(&args[1..])?);
        Ok(ParsedValue::sequence(values, Converter::Ladder))
    }

    /// url(<string>). The second slot is reserved for the resolution base,
    /// filled in when the stylesheet is applied.
    fn url(&self, name: &Token, args: &[Seq]) -> CssResult<ParsedValue> {
        if args.len() != 1 {
            return Err(CssError::invalid_value(
                "Expected 1 argument to 'url'",
                name.location,
            ));
        }
        let token = self.single_token(&args[0], name)?;
        let url = match token.kind {
            TokenKind::String => strip_quotes(&token.text).to_string(),
            TokenKind::Ident => token.text.clone(),
            _ => {
                return Err(CssError::expected("<uri>", &token.text, token.location));
            }
        };
        Ok(url_value(url))
    }

    /// dropshadow/innershadow(blur-type, color, radius, spread, x, y)
    fn shadow(&self, name: &Token, args: &[Seq], kind: &str) -> CssResult<ParsedValue> {
        if args.len() != 6 {
            return Err(CssError::invalid_value(
                format!("Expected 6 arguments to '{}'", kind),
                name.location,
            ));
        }
        let blur_token = self.single_token(&args[0], name)?;
        let blur = blur_token.text.to_lowercase();
        if !matches!(
            blur.as_str(),
            "gaussian" | "one-pass-box" | "two-pass-box" | "three-pass-box"
        ) {
            return Err(CssError::invalid_value(
                format!("Invalid blur type '{}'", blur_token.text),
                blur_token.location,
            ));
        }

        let mut values = vec![
            ParsedValue::string(kind, Converter::Effect),
            ParsedValue::string(blur, Converter::BlurType),
            self.color_value(&args[1])?,
        ];
        for seq in &args[2..] {
            let token = self.single_token(seq, name)?;
            values.push(ParsedValue::size(Size::from_token(token)?));
        }
        Ok(ParsedValue::sequence(values, Converter::Effect))
    }

    fn effect(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if seq.len() != 1 {
            return Err(CssError::invalid_value(
                "Expected a single effect",
                seq[0].location(),
            ));
        }
        let value = self.term_value(&seq[0])?;
        if value.converter != Converter::Effect {
            return Err(CssError::expected(
                "<effect>",
                term_text(&seq[0]),
                seq[0].location(),
            ));
        }
        Ok(value)
    }

    /// image-pattern(url [, x, y, w, h [, proportional]])
    fn image_pattern(&self, name: &Token, args: &[Seq]) -> CssResult<ParsedValue> {
        if args.len() != 1 && args.len() != 5 && args.len() != 6 {
            return Err(CssError::invalid_value(
                format!(
                    "Expected 1, 5 or 6 arguments to '{}'",
                    name.text.trim_end_matches('(')
                ),
                name.location,
            ));
        }
        let token = self.single_token(&args[0], name)?;
        if token.kind != TokenKind::String {
            return Err(CssError::expected("<string>", &token.text, token.location));
        }
        let mut values = vec![ParsedValue::string(
            strip_quotes(&token.text),
            Converter::String,
        )];
        for seq in args.iter().skip(1).take(4) {
            let token = self.single_token(seq, name)?;
            values.push(ParsedValue::size(Size::from_token(token)?));
        }
        let proportional = if args.len() == 6 {
            let token = self.single_token(&args[5], name)?;
            match token.text.to_lowercase().as_str() {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(CssError::expected(
                        "'true' or 'false'",
                        &token.text,
                        token.location,
                    ));
                }
            }
        } else {
            true
        };
        values.push(ParsedValue::boolean(proportional));
        Ok(ParsedValue::sequence(values, Converter::ImagePattern))
    }

    /// segments(size, size, ...)
    fn segments(&self, name: &Token, args: &[Seq]) -> CssResult<ParsedValue> {
        if args.is_empty() {
            return Err(CssError::invalid_value(
                "Expected at least one segment",
                name.location,
            ));
        }
        let mut values = Vec::with_capacity(args.len());
        for seq in args {
            let token = self.single_token(seq, name)?;
            values.push(ParsedValue::size(Size::from_token(token)?));
        }
        Ok(ParsedValue::sequence(values, Converter::SizeSequence))
    }

    /// linear-gradient([from <point> to <point> | to <side-or-corner>,]
    /// [repeat | reflect,] stops)
    fn linear_gradient(&self, name: &Token, args: &[Seq]) -> CssResult<ParsedValue> {
        let mut index = 0;
        // default axis runs top to bottom
        let mut start = [Size::percent(0.0), Size::percent(0.0)];
        let mut end = [Size::percent(0.0), Size::percent(100.0)];

        match args.get(index).and_then(|seq| seq.first()) {
            Some(term) if term.is_ident("from") => {
                let seq: &[Term] = &args[index];
                if seq.len() != 6 || !seq[3].is_ident("to") {
                    return Err(CssError::invalid_value(
                        "Malformed 'from ... to ...' in linear-gradient",
                        term.location(),
                    ));
                }
                start = [self.size(&seq[1])?, self.size(&seq[2])?];
                end = [self.size(&seq[4])?, self.size(&seq[5])?];
                index += 1;
            }
            Some(term) if term.is_ident("to") => {
                let seq: &[Term] = &args[index];
                if seq.len() < 2 || seq.len() > 3 {
                    return Err(CssError::invalid_value(
                        "Malformed 'to' clause in linear-gradient",
                        term.location(),
                    ));
                }
                start = [Size::percent(0.0), Size::percent(0.0)];
                end = [Size::percent(0.0), Size::percent(0.0)];
                for side in &seq[1..] {
                    match side.ident().map(str::to_lowercase).as_deref() {
                        Some("top") => {
                            start[1] = Size::percent(100.0);
                            end[1] = Size::percent(0.0);
                        }
                        Some("bottom") => {
                            start[1] = Size::percent(0.0);
                            end[1] = Size::percent(100.0);
                        }
                        Some("left") => {
                            start[0] = Size::percent(100.0);
                            end[0] = Size::percent(0.0);
                        }
                        Some("right") => {
                            start[0] = Size::percent(0.0);
                            end[0] = Size::percent(100.0);
                        }
                        _ => {
                            return Err(CssError::invalid_value(
                                format!("Invalid side '{}'", term_text(side)),
                                side.location(),
                            ));
                        }
                    }
                }
                index += 1;
            }
            _ => {}
        }

        let mut cycle = "no-cycle";
        if let Some(term) = args
            .get(index)
            .filter(|seq| seq.len() == 1)
            .and_then(|seq| seq.first())
        {
            if term.is_ident("repeat") {
                cycle = "repeat";
                index += 1;
            } else if term.is_ident("reflect") {
                cycle = "reflect";
                index += 1;
            }
        }

        let stops = self.color_stops(&args[index..])?;
        if stops.len() < 2 {
            return Err(CssError::invalid_value(
                "linear-gradient needs at least two color stops",
                name.location,
            ));
        }

        let mut values = vec![
            ParsedValue::size(start[0]),
            ParsedValue::size(start[1]),
            ParsedValue::size(end[0]),
            ParsedValue::size(end[1]),
            ParsedValue::string(cycle, Converter::CycleMethod),
        ];
        values.extend(stops);
        Ok(ParsedValue::sequence(values, Converter::LinearGradient))
    }

    /// radial-gradient([focus-angle <angle>,] [focus-distance <percent>,]
    /// [center <point>,] radius <size>, [repeat | reflect,] stops)
    fn radial_gradient(&self, name: &Token, args: &[Seq]) -> CssResult<ParsedValue> {
        let mut index = 0;
        let mut focus_angle = ParsedValue::null();
        let mut focus_distance = ParsedValue::null();
        let mut center = [Size::percent(50.0), Size::percent(50.0)];
        let mut radius = None;
        let mut cycle = "no-cycle";

        while let Some(seq) = args.get(index) {
            let seq: &[Term] = seq;
            let keyword = seq.first().and_then(Term::ident).map(str::to_lowercase);
            match keyword.as_deref() {
                Some("focus-angle") if seq.len() == 2 => {
                    focus_angle = ParsedValue::size(self.size(&seq[1])?);
                    index += 1;
                }
                Some("focus-distance") if seq.len() == 2 => {
                    focus_distance = ParsedValue::size(self.size(&seq[1])?);
                    index += 1;
                }
                Some("center") if seq.len() == 3 => {
                    center = [self.size(&seq[1])?, self.size(&seq[2])?];
                    index += 1;
                }
                Some("radius") if seq.len() == 2 => {
                    radius = Some(self.size(&seq[1])?);
                    index += 1;
                }
                Some("repeat") if seq.len() == 1 => {
                    cycle = "repeat";
                    index += 1;
                }
                Some("reflect") if seq.len() == 1 => {
                    cycle = "reflect";
                    index += 1;
                }
                _ => break,
            }
        }

        let Some(radius) = radius else {
            return Err(CssError::invalid_value(
                "radial-gradient needs a radius",
                name.location,
            ));
        };
        let stops = self.color_stops(&args[index..])?;
        if stops.len() < 2 {
            return Err(CssError::invalid_value(
                "radial-gradient needs at least two color stops",
                name.location,
            ));
        }

        let mut values = vec![
            focus_angle,
            focus_distance,
            ParsedValue::size(center[0]),
            ParsedValue::size(center[1]),
            ParsedValue::size(radius),
            ParsedValue::string(cycle, Converter::CycleMethod),
        ];
        values.extend(stops);
        Ok(ParsedValue::sequence(values, Converter::RadialGradient))
    }

    /// Parse color stops and normalize their offsets: missing first and
    /// last offsets default to 0% and 100%, offsets never decrease, and
    /// runs of unspecified offsets are spread evenly between their
    /// neighbors.
    fn color_stops(&self, args: &[Seq]) -> CssResult<Vec<ParsedValue>> {
        if args.is_empty() {
            return Err(CssError::invalid_value(
                "Expected color stops",
                SourceLocation::default(),
            ));
        }

        let mut colors = Vec::with_capacity(args.len());
        let mut offsets: Vec<Option<Size>> = Vec::with_capacity(args.len());
        let mut units: Option<SizeUnits> = None;

        for seq in args {
            let seq = self.nonempty(seq)?;
            if seq.len() > 2 {
                return Err(CssError::invalid_value(
                    "Malformed color stop",
                    seq[2].location(),
                ));
            }
            colors.push(self.color_value(&seq[..1])?);
            let offset = match seq.get(1) {
                Some(term) => {
                    let size = self.size(term)?;
                    match units {
                        Some(u) if u != size.units => {
                            return Err(CssError::invalid_value(
                                "Cannot mix stop offset units",
                                term.location(),
                            ));
                        }
                        None => units = Some(size.units),
                        _ => {}
                    }
                    Some(size)
                }
                None => None,
            };
            offsets.push(offset);
        }

        let units = units.unwrap_or(SizeUnits::Percent);
        let span = if units == SizeUnits::Percent {
            100.0
        } else {
            offsets.iter().flatten().last().map(|s| s.value).unwrap_or(0.0)
        };
        let last = offsets.len() - 1;
        if offsets[0].is_none() {
            offsets[0] = Some(Size::new(0.0, units));
        }
        if offsets[last].is_none() {
            offsets[last] = Some(Size::new(span, units));
        }

        // offsets never decrease: clamp up to the running maximum
        let mut running = f32::MIN;
        for offset in offsets.iter_mut().flatten() {
            if offset.value < running {
                offset.value = running;
            } else {
                running = offset.value;
            }
        }

        // spread runs of unspecified offsets evenly between neighbors
        let mut i = 0;
        while i < offsets.len() {
            if offsets[i].is_some() {
                i += 1;
                continue;
            }
            let start = i;
            let mut end = i;
            while offsets[end].is_none() {
                end += 1;
            }
            let before = match offsets[start - 1] {
                Some(size) => size.value,
                None => 0.0,
            };
            let after = match offsets[end] {
                Some(size) => size.value,
                None => span,
            };
            let step = (after - before) / (end - start + 1) as f32;
            for (k, slot) in offsets[start..end].iter_mut().enumerate() {
                *slot = Some(Size::new(before + step * (k + 1) as f32, units));
            }
            i = end + 1;
        }

        let mut stops = Vec::with_capacity(colors.len());
        for (color, offset) in colors.into_iter().zip(offsets) {
            let offset = offset.unwrap_or(Size::new(0.0, units));
            stops.push(ParsedValue::sequence(
                vec![ParsedValue::size(offset), color],
                Converter::Stop,
            ));
        }
        Ok(stops)
    }

    /// Deprecated 'linear (x1,y1) to (x2,y2) stops ...' form. Stop offsets
    /// are taken as written, without normalization.
    fn deprecated_linear_gradient(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        log::warn!("deprecated gradient syntax; use linear-gradient() instead");
        let location = seq[0].location();
        if seq.len() < 7 || !seq[2].is_ident("to") || !seq[4].is_ident("stops") {
            return Err(CssError::invalid_value("Malformed linear gradient", location));
        }
        let start = self.point(&seq[1])?;
        let end = self.point(&seq[3])?;
        let (stops, cycle) = self.deprecated_stops(&seq[5..])?;

        let mut values = vec![
            ParsedValue::size(start.0),
            ParsedValue::size(start.1),
            ParsedValue::size(end.0),
            ParsedValue::size(end.1),
            ParsedValue::string(cycle, Converter::CycleMethod),
        ];
        values.extend(stops);
        Ok(ParsedValue::sequence(values, Converter::LinearGradient))
    }

    /// Deprecated 'radial [(cx,cy)] <radius> stops ...' form
    fn deprecated_radial_gradient(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        log::warn!("deprecated gradient syntax; use radial-gradient() instead");
        let location = seq[0].location();
        let mut index = 1;
        let mut center = (Size::percent(50.0), Size::percent(50.0));
        if let Some(Term::Call { name, .. }) = seq.get(index) {
            if name.kind == TokenKind::LParen {
                center = self.point(&seq[index])?;
                index += 1;
            }
        }
        let radius = match seq.get(index) {
            Some(term) => self.size(term)?,
            None => {
                return Err(CssError::invalid_value("Malformed radial gradient", location));
            }
        };
        index += 1;
        if !seq.get(index).map(|t| t.is_ident("stops")).unwrap_or(false) {
            return Err(CssError::invalid_value("Malformed radial gradient", location));
        }
        index += 1;
        let (stops, cycle) = self.deprecated_stops(&seq[index..])?;

        let mut values = vec![
            ParsedValue::null(),
            ParsedValue::null(),
            ParsedValue::size(center.0),
            ParsedValue::size(center.1),
            ParsedValue::size(radius),
            ParsedValue::string(cycle, Converter::CycleMethod),
        ];
        values.extend(stops);
        Ok(ParsedValue::sequence(values, Converter::RadialGradient))
    }

    /// Deprecated 'ladder <color> stops (o,c)+' form
    fn deprecated_ladder(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        log::warn!("deprecated ladder syntax; use ladder() instead");
        let location = seq[0].location();
        if seq.len() < 5 || !seq[2].is_ident("stops") {
            return Err(CssError::invalid_value("Malformed ladder", location));
        }
        let color = self.color_value(&seq[1..2])?;
        let (stops, _) = self.deprecated_stops(&seq[3..])?;
        let mut values = vec![color];
        values.extend(stops);
        Ok(ParsedValue::sequence(values, Converter::Ladder))
    }

    /// '(<offset>, <color>)' stops with an optional trailing cycle keyword
    fn deprecated_stops(
        &self,
        terms: &[Term],
    ) -> CssResult<(Vec<ParsedValue>, &'static str)> {
        let mut cycle = "no-cycle";
        let mut terms = terms;
        if let Some(last) = terms.last() {
            if last.is_ident("repeat") {
                cycle = "repeat";
                terms = &terms[..terms.len() - 1];
            } else if last.is_ident("reflect") {
                cycle = "reflect";
                terms = &terms[..terms.len() - 1];
            }
        }

        let mut stops = Vec::with_capacity(terms.len());
        for term in terms {
            let value = self.term_value(term)?;
            if value.converter != Converter::Stop {
                return Err(CssError::invalid_value(
                    "Expected '(<offset>, <color>)' stop",
                    term.location(),
                ));
            }
            stops.push(value);
        }
        if stops.len() < 2 {
            return Err(CssError::invalid_value(
                "Expected at least two color stops",
                terms.first().map(Term::location).unwrap_or_default(),
            ));
        }
        Ok((stops, cycle))
    }

    /// '(<x>, <y>)' point
    fn point(&self, term: &Term) -> CssResult<(Size, Size)> {
        if let Term::Call { name, args } = term {
            if name.kind == TokenKind::LParen && args.len() == 2 {
                let x = Size::from_token(self.single_token(&args[0], name)?)?;
                let y = Size::from_token(self.single_token(&args[1], name)?)?;
                return Ok((x, y));
            }
        }
        Err(CssError::invalid_value("Expected '(<x>, <y>)'", term.location()))
    }

    /// 1 to 4 border paints expanded to top, right, bottom, left
    fn border_paint(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if seq.len() > 4 {
            return Err(CssError::invalid_value(
                format!("Expected 1 to 4 paints, found {}", seq.len()),
                seq[0].location(),
            ));
        }
        let mut paints = Vec::with_capacity(seq.len());
        for term in seq {
            paints.push(self.term_value(term)?);
        }
        let top = paints[0].clone();
        let right = paints.get(1).cloned().unwrap_or_else(|| top.clone());
        let bottom = paints.get(2).cloned().unwrap_or_else(|| top.clone());
        let left = paints.get(3).cloned().unwrap_or_else(|| right.clone());
        Ok(ParsedValue::sequence(
            vec![top, right, bottom, left],
            Converter::BorderPaint,
        ))
    }

    /// <dash-style> [phase <number>] [centered | inside | outside]
    /// [line-join miter <number> | bevel | round]
    /// [line-cap butt | round | square]
    fn border_style(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        let mut index = 0;
        let dashes = match &seq[0] {
            Term::Call { name, .. }
                if name.text.trim_end_matches('(').eq_ignore_ascii_case("segments") =>
            {
                index += 1;
                self.term_value(&seq[0])?
            }
            term => {
                let style = term.ident().map(str::to_lowercase).ok_or_else(|| {
                    CssError::expected("<border-style>", term_text(term), term.location())
                })?;
                match style.as_str() {
                    "none" | "solid" | "dotted" | "dashed" => {
                        index += 1;
                        ParsedValue::string(style, Converter::String)
                    }
                    "double" | "groove" | "ridge" | "inset" | "outset" => {
                        return Err(CssError::invalid_value(
                            format!("Unsupported border style '{}'", style),
                            term.location(),
                        ));
                    }
                    _ => {
                        return Err(CssError::invalid_value(
                            format!("Invalid border style '{}'", style),
                            term.location(),
                        ));
                    }
                }
            }
        };

        let mut phase = ParsedValue::null();
        let mut stroke_type = ParsedValue::null();
        let mut line_join = ParsedValue::null();
        let mut miter_limit = ParsedValue::null();
        let mut line_cap = ParsedValue::null();

        while index < seq.len() {
            let term = &seq[index];
            let word = term.ident().map(str::to_lowercase).ok_or_else(|| {
                CssError::unexpected_token(term_text(term), term.location())
            })?;
            match word.as_str() {
                "phase" => {
                    index += 1;
                    let number = seq.get(index).ok_or_else(|| {
                        CssError::invalid_value("Expected phase value", term.location())
                    })?;
                    phase = ParsedValue::size(self.size(number)?);
                    index += 1;
                }
                "centered" | "inside" | "outside" => {
                    stroke_type = ParsedValue::string(word, Converter::StrokeType);
                    index += 1;
                }
                "line-join" => {
                    index += 1;
                    let join = seq
                        .get(index)
                        .and_then(Term::ident)
                        .map(str::to_lowercase);
                    match join.as_deref() {
                        Some("miter") => {
                            line_join =
                                ParsedValue::string("miter", Converter::StrokeLineJoin);
                            index += 1;
                            if let Some(Some(token)) = seq.get(index).map(Term::token) {
                                if token.kind == TokenKind::Number {
                                    miter_limit =
                                        ParsedValue::size(Size::from_token(token)?);
                                    index += 1;
                                }
                            }
                        }
                        Some("bevel") => {
                            line_join =
                                ParsedValue::string("bevel", Converter::StrokeLineJoin);
                            index += 1;
                        }
                        Some("round") => {
                            line_join =
                                ParsedValue::string("round", Converter::StrokeLineJoin);
                            index += 1;
                        }
                        _ => {
                            return Err(CssError::invalid_value(
                                "Expected miter, bevel or round after 'line-join'",
                                term.location(),
                            ));
                        }
                    }
                }
                "line-cap" => {
                    index += 1;
                    let cap = seq
                        .get(index)
                        .and_then(Term::ident)
                        .map(str::to_lowercase);
                    match cap.as_deref() {
                        Some("butt") | Some("round") | Some("square") => {
                            line_cap = ParsedValue::string(
                                cap.unwrap_or_default(),
                                Converter::StrokeLineCap,
                            );
                            index += 1;
                        }
                        _ => {
                            return Err(CssError::invalid_value(
                                "Expected butt, round or square after 'line-cap'",
                                term.location(),
                            ));
                        }
                    }
                }
                _ => {
                    return Err(CssError::unexpected_token(word, term.location()));
                }
            }
        }

        Ok(ParsedValue::sequence(
            vec![dashes, phase, stroke_type, line_join, miter_limit, line_cap],
            Converter::BorderStyle,
        ))
    }

    /// 1-4 horizontal radii, optionally '/' and 1-4 vertical radii. Each
    /// corner becomes a [horizontal, vertical] pair; a zero radius in
    /// either direction squares the corner.
    fn corner_radii(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        let split = seq
            .iter()
            .position(|t| matches!(t.token(), Some(tok) if tok.kind == TokenKind::Solidus));
        let (h_terms, v_terms) = match split {
            Some(i) => (&seq[..i], &seq[i + 1..]),
            None => (seq, &seq[..0]),
        };

        let horizontal = self.sizes(h_terms)?;
        if horizontal.is_empty() || horizontal.len() > 4 {
            return Err(CssError::invalid_value(
                format!("Expected 1 to 4 radii, found {}", horizontal.len()),
                seq[0].location(),
            ));
        }
        let vertical = if v_terms.is_empty() {
            horizontal.clone()
        } else {
            let vertical = self.sizes(v_terms)?;
            if vertical.is_empty() || vertical.len() > 4 {
                return Err(CssError::invalid_value(
                    format!("Expected 1 to 4 radii, found {}", vertical.len()),
                    seq[0].location(),
                ));
            }
            vertical
        };

        let h = expand_corners(&horizontal);
        let v = expand_corners(&vertical);
        let mut corners = Vec::with_capacity(4);
        for i in 0..4 {
            let (mut hr, mut vr) = (h[i], v[i]);
            if hr.value == 0.0 || vr.value == 0.0 {
                hr = Size::px(0.0);
                vr = Size::px(0.0);
            }
            corners.push(ParsedValue::sequence(
                vec![ParsedValue::size(hr), ParsedValue::size(vr)],
                Converter::CornerRadii,
            ));
        }
        Ok(ParsedValue::sequence(corners, Converter::CornerRadii))
    }

    /// Position keywords and sizes reduced to a [horizontal, vertical]
    /// offset pair from the left and top edges.
    fn background_position(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if seq.len() > 2 {
            return Err(CssError::invalid_value(
                "Expected at most 2 position components",
                seq[2].location(),
            ));
        }
        let mut horizontal: Option<Size> = None;
        let mut vertical: Option<Size> = None;
        for term in seq {
            if let Some(word) = term.ident() {
                match word.to_lowercase().as_str() {
                    "left" => set_position(&mut horizontal, Size::percent(0.0), term)?,
                    "right" => set_position(&mut horizontal, Size::percent(100.0), term)?,
                    "top" => set_position(&mut vertical, Size::percent(0.0), term)?,
                    "bottom" => set_position(&mut vertical, Size::percent(100.0), term)?,
                    "center" => {
                        if horizontal.is_none() {
                            horizontal = Some(Size::percent(50.0));
                        } else {
                            set_position(&mut vertical, Size::percent(50.0), term)?;
                        }
                    }
                    other => {
                        return Err(CssError::invalid_value(
                            format!("Invalid position '{}'", other),
                            term.location(),
                        ));
                    }
                }
            } else {
                let size = self.size(term)?;
                if horizontal.is_none() {
                    horizontal = Some(size);
                } else {
                    set_position(&mut vertical, size, term)?;
                }
            }
        }
        let h = horizontal.unwrap_or(Size::percent(50.0));
        let v = vertical.unwrap_or(Size::percent(50.0));
        Ok(ParsedValue::sequence(
            vec![ParsedValue::size(h), ParsedValue::size(v)],
            Converter::BackgroundPosition,
        ))
    }

    /// cover | contain | [<size> | auto]{1,2}
    fn background_size(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if seq.len() == 1 {
            match seq[0].ident().map(str::to_lowercase).as_deref() {
                Some("cover") => {
                    return Ok(ParsedValue::string("cover", Converter::BackgroundSize));
                }
                Some("contain") => {
                    return Ok(ParsedValue::string("contain", Converter::BackgroundSize));
                }
                Some("stretch") => {
                    return Ok(ParsedValue::string("stretch", Converter::BackgroundSize));
                }
                _ => {}
            }
        }
        if seq.len() > 2 {
            return Err(CssError::invalid_value(
                "Expected at most 2 size components",
                seq[2].location(),
            ));
        }
        let mut dims = Vec::with_capacity(2);
        for term in seq {
            if term.is_ident("auto") {
                dims.push(ParsedValue::null());
            } else {
                dims.push(ParsedValue::size(self.size(term)?));
            }
        }
        while dims.len() < 2 {
            dims.push(ParsedValue::null());
        }
        Ok(ParsedValue::sequence(dims, Converter::BackgroundSize))
    }

    /// repeat-x | repeat-y | [repeat | space | round | stretch |
    /// no-repeat]{1,2}, reduced to an [x, y] keyword pair
    fn repeat_style(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        let mut words = Vec::with_capacity(seq.len());
        for term in seq {
            match term.ident() {
                Some(word) => words.push((word.to_lowercase(), term)),
                None => {
                    return Err(CssError::expected(
                        "<repeat-style>",
                        term_text(term),
                        term.location(),
                    ));
                }
            }
        }

        let valid = |w: &str| {
            matches!(w, "repeat" | "space" | "round" | "stretch" | "no-repeat")
        };
        let (x, y) = match words.as_slice() {
            [(word, _)] if word.as_str() == "repeat-x" => {
                ("repeat".to_string(), "no-repeat".to_string())
            }
            [(word, _)] if word.as_str() == "repeat-y" => {
                ("no-repeat".to_string(), "repeat".to_string())
            }
            [(word, term)] => {
                if !valid(word) {
                    return Err(CssError::invalid_value(
                        format!("Invalid repeat style '{}'", word),
                        term.location(),
                    ));
                }
                (word.clone(), word.clone())
            }
            [(first, first_term), (second, second_term)] => {
                if !valid(first) {
                    return Err(CssError::invalid_value(
                        format!("Invalid repeat style '{}'", first),
                        first_term.location(),
                    ));
                }
                if !valid(second) {
                    return Err(CssError::invalid_value(
                        format!("Invalid repeat style '{}'", second),
                        second_term.location(),
                    ));
                }
                (first.clone(), second.clone())
            }
            _ => {
                return Err(CssError::invalid_value(
                    "Expected 1 or 2 repeat styles",
                    seq[0].location(),
                ));
            }
        };
        Ok(ParsedValue::sequence(
            vec![
                ParsedValue::string(x, Converter::String),
                ParsedValue::string(y, Converter::String),
            ],
            Converter::RepeatStyle,
        ))
    }

    /// 1-4 slice sizes with an optional trailing 'fill'
    fn border_image_slice(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        let (size_terms, fill) = match seq.last() {
            Some(term) if term.is_ident("fill") => (&seq[..seq.len() - 1], true),
            _ => (seq, false),
        };
        let sizes = self.sizes(size_terms)?;
        if sizes.is_empty() || sizes.len() > 4 {
            return Err(CssError::invalid_value(
                format!("Expected 1 to 4 slice sizes, found {}", sizes.len()),
                seq[0].location(),
            ));
        }
        let [top, right, bottom, left] = expand_sides(&sizes);
        Ok(ParsedValue::sequence(
            vec![
                ParsedValue::size(top),
                ParsedValue::size(right),
                ParsedValue::size(bottom),
                ParsedValue::size(left),
                ParsedValue::boolean(fill),
            ],
            Converter::BorderImageSlice,
        ))
    }

    fn keyword(
        &self,
        seq: &[Term],
        allowed: &[&str],
        converter: Converter,
    ) -> CssResult<ParsedValue> {
        if seq.len() != 1 {
            return Err(CssError::invalid_value(
                "Expected a single keyword",
                seq[0].location(),
            ));
        }
        let word = seq[0].ident().map(str::to_lowercase).ok_or_else(|| {
            CssError::expected("<keyword>", term_text(&seq[0]), seq[0].location())
        })?;
        if !allowed.contains(&word.as_str()) {
            return Err(CssError::invalid_value(
                format!("Invalid value '{}'", word),
                seq[0].location(),
            ));
        }
        Ok(ParsedValue::string(word, converter))
    }

    fn ident_string(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if seq.len() != 1 {
            return Err(CssError::invalid_value(
                "Expected a single keyword",
                seq[0].location(),
            ));
        }
        match seq[0].ident() {
            Some(word) => Ok(ParsedValue::string(word.to_lowercase(), Converter::String)),
            None => Err(CssError::expected(
                "<keyword>",
                term_text(&seq[0]),
                seq[0].location(),
            )),
        }
    }

    fn font_family(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        let family = self.family_name(seq)?;
        Ok(ParsedValue::string(family, Converter::FontFamily))
    }

    fn family_name(&self, seq: &[Term]) -> CssResult<String> {
        if seq.len() == 1 {
            if let Some(token) = seq[0].token() {
                if token.kind == TokenKind::String {
                    return Ok(strip_quotes(&token.text).to_string());
                }
            }
        }
        let mut words = Vec::with_capacity(seq.len());
        for term in seq {
            match term.ident() {
                Some(word) => words.push(word),
                None => {
                    return Err(CssError::expected(
                        "<font-family>",
                        term_text(term),
                        term.location(),
                    ));
                }
            }
        }
        Ok(words.join(" "))
    }

    fn font_size(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if seq.len() != 1 {
            return Err(CssError::invalid_value(
                "Expected a single font size",
                seq[0].location(),
            ));
        }
        let size = self.font_size_value(&seq[0])?;
        Ok(ParsedValue::new(Payload::Size(size), Converter::FontSize))
    }

    /// A font size: a size literal or one of the CSS keyword sizes, which
    /// map to percentages of the inherited size.
    fn font_size_value(&self, term: &Term) -> CssResult<Size> {
        if let Some(word) = term.ident() {
            let percent = match word.to_lowercase().as_str() {
                "xx-small" => 60.0,
                "x-small" => 70.0,
                "small" | "smaller" => 80.0,
                "medium" => 100.0,
                "large" | "larger" => 120.0,
                "x-large" => 150.0,
                "xx-large" => 200.0,
                _ => {
                    return Err(CssError::invalid_value(
                        format!("Invalid font size '{}'", word),
                        term.location(),
                    ));
                }
            };
            return Ok(Size::percent(percent));
        }
        self.size(term)
    }

    fn font_style(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if seq.len() != 1 {
            return Err(CssError::invalid_value(
                "Expected a single font style",
                seq[0].location(),
            ));
        }
        let word = seq[0].ident().map(str::to_lowercase).ok_or_else(|| {
            CssError::expected("<font-style>", term_text(&seq[0]), seq[0].location())
        })?;
        let style = match word.as_str() {
            "normal" => "normal",
            // oblique renders as italic
            "italic" | "oblique" => "italic",
            _ => {
                return Err(CssError::invalid_value(
                    format!("Invalid font style '{}'", word),
                    seq[0].location(),
                ));
            }
        };
        Ok(ParsedValue::string(style, Converter::FontStyle))
    }

    fn font_weight(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if seq.len() != 1 {
            return Err(CssError::invalid_value(
                "Expected a single font weight",
                seq[0].location(),
            ));
        }
        self.font_weight_value(&seq[0])
    }

    fn font_weight_value(&self, term: &Term) -> CssResult<ParsedValue> {
        if let Some(token) = term.token() {
            if token.kind == TokenKind::Number {
                let value = Size::from_token(token)?.value;
                if (100.0..=900.0).contains(&value) && value % 100.0 == 0.0 {
                    return Ok(ParsedValue::string(
                        token.text.clone(),
                        Converter::FontWeight,
                    ));
                }
                return Err(CssError::invalid_value(
                    format!("Invalid font weight '{}'", token.text),
                    token.location,
                ));
            }
        }
        let word = term.ident().map(str::to_lowercase).ok_or_else(|| {
            CssError::expected("<font-weight>", term_text(term), term.location())
        })?;
        let weight = match word.as_str() {
            "normal" => "normal",
            "bold" | "bolder" => "bold",
            "lighter" | "light" => "light",
            _ => {
                return Err(CssError::invalid_value(
                    format!("Invalid font weight '{}'", word),
                    term.location(),
                ));
            }
        };
        Ok(ParsedValue::string(weight, Converter::FontWeight))
    }

    /// Font shorthand: [<style> || <weight>] <size> [/ <line-height>]
    /// <family>. Line height is accepted and dropped.
    fn font(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        let mut style: Option<ParsedValue> = None;
        let mut weight: Option<ParsedValue> = None;
        let mut index = 0;

        while index < seq.len() {
            let Some(word) = seq[index].ident().map(str::to_lowercase) else {
                break;
            };
            match word.as_str() {
                "italic" | "oblique" if style.is_none() => {
                    style = Some(ParsedValue::string("italic", Converter::FontStyle));
                    index += 1;
                }
                "bold" | "bolder" if weight.is_none() => {
                    weight = Some(ParsedValue::string("bold", Converter::FontWeight));
                    index += 1;
                }
                "lighter" if weight.is_none() => {
                    weight = Some(ParsedValue::string("light", Converter::FontWeight));
                    index += 1;
                }
                // normal style and weight are the defaults anyway
                "normal" => index += 1,
                // accepted for compatibility, not rendered
                "small-caps" => index += 1,
                _ => break,
            }
        }

        let size_location = seq[seq.len() - 1].location();
        if index >= seq.len() {
            return Err(CssError::invalid_value("Expected font size", size_location));
        }
        let size = self.font_size_value(&seq[index])?;
        index += 1;

        if let Some(Some(token)) = seq.get(index).map(Term::token) {
            if token.kind == TokenKind::Solidus {
                index += 1;
                match seq.get(index) {
                    Some(term) => {
                        let _ = self.font_size_value(term)?;
                        log::warn!("line-height in the font shorthand is ignored");
                        index += 1;
                    }
                    None => {
                        return Err(CssError::invalid_value(
                            "Expected line height after '/'",
                            token.location,
                        ));
                    }
                }
            }
        }

        if index >= seq.len() {
            return Err(CssError::invalid_value("Expected font family", size_location));
        }
        let family = self.family_name(&seq[index..])?;

        Ok(ParsedValue::sequence(
            vec![
                ParsedValue::string(family, Converter::FontFamily),
                ParsedValue::new(Payload::Size(size), Converter::FontSize),
                weight.unwrap_or_else(|| ParsedValue::string("normal", Converter::FontWeight)),
                style.unwrap_or_else(|| ParsedValue::string("normal", Converter::FontStyle)),
            ],
            Converter::Font,
        ))
    }

    /// Fallback resolution for properties without a dedicated handler
    fn generic(&self, expr: &Expr) -> CssResult<ParsedValue> {
        if expr.layers.len() > 1 {
            let mut values = Vec::with_capacity(expr.layers.len());
            for seq in &expr.layers {
                values.push(self.generic_seq(self.nonempty(seq)?)?);
            }
            return Ok(ParsedValue::sequence(values, Converter::None));
        }
        self.generic_seq(self.layer(expr)?)
    }

    fn generic_seq(&self, seq: &[Term]) -> CssResult<ParsedValue> {
        if let Some(first) = seq.first() {
            if first.is_ident("linear") && seq.len() > 1 {
                return self.deprecated_linear_gradient(seq);
            }
            if first.is_ident("radial") && seq.len() > 1 {
                return self.deprecated_radial_gradient(seq);
            }
            if first.is_ident("ladder") && seq.len() > 1 {
                return self.deprecated_ladder(seq);
            }
        }
        if seq.len() == 1 {
            return self.term_value(&seq[0]);
        }
        // a run of sizes is a size series
        if seq
            .iter()
            .all(|t| matches!(t.token(), Some(tok) if tok.kind.is_size()))
        {
            return self.size_series(seq);
        }
        let mut values = Vec::with_capacity(seq.len());
        for term in seq {
            values.push(self.term_value(term)?);
        }
        Ok(ParsedValue::sequence(values, Converter::None))
    }
}

fn single_term(expr: &Expr) -> Option<&Term> {
    match expr.layers.as_slice() {
        [seq] if seq.len() == 1 => Some(&seq[0]),
        _ => None,
    }
}

fn term_text(term: &Term) -> &str {
    match term {
        Term::Leaf(token) => &token.text,
        Term::Call { name, .. } => &name.text,
    }
}

fn expand_sides(sizes: &[Size]) -> [Size; 4] {
    let top = sizes[0];
    let right = *sizes.get(1).unwrap_or(&top);
    let bottom = *sizes.get(2).unwrap_or(&top);
    let left = *sizes.get(3).unwrap_or(&right);
    [top, right, bottom, left]
}

fn expand_corners(sizes: &[Size]) -> [Size; 4] {
    // top-left, top-right, bottom-right, bottom-left
    let tl = sizes[0];
    let tr = *sizes.get(1).unwrap_or(&tl);
    let br = *sizes.get(2).unwrap_or(&tl);
    let bl = *sizes.get(3).unwrap_or(&tr);
    [tl, tr, br, bl]
}

fn set_position(slot: &mut Option<Size>, value: Size, term: &Term) -> CssResult<()> {
    if slot.is_some() {
        return Err(CssError::invalid_value(
            "Duplicate position component",
            term.location(),
        ));
    }
    *slot = Some(value);
    Ok(())
}

fn url_value(url: String) -> ParsedValue {
    ParsedValue::sequence(
        vec![
            ParsedValue::string(url, Converter::String),
            ParsedValue::null(),
        ],
        Converter::Url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CssParser;

    fn resolve(property: &str, value: &str) -> ParsedValue {
        let _ = env_logger::builder().is_test(true).try_init();
        let input = format!("{}: {};", property, value);
        let mut parser = CssParser::new(&input);
        let sheet = parser.parse_inline_style();
        assert!(
            parser.errors().is_empty(),
            "unexpected errors for '{}': {:?}",
            input,
            parser.errors()
        );
        sheet.rules[0].declarations[0].value.clone()
    }

    fn resolve_err(property: &str, value: &str) -> CssError {
        let input = format!("{}: {};", property, value);
        let mut parser = CssParser::new(&input);
        let sheet = parser.parse_inline_style();
        assert!(
            sheet.rules.is_empty(),
            "expected '{}' to fail, got {:?}",
            input,
            sheet.rules
        );
        parser.take_errors().remove(0)
    }

    fn stop_offset(stop: &ParsedValue) -> f32 {
        stop.as_sequence().unwrap()[0].as_size().unwrap().value
    }

    #[test]
    fn test_rgb_channels_normalized() {
        let value = resolve("-fx-fill", "rgb(255, 0, 0)");
        assert_eq!(value.as_color(), Some(Color::rgb(1.0, 0.0, 0.0)));

        let value = resolve("-fx-fill", "rgb(100%, 0%, 50%)");
        assert_eq!(value.as_color(), Some(Color::rgb(1.0, 0.0, 0.5)));

        // out-of-range channels and alpha clamp
        let value = resolve("-fx-fill", "rgba(300, 0, 0, 2)");
        assert_eq!(value.as_color(), Some(Color::rgba(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_rgb_rejects_mixed_channels() {
        let err = resolve_err("-fx-fill", "rgb(255, 50%, 0)");
        assert!(matches!(err, CssError::InvalidValue { .. }));
    }

    #[test]
    fn test_hsb() {
        let value = resolve("-fx-fill", "hsb(120, 100%, 100%)");
        let color = value.as_color().unwrap();
        assert!(color.r.abs() < 0.01 && (color.g - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_hex_and_0x_colors() {
        let value = resolve("-fx-fill", "#00ff00");
        assert_eq!(value.as_color(), Some(Color::rgb(0.0, 1.0, 0.0)));

        let value = resolve("-fx-fill", "0xff0000ff");
        assert_eq!(value.as_color(), Some(Color::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_padding_single_size() {
        let value = resolve("-fx-padding", "5px");
        let sides = value.as_sequence().unwrap();
        assert_eq!(sides.len(), 4);
        for side in sides {
            assert_eq!(side.as_size(), Some(Size::px(5.0)));
        }
    }

    #[test]
    fn test_padding_three_sizes() {
        let value = resolve("-fx-padding", "1px 2px 3px");
        let sides = value.as_sequence().unwrap();
        assert_eq!(sides[0].as_size(), Some(Size::px(1.0)));
        assert_eq!(sides[1].as_size(), Some(Size::px(2.0)));
        assert_eq!(sides[2].as_size(), Some(Size::px(3.0)));
        // left falls back to right
        assert_eq!(sides[3].as_size(), Some(Size::px(2.0)));
    }

    #[test]
    fn test_single_layer_keeps_sequence_shape() {
        // consumers rely on the layer wrapper being there with or without
        // a comma
        let value = resolve("-fx-background-color", "red");
        assert_eq!(value.converter, Converter::PaintSequence);
        let layers = value.as_sequence().unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].as_color(), Some(Color::rgb(1.0, 0.0, 0.0)));

        let value = resolve("-fx-background-insets", "1px 2px");
        assert_eq!(value.converter, Converter::InsetsSequence);
        assert_eq!(value.as_sequence().unwrap().len(), 1);
    }

    #[test]
    fn test_opaque_insets_rejects_layers() {
        let value = resolve("-fx-opaque-insets", "1px 2px");
        assert_eq!(value.converter, Converter::Insets);
        assert_eq!(value.as_sequence().unwrap().len(), 4);

        let err = resolve_err("-fx-opaque-insets", "1px, 2px");
        assert!(matches!(err, CssError::InvalidValue { .. }));
    }

    #[test]
    fn test_border_color_expansion() {
        let value = resolve("-fx-border-color", "red blue");
        assert_eq!(value.converter, Converter::BorderPaintSequence);
        let layers = value.as_sequence().unwrap();
        assert_eq!(layers.len(), 1);
        let sides = layers[0].as_sequence().unwrap();
        assert_eq!(sides[0].as_color(), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(sides[1].as_color(), Some(Color::rgb(0.0, 0.0, 1.0)));
        assert_eq!(sides[2].as_color(), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(sides[3].as_color(), Some(Color::rgb(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_corner_radii() {
        let value = resolve("-fx-background-radius", "5px");
        assert_eq!(value.converter, Converter::CornerRadiiSequence);
        let corners = value.as_sequence().unwrap()[0].as_sequence().unwrap();
        assert_eq!(corners.len(), 4);
        let pair = corners[0].as_sequence().unwrap();
        assert_eq!(pair[0].as_size(), Some(Size::px(5.0)));
        assert_eq!(pair[1].as_size(), Some(Size::px(5.0)));
    }

    #[test]
    fn test_corner_radii_zero_squares_the_corner() {
        let value = resolve("-fx-background-radius", "0 5px / 4px 4px");
        let corners = value.as_sequence().unwrap()[0].as_sequence().unwrap();
        // top-left horizontal is 0, so both directions collapse
        let tl = corners[0].as_sequence().unwrap();
        assert_eq!(tl[0].as_size(), Some(Size::px(0.0)));
        assert_eq!(tl[1].as_size(), Some(Size::px(0.0)));
        let tr = corners[1].as_sequence().unwrap();
        assert_eq!(tr[0].as_size(), Some(Size::px(5.0)));
        assert_eq!(tr[1].as_size(), Some(Size::px(4.0)));
    }

    #[test]
    fn test_linear_gradient_to_top() {
        let value = resolve("-fx-fill", "linear-gradient(to top, red, blue)");
        assert_eq!(value.converter, Converter::LinearGradient);
        let parts = value.as_sequence().unwrap();
        // start y is 100%, end y is 0%
        assert_eq!(parts[1].as_size(), Some(Size::percent(100.0)));
        assert_eq!(parts[3].as_size(), Some(Size::percent(0.0)));
        assert_eq!(parts[4].as_str(), Some("no-cycle"));
        assert_eq!(parts.len(), 7);
        assert!((stop_offset(&parts[5]) - 0.0).abs() < 1e-6);
        assert!((stop_offset(&parts[6]) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_stop_offsets_never_decrease() {
        let value = resolve("-fx-fill", "linear-gradient(red, green 30%, blue 20%, white)");
        let parts = value.as_sequence().unwrap();
        let offsets: Vec<f32> = parts[5..].iter().map(stop_offset).collect();
        assert_eq!(offsets, vec![0.0, 30.0, 30.0, 100.0]);
    }

    #[test]
    fn test_stop_offsets_interpolated() {
        let value = resolve("-fx-fill", "linear-gradient(red, green, blue)");
        let parts = value.as_sequence().unwrap();
        let offsets: Vec<f32> = parts[5..].iter().map(stop_offset).collect();
        assert_eq!(offsets, vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_stop_units_cannot_mix() {
        let err = resolve_err("-fx-fill", "linear-gradient(red 10px, blue 50%)");
        assert!(matches!(err, CssError::InvalidValue { .. }));
    }

    #[test]
    fn test_radial_gradient() {
        let value = resolve(
            "-fx-fill",
            "radial-gradient(center 25% 25%, radius 10px, reflect, red, blue)",
        );
        assert_eq!(value.converter, Converter::RadialGradient);
        let parts = value.as_sequence().unwrap();
        assert_eq!(parts[0].payload, Payload::Null);
        assert_eq!(parts[2].as_size(), Some(Size::percent(25.0)));
        assert_eq!(parts[4].as_size(), Some(Size::px(10.0)));
        assert_eq!(parts[5].as_str(), Some("reflect"));
    }

    #[test]
    fn test_radial_gradient_requires_radius() {
        let err = resolve_err("-fx-fill", "radial-gradient(red, blue)");
        assert!(matches!(err, CssError::InvalidValue { .. }));
    }

    #[test]
    fn test_deprecated_linear_gradient() {
        let value = resolve(
            "-fx-fill",
            "linear (0%,0%) to (100%,100%) stops (0%,red) (100%,blue)",
        );
        assert_eq!(value.converter, Converter::LinearGradient);
        let parts = value.as_sequence().unwrap();
        assert_eq!(parts[2].as_size(), Some(Size::percent(100.0)));
        assert_eq!(parts[5].converter, Converter::Stop);
    }

    #[test]
    fn test_deprecated_ladder() {
        let value = resolve("-fx-text-fill", "ladder gray stops (0.49,white) (0.50,black)");
        assert_eq!(value.converter, Converter::Ladder);
        let parts = value.as_sequence().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].converter, Converter::Stop);
    }

    #[test]
    fn test_ladder() {
        let value = resolve("-fx-text-fill", "ladder(gray, white 49%, black 50%)");
        assert_eq!(value.converter, Converter::Ladder);
        let parts = value.as_sequence().unwrap();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].as_color().is_some());
    }

    #[test]
    fn test_dropshadow() {
        let value = resolve("-fx-effect", "dropshadow(gaussian, black, 10, 0.5, 0, 0)");
        assert_eq!(value.converter, Converter::Effect);
        let parts = value.as_sequence().unwrap();
        assert_eq!(parts.len(), 7);
        assert_eq!(parts[0].as_str(), Some("dropshadow"));
        assert_eq!(parts[1].as_str(), Some("gaussian"));
        assert_eq!(parts[3].as_size(), Some(Size::px(10.0)));
    }

    #[test]
    fn test_invalid_blur_type() {
        let err = resolve_err("-fx-effect", "dropshadow(fuzzy, black, 10, 0.5, 0, 0)");
        assert!(matches!(err, CssError::InvalidValue { .. }));
    }

    #[test]
    fn test_font_shorthand() {
        let value = resolve("-fx-font", "bold italic 12px 'Open Sans'");
        assert_eq!(value.converter, Converter::Font);
        let parts = value.as_sequence().unwrap();
        assert_eq!(parts[0].as_str(), Some("Open Sans"));
        assert_eq!(parts[1].as_size(), Some(Size::px(12.0)));
        assert_eq!(parts[2].as_str(), Some("bold"));
        assert_eq!(parts[3].as_str(), Some("italic"));
    }

    #[test]
    fn test_bare_font_property_is_shorthand() {
        let value = resolve("font", "12px serif");
        assert_eq!(value.converter, Converter::Font);
        let parts = value.as_sequence().unwrap();
        assert_eq!(parts[0].as_str(), Some("serif"));
        assert_eq!(parts[1].as_size(), Some(Size::px(12.0)));
    }

    #[test]
    fn test_font_size_keywords() {
        let value = resolve("-fx-font-size", "x-large");
        assert_eq!(value.as_size(), Some(Size::percent(150.0)));
    }

    #[test]
    fn test_font_weight() {
        assert_eq!(resolve("-fx-font-weight", "700").as_str(), Some("700"));
        assert_eq!(resolve("-fx-font-weight", "bolder").as_str(), Some("bold"));
        let err = resolve_err("-fx-font-weight", "750");
        assert!(matches!(err, CssError::InvalidValue { .. }));
    }

    #[test]
    fn test_font_style_oblique() {
        assert_eq!(resolve("-fx-font-style", "oblique").as_str(), Some("italic"));
    }

    #[test]
    fn test_border_style() {
        let value = resolve(
            "-fx-border-style",
            "dashed phase 3 centered line-join miter 5 line-cap round",
        );
        assert_eq!(value.converter, Converter::BorderStyleSequence);
        let parts = value.as_sequence().unwrap()[0].as_sequence().unwrap();
        assert_eq!(parts[0].as_str(), Some("dashed"));
        assert_eq!(parts[1].as_size(), Some(Size::px(3.0)));
        assert_eq!(parts[2].as_str(), Some("centered"));
        assert_eq!(parts[3].as_str(), Some("miter"));
        assert_eq!(parts[4].as_size(), Some(Size::px(5.0)));
        assert_eq!(parts[5].as_str(), Some("round"));
    }

    #[test]
    fn test_unsupported_border_style() {
        let err = resolve_err("-fx-border-style", "groove");
        assert!(matches!(err, CssError::InvalidValue { .. }));
    }

    #[test]
    fn test_background_position() {
        let value = resolve("-fx-background-position", "right bottom");
        let pair = value.as_sequence().unwrap()[0].as_sequence().unwrap();
        assert_eq!(pair[0].as_size(), Some(Size::percent(100.0)));
        assert_eq!(pair[1].as_size(), Some(Size::percent(100.0)));

        let value = resolve("-fx-background-position", "center");
        let pair = value.as_sequence().unwrap()[0].as_sequence().unwrap();
        assert_eq!(pair[0].as_size(), Some(Size::percent(50.0)));
        assert_eq!(pair[1].as_size(), Some(Size::percent(50.0)));
    }

    #[test]
    fn test_background_repeat() {
        let value = resolve("-fx-background-repeat", "repeat-x");
        let pair = value.as_sequence().unwrap()[0].as_sequence().unwrap();
        assert_eq!(pair[0].as_str(), Some("repeat"));
        assert_eq!(pair[1].as_str(), Some("no-repeat"));
    }

    #[test]
    fn test_background_size() {
        let value = resolve("-fx-background-size", "cover");
        assert_eq!(value.converter, Converter::BackgroundSizeSequence);
        assert_eq!(value.as_sequence().unwrap()[0].as_str(), Some("cover"));

        let value = resolve("-fx-background-size", "100% auto");
        let pair = value.as_sequence().unwrap()[0].as_sequence().unwrap();
        assert_eq!(pair[0].as_size(), Some(Size::percent(100.0)));
        assert_eq!(pair[1].payload, Payload::Null);
    }

    #[test]
    fn test_border_image_slice_fill() {
        let value = resolve("-fx-border-image-slice", "10 20 fill");
        let parts = value.as_sequence().unwrap()[0].as_sequence().unwrap();
        assert_eq!(parts[0].as_size(), Some(Size::px(10.0)));
        assert_eq!(parts[1].as_size(), Some(Size::px(20.0)));
        assert_eq!(parts[2].as_size(), Some(Size::px(10.0)));
        assert_eq!(parts[3].as_size(), Some(Size::px(20.0)));
        assert_eq!(parts[4].payload, Payload::Boolean(true));
    }

    #[test]
    fn test_url_layers() {
        let value = resolve("-fx-background-image", "url('a.png'), url('b.png')");
        assert_eq!(value.converter, Converter::UrlSequence);
        let layers = value.as_sequence().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].converter, Converter::Url);
        assert_eq!(layers[0].as_sequence().unwrap()[0].as_str(), Some("a.png"));
    }

    #[test]
    fn test_url_fill_becomes_image_pattern() {
        let value = resolve("-fx-fill", "url('tile.png')");
        assert_eq!(value.converter, Converter::ImagePattern);
    }

    #[test]
    fn test_none_and_inherit() {
        let value = resolve("-fx-border-style", "none");
        assert_eq!(value.payload, Payload::Null);

        let value = resolve("-fx-text-fill", "inherit");
        assert_eq!(value.as_str(), Some("inherit"));
    }

    #[test]
    fn test_infinity() {
        let value = resolve("-fx-max-width", "infinity");
        assert_eq!(value.as_size(), Some(Size::px(f32::MAX)));
    }

    #[test]
    fn test_stroke_dash_array() {
        let value = resolve("-fx-stroke-dash-array", "5 10");
        assert_eq!(value.converter, Converter::SizeSequence);
        assert_eq!(value.as_sequence().unwrap().len(), 2);
    }

    #[test]
    fn test_stroke_keywords() {
        assert_eq!(
            resolve("-fx-stroke-line-cap", "SQUARE").as_str(),
            Some("square")
        );
        let err = resolve_err("-fx-stroke-line-cap", "pointy");
        assert!(matches!(err, CssError::InvalidValue { .. }));
    }
}
