use crate::ast::{
    ArenaDecl, BallDecl, DetectorDecl, DetectorKind, PhysicsDecl, Scenario, SimulateDecl,
};
use crate::config::CollisionModel;
use crate::diagnostics::Span;
use glam::DVec2;
use thiserror::Error;

/// Parse error with optional span information
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{message}")]
    SyntaxError {
        message: String,
        span: Option<Span>,
    },
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::SyntaxError {
            message: message.into(),
            span,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::SyntaxError {
            message: message.into(),
            span: None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::SyntaxError { span, .. } => *span,
        }
    }
}

/// Helper to track byte offsets while parsing
struct ParseContext {
    line_offsets: Vec<usize>, // Byte offset of start of each line
    len: usize,
}

impl ParseContext {
    fn new(source: &str) -> Self {
        let mut line_offsets = vec![0];
        let mut offset = 0;
        for ch in source.chars() {
            offset += ch.len_utf8();
            if ch == '\n' {
                line_offsets.push(offset);
            }
        }
        Self {
            line_offsets,
            len: source.len(),
        }
    }

    /// Get byte offset for start of line (0-indexed)
    fn line_start(&self, line: usize) -> usize {
        self.line_offsets.get(line).copied().unwrap_or(self.len)
    }

    /// Create a span for the entire line
    fn full_line_span(&self, line: usize) -> Span {
        Span::new(self.line_start(line), self.line_start(line + 1))
    }
}

/// Parse a scenario from source text
pub fn parse_scenario(source: &str) -> Result<Scenario, ParseError> {
    let ctx = ParseContext::new(source);
    let mut arena = None;
    let mut balls = Vec::new();
    let mut physics = PhysicsDecl::default();
    let mut simulate = None;
    let mut detectors = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        let line = raw.trim();
        let span = Some(ctx.full_line_span(i));

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let keyword = line.split_whitespace().next().unwrap_or("");
        match keyword {
            "arena" => {
                if arena.is_some() {
                    return Err(ParseError::new("Duplicate 'arena' declaration", span));
                }
                arena = Some(parse_arena(line, span)?);
            }
            "ball" => balls.push(parse_ball(line, span)?),
            "gravity" => physics.gravity = Some(parse_gravity(line, span)?),
            "margin" => physics.margin = Some(parse_margin(line, span)?),
            "collision" => {
                let (model, cooldown) = parse_collision(line, span)?;
                physics.model = Some(model);
                if cooldown.is_some() {
                    physics.cooldown = cooldown;
                }
            }
            "simulate" => {
                if simulate.is_some() {
                    return Err(ParseError::new("Duplicate 'simulate' declaration", span));
                }
                simulate = Some(parse_simulate(line, span)?);
            }
            "detect" => detectors.push(parse_detector(line, span)?),
            _ => {
                return Err(ParseError::new(
                    format!("Unexpected token: {}", keyword),
                    span,
                ));
            }
        }
    }

    let arena = arena.ok_or_else(|| ParseError::message("Missing 'arena' declaration"))?;
    let simulate =
        simulate.ok_or_else(|| ParseError::message("Missing 'simulate' declaration"))?;

    Ok(Scenario {
        arena,
        balls,
        physics,
        simulate,
        detectors,
    })
}

/// Parse an arena declaration: `arena width = w height = h`
fn parse_arena(line: &str, span: Option<Span>) -> Result<ArenaDecl, ParseError> {
    let rest = line
        .strip_prefix("arena ")
        .ok_or_else(|| ParseError::new("Expected 'arena' keyword", span))?;

    let width = parse_number(value_after(rest, "width", line, span)?, span)?;
    let height = parse_number(value_after(rest, "height", line, span)?, span)?;

    Ok(ArenaDecl {
        width,
        height,
        span,
    })
}

/// Parse a ball declaration:
/// `ball name at (x, y) [vel (vx, vy)] radius r [color c]`
fn parse_ball(line: &str, span: Option<Span>) -> Result<BallDecl, ParseError> {
    let rest = line
        .strip_prefix("ball ")
        .ok_or_else(|| ParseError::new("Expected 'ball' keyword", span))?;

    let at_pos = rest.find(" at ").ok_or_else(|| {
        ParseError::new(format!("Expected 'at' in ball declaration: {}", line), span)
    })?;

    let name = rest[..at_pos].trim().to_string();
    if !is_valid_identifier(&name) {
        return Err(ParseError::new(format!("Invalid ball name '{}'", name), span));
    }

    let (position, rest) = parse_pair(&rest[at_pos + 4..], "position", line, span)?;

    let rest = rest.trim_start();
    let (velocity, rest) = match rest.strip_prefix("vel ") {
        Some(after) => parse_pair(after, "velocity", line, span)?,
        None => (DVec2::ZERO, rest),
    };

    let mut tokens = rest.split_whitespace();
    let mut radius = None;
    let mut color = None;
    while let Some(token) = tokens.next() {
        let value = tokens.next().ok_or_else(|| {
            ParseError::new(format!("Expected value after '{}': {}", token, line), span)
        })?;
        match token {
            "radius" => radius = Some(parse_number(value, span)?),
            "color" => color = Some(value.to_string()),
            other => {
                return Err(ParseError::new(
                    format!("Unexpected '{}' in ball declaration: {}", other, line),
                    span,
                ));
            }
        }
    }

    let radius = radius.ok_or_else(|| {
        ParseError::new(
            format!("Expected 'radius' in ball declaration: {}", line),
            span,
        )
    })?;

    Ok(BallDecl {
        name,
        position,
        velocity,
        radius,
        color,
        span,
    })
}

/// Parse a gravity override: `gravity g = value`
fn parse_gravity(line: &str, span: Option<Span>) -> Result<f64, ParseError> {
    let rest = line
        .strip_prefix("gravity ")
        .ok_or_else(|| ParseError::new("Expected 'gravity' keyword", span))?;
    parse_number(value_after(rest, "g", line, span)?, span)
}

/// Parse a collision margin override: `margin value`
fn parse_margin(line: &str, span: Option<Span>) -> Result<f64, ParseError> {
    let rest = line
        .strip_prefix("margin ")
        .ok_or_else(|| ParseError::new("Expected 'margin' keyword", span))?;
    parse_number(rest.trim(), span)
}

/// Parse collision settings: `collision model = name [cooldown = value]`
fn parse_collision(
    line: &str,
    span: Option<Span>,
) -> Result<(CollisionModel, Option<f64>), ParseError> {
    let rest = line
        .strip_prefix("collision ")
        .ok_or_else(|| ParseError::new("Expected 'collision' keyword", span))?;

    let model_name = value_after(rest, "model", line, span)?;
    let model = CollisionModel::from_name(model_name).ok_or_else(|| {
        ParseError::new(format!("Unknown collision model '{}'", model_name), span)
    })?;

    let cooldown = if rest.split_whitespace().any(|t| t == "cooldown") {
        Some(parse_number(value_after(rest, "cooldown", line, span)?, span)?)
    } else {
        None
    };

    Ok((model, cooldown))
}

/// Parse simulation settings: `simulate dt = x steps = n`
fn parse_simulate(line: &str, span: Option<Span>) -> Result<SimulateDecl, ParseError> {
    let rest = line
        .strip_prefix("simulate ")
        .ok_or_else(|| ParseError::new("Expected 'simulate' keyword", span))?;

    let dt = parse_number(value_after(rest, "dt", line, span)?, span)?;
    let steps_str = value_after(rest, "steps", line, span)?;
    let steps = steps_str.parse::<usize>().map_err(|_| {
        ParseError::new(
            format!("Expected a non-negative integer step count, got '{}'", steps_str),
            span,
        )
    })?;

    Ok(SimulateDecl { dt, steps, span })
}

/// Parse a detector declaration: `detect name = kind(args)[.axis]`
fn parse_detector(line: &str, span: Option<Span>) -> Result<DetectorDecl, ParseError> {
    let rest = line
        .strip_prefix("detect ")
        .ok_or_else(|| ParseError::new("Expected 'detect' keyword", span))?;

    let eq_pos = rest
        .find(" = ")
        .ok_or_else(|| ParseError::new(format!("Expected '=' in detector: {}", line), span))?;

    let name = rest[..eq_pos].trim().to_string();
    let rest = rest[eq_pos + 3..].trim();

    let open = rest
        .find('(')
        .ok_or_else(|| ParseError::new(format!("Expected '(' in detector: {}", line), span))?;
    let close = rest
        .find(')')
        .ok_or_else(|| ParseError::new(format!("Expected ')' in detector: {}", line), span))?;
    if close < open {
        return Err(ParseError::new(format!("Malformed detector: {}", line), span));
    }

    let func = rest[..open].trim();
    let args: Vec<String> = rest[open + 1..close]
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();
    let suffix = rest[close + 1..].trim();

    let single = |args: Vec<String>| -> Result<String, ParseError> {
        match <[String; 1]>::try_from(args) {
            Ok([name]) if !name.is_empty() => Ok(name),
            _ => Err(ParseError::new(
                format!("Expected one ball name in '{}' detector: {}", func, line),
                span,
            )),
        }
    };

    let kind = match (func, suffix) {
        ("position", "" | ".x") => DetectorKind::PositionX(single(args)?),
        ("position", ".y") => DetectorKind::PositionY(single(args)?),
        ("velocity", ".x") => DetectorKind::VelocityX(single(args)?),
        ("velocity", ".y") => DetectorKind::VelocityY(single(args)?),
        ("speed", "") => DetectorKind::Speed(single(args)?),
        ("distance", "") => match <[String; 2]>::try_from(args) {
            Ok([a, b]) => DetectorKind::Distance { a, b },
            Err(_) => {
                return Err(ParseError::new(
                    format!("Expected two ball names in distance detector: {}", line),
                    span,
                ));
            }
        },
        _ => {
            return Err(ParseError::new(
                format!("Unknown detector type: {}", rest),
                span,
            ));
        }
    };

    Ok(DetectorDecl { name, kind, span })
}

/// Find `key = value` in `rest` and return the value token
fn value_after<'a>(
    rest: &'a str,
    key: &str,
    line: &str,
    span: Option<Span>,
) -> Result<&'a str, ParseError> {
    let tokens: Vec<&'a str> = rest.split_whitespace().collect();
    tokens
        .windows(3)
        .find(|w| w[0] == key && w[1] == "=")
        .map(|w| w[2])
        .ok_or_else(|| ParseError::new(format!("Expected '{} = <value>' in: {}", key, line), span))
}

/// Parse `(a, b)` at the start of `s`, returning the vector and the remainder
fn parse_pair<'a>(
    s: &'a str,
    what: &str,
    line: &str,
    span: Option<Span>,
) -> Result<(DVec2, &'a str), ParseError> {
    let s = s.trim_start();
    let inner_start = s
        .strip_prefix('(')
        .ok_or_else(|| ParseError::new(format!("Expected '(' in {}: {}", what, line), span))?;
    let end = inner_start
        .find(')')
        .ok_or_else(|| ParseError::new(format!("Expected ')' in {}: {}", what, line), span))?;

    let coords: Vec<&str> = inner_start[..end].split(',').map(|c| c.trim()).collect();
    if coords.len() != 2 {
        return Err(ParseError::new(
            format!("Expected two coordinates in {}: {}", what, line),
            span,
        ));
    }

    let x = parse_number(coords[0], span)?;
    let y = parse_number(coords[1], span)?;
    Ok((DVec2::new(x, y), &inner_start[end + 1..]))
}

fn parse_number(s: &str, span: Option<Span>) -> Result<f64, ParseError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::new(format!("Invalid number: {}", s.trim()), span))
}

/// Check if a string is a valid identifier
fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    // First char must be letter or underscore
    if !first.is_alphabetic() && first != '_' {
        return false;
    }

    // Rest must be alphanumeric or underscore
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
