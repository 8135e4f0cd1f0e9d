//! Unit conversion utilities
//!
//! Document geometry is always expressed in points (1/72 inch). Users
//! enter spacing and margins in their display unit; these helpers convert
//! to and from points. Inch input also accepts fractions ("1 1/4").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

const MM_PER_INCH: f64 = 25.4;

/// Length unit selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// PostScript points (document native)
    Points,
    /// Picas (12 points)
    Picas,
    /// Inches
    Inches,
    /// Millimeters
    Millimeters,
    /// Centimeters
    Centimeters,
    /// Pixels at 72 ppi
    Pixels,
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Points
    }
}

impl LengthUnit {
    /// Number of points in one unit
    pub fn points_per_unit(self) -> f64 {
        match self {
            Self::Points | Self::Pixels => 1.0,
            Self::Picas => 12.0,
            Self::Inches => POINTS_PER_INCH,
            Self::Millimeters => POINTS_PER_INCH / MM_PER_INCH,
            Self::Centimeters => POINTS_PER_INCH / MM_PER_INCH * 10.0,
        }
    }

    /// Convert a value in this unit to points
    pub fn to_points(self, value: f64) -> f64 {
        value * self.points_per_unit()
    }

    /// Convert a value in points to this unit
    pub fn from_points(self, value_pt: f64) -> f64 {
        value_pt / self.points_per_unit()
    }

    /// Short label used next to input fields
    pub fn label(self) -> &'static str {
        match self {
            Self::Points => "pt",
            Self::Picas => "pc",
            Self::Inches => "in",
            Self::Millimeters => "mm",
            Self::Centimeters => "cm",
            Self::Pixels => "px",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points => write!(f, "Points"),
            Self::Picas => write!(f, "Picas"),
            Self::Inches => write!(f, "Inches"),
            Self::Millimeters => write!(f, "Millimeters"),
            Self::Centimeters => write!(f, "Centimeters"),
            Self::Pixels => write!(f, "Pixels"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "points" | "point" | "pt" => Ok(Self::Points),
            "picas" | "pica" | "pc" => Ok(Self::Picas),
            "inches" | "inch" | "in" => Ok(Self::Inches),
            "millimeters" | "millimetres" | "mm" => Ok(Self::Millimeters),
            "centimeters" | "centimetres" | "cm" => Ok(Self::Centimeters),
            "pixels" | "pixel" | "px" => Ok(Self::Pixels),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Format a length for display
///
/// * `value_pt` - Value in points
/// * `unit` - Target display unit
pub fn format_length(value_pt: f64, unit: LengthUnit) -> String {
    format!("{:.3}", unit.from_points(value_pt))
}

/// Parse a length string to points
///
/// * `input` - String to parse
/// * `unit` - Assumed unit of the input
pub fn parse_length(input: &str, unit: LengthUnit) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    let value = if unit == LengthUnit::Inches && input.contains('/') {
        let mut total = 0.0;
        for part in input.split_whitespace() {
            if let Some((num, den)) = part.split_once('/') {
                let num = num.parse::<f64>().map_err(|_| "Invalid numerator")?;
                let den = den.parse::<f64>().map_err(|_| "Invalid denominator")?;
                if den == 0.0 {
                    return Err("Division by zero".to_string());
                }
                total += num / den;
            } else {
                total += part.parse::<f64>().map_err(|_| "Invalid number part")?;
            }
        }
        total
    } else {
        input.parse::<f64>().map_err(|e| e.to_string())?
    };

    if !value.is_finite() {
        return Err(format!("Length must be finite: {}", input));
    }

    Ok(unit.to_points(value))
}
