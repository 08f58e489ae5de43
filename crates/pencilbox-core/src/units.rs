//! Unit conversion utilities
//!
//! Box dimensions are entered in inches while every internal computation
//! runs in millimetres. Supports decimal and fractional inch parsing
//! ("5 1/2", "3/4") and formatting in either system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    Metric,
    /// Imperial system (inches)
    #[default]
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Convert inches to millimetres.
#[inline]
pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Convert millimetres to inches.
#[inline]
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Format a length stored in mm for display in the given system.
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.2}", value_mm),
        MeasurementSystem::Imperial => format!("{:.3}", mm_to_inches(value_mm)),
    }
}

/// Parse an inch quantity, accepting decimals and mixed fractions.
///
/// `"5"`, `"5.5"`, `"5 1/2"` and `"1/4"` are all accepted. The result is in inches.
pub fn parse_inches(input: &str) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty length".to_string());
    }

    if !input.contains('/') {
        return input.parse::<f64>().map_err(|e| e.to_string());
    }

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
    Ok(total)
}

/// Parse a length string in the given system and return millimetres.
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64, String> {
    match system {
        MeasurementSystem::Metric => {
            let input = input.trim();
            if input.is_empty() {
                return Err("Empty length".to_string());
            }
            input.parse::<f64>().map_err(|e| e.to_string())
        }
        MeasurementSystem::Imperial => parse_inches(input).map(inches_to_mm),
    }
}

/// Get unit label for display
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_metric_passthrough() {
        assert_eq!(format_length(10.5, MeasurementSystem::Metric), "10.50");
        assert!(approx(
            parse_length("10.5", MeasurementSystem::Metric).unwrap(),
            10.5
        ));
    }

    #[test]
    fn test_imperial_decimal() {
        assert_eq!(format_length(25.4, MeasurementSystem::Imperial), "1.000");
        assert!(approx(
            parse_length("1", MeasurementSystem::Imperial).unwrap(),
            25.4
        ));
        assert!(approx(
            parse_length("0.5", MeasurementSystem::Imperial).unwrap(),
            12.7
        ));
    }

    #[test]
    fn test_imperial_fraction() {
        assert!(approx(parse_inches("1 1/2").unwrap(), 1.5));
        assert!(approx(
            parse_length("5 1/8", MeasurementSystem::Imperial).unwrap(),
            130.175
        ));
        assert!(approx(
            parse_length("1/4", MeasurementSystem::Imperial).unwrap(),
            6.35
        ));
    }

    #[test]
    fn test_round_trip_conversion() {
        for inches in [0.25, 1.0, 6.0, 18.0] {
            assert!(approx(mm_to_inches(inches_to_mm(inches)), inches));
        }
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(get_unit_label(MeasurementSystem::Metric), "mm");
        assert_eq!(get_unit_label(MeasurementSystem::Imperial), "in");
    }

    #[test]
    fn test_measurement_system_from_str() {
        assert_eq!("MM".parse::<MeasurementSystem>(), Ok(MeasurementSystem::Metric));
        assert_eq!("in".parse::<MeasurementSystem>(), Ok(MeasurementSystem::Imperial));
        assert!("furlongs".parse::<MeasurementSystem>().is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(parse_inches("").is_err());
        assert!(parse_inches("abc").is_err());
        assert!(parse_inches("1/0").is_err());
        assert!(parse_inches("1/x").is_err());
    }
}
