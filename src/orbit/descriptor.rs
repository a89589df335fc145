//! Orbit descriptor text format.
//!
//! A descriptor names one orbital shell as four colon-separated fields:
//!
//! ```text
//! altitude:inclination:planes:satellites
//! 800:53:10:20    # 800 km, 53°, 10 planes of 20 satellites each
//! ```
//!
//! Parsing is all-or-nothing; a wrong delimiter, a missing field or a field
//! that is not a number fails the whole descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur while parsing a descriptor
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    #[error("Expected ':' after {field}, found '{found}'")]
    WrongDelimiter { field: &'static str, found: char },
    #[error("Missing {0} field")]
    MissingField(&'static str),
    #[error("Invalid {field} value '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Unexpected trailing input '{0}'")]
    TrailingInput(String),
}

/// One orbital shell: altitude in km, inclination in degrees, plane and
/// per-plane satellite counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrbitDescriptor {
    pub altitude_km: f64,
    pub inclination_deg: f64,
    pub planes: u32,
    pub satellites: u32,
}

impl OrbitDescriptor {
    pub fn new(altitude_km: f64, inclination_deg: f64, planes: u32, satellites: u32) -> Self {
        Self {
            altitude_km,
            inclination_deg,
            planes,
            satellites,
        }
    }

    /// Total number of satellites in the shell.
    pub fn total_satellites(&self) -> u64 {
        u64::from(self.planes) * u64::from(self.satellites)
    }
}

impl fmt::Display for OrbitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.altitude_km, self.inclination_deg, self.planes, self.satellites
        )
    }
}

/// Reads fields off the front of a descriptor string.
struct FieldReader<'a> {
    rest: &'a str,
}

impl<'a> FieldReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            rest: input.trim_start(),
        }
    }

    /// Take the numeric text of the next field.
    fn field(&mut self, name: &'static str) -> Result<&'a str, DescriptorError> {
        self.rest = self.rest.trim_start();
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
            .unwrap_or(self.rest.len());
        let (text, rest) = self.rest.split_at(end);
        if text.is_empty() {
            return match rest.chars().next() {
                None => Err(DescriptorError::MissingField(name)),
                Some(_) => Err(DescriptorError::InvalidNumber {
                    field: name,
                    value: rest.to_string(),
                }),
            };
        }
        self.rest = rest;
        Ok(text)
    }

    fn delimiter(&mut self, after: &'static str) -> Result<(), DescriptorError> {
        let mut chars = self.rest.trim_start().chars();
        match chars.next() {
            Some(':') => {
                self.rest = chars.as_str();
                Ok(())
            }
            Some(found) => Err(DescriptorError::WrongDelimiter { field: after, found }),
            None => Err(DescriptorError::MissingField(next_field(after))),
        }
    }

    fn finish(self) -> Result<(), DescriptorError> {
        let rest = self.rest.trim_end();
        if rest.is_empty() {
            Ok(())
        } else {
            Err(DescriptorError::TrailingInput(rest.to_string()))
        }
    }
}

fn next_field(after: &'static str) -> &'static str {
    match after {
        "altitude" => "inclination",
        "inclination" => "planes",
        _ => "satellites",
    }
}

fn parse_number<T: FromStr>(field: &'static str, text: &str) -> Result<T, DescriptorError> {
    text.parse().map_err(|_| DescriptorError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

impl FromStr for OrbitDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut reader = FieldReader::new(s);

        let altitude_km = parse_number("altitude", reader.field("altitude")?)?;
        reader.delimiter("altitude")?;
        let inclination_deg = parse_number("inclination", reader.field("inclination")?)?;
        reader.delimiter("inclination")?;
        let planes = parse_number("planes", reader.field("planes")?)?;
        reader.delimiter("planes")?;
        let satellites = parse_number("satellites", reader.field("satellites")?)?;
        reader.finish()?;

        Ok(Self {
            altitude_km,
            inclination_deg,
            planes,
            satellites,
        })
    }
}

impl TryFrom<String> for OrbitDescriptor {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrbitDescriptor> for String {
    fn from(descriptor: OrbitDescriptor) -> Self {
        descriptor.to_string()
    }
}
