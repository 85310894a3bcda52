//! Page margins and page geometry.
use crate::units::{to_native_unit, Twips, A4_HEIGHT, PAGE_WIDTH};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Page margins in centimetres.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 3.0,
            right: 2.0,
            bottom: 2.5,
            left: 2.0,
        }
    }
}

impl Margins {
    pub fn all(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Parse a length with optional unit ("2cm", "15mm", "2"); bare numbers are centimetres.
    fn parse_length(input: &str) -> Result<f64, String> {
        let input = input.trim();
        if let Some(val) = input.strip_suffix("cm") {
            return val
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("Invalid number: {}", e));
        }
        if let Some(val) = input.strip_suffix("mm") {
            return val
                .trim()
                .parse::<f64>()
                .map(|v| v / 10.0)
                .map_err(|e| format!("Invalid number: {}", e));
        }
        input
            .parse::<f64>()
            .map_err(|e| format!("Invalid number: {}", e))
    }

    /// Parse CSS-style margin shorthand (1, 2, or 4 values)
    fn parse_shorthand(input: &str) -> Result<Self, String> {
        let values = input
            .split_whitespace()
            .map(Self::parse_length)
            .collect::<Result<Vec<_>, _>>()?;

        match values.len() {
            1 => Ok(Margins::all(values[0])),
            2 => Ok(Margins {
                top: values[0],
                right: values[1],
                bottom: values[0],
                left: values[1],
            }),
            4 => Ok(Margins {
                top: values[0],
                right: values[1],
                bottom: values[2],
                left: values[3],
            }),
            _ => Err(format!(
                "Invalid margin shorthand: expected 1, 2, or 4 values, got {}",
                values.len()
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarginsVisitor;
        impl<'de> de::Visitor<'de> for MarginsVisitor {
            type Value = Margins;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string like '2cm' or '3cm 2cm' or a map")
            }

            fn visit_str<E>(self, value: &str) -> Result<Margins, E>
            where
                E: de::Error,
            {
                Margins::parse_shorthand(value).map_err(E::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Margins, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut margins = Margins::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => margins.top = map.next_value()?,
                        "right" => margins.right = map.next_value()?,
                        "bottom" => margins.bottom = map.next_value()?,
                        "left" => margins.left = map.next_value()?,
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                Ok(margins)
            }
        }
        deserializer.deserialize_any(MarginsVisitor)
    }
}

/// Resolved A4 page geometry, all values in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: Twips,
    pub height: Twips,
    pub margin_top: Twips,
    pub margin_right: Twips,
    pub margin_bottom: Twips,
    pub margin_left: Twips,
    pub header_distance: Twips,
    pub footer_distance: Twips,
}

impl PageGeometry {
    pub fn a4(margins: &Margins, header_distance_cm: f64, footer_distance_cm: f64) -> Self {
        Self {
            width: PAGE_WIDTH,
            height: A4_HEIGHT,
            margin_top: to_native_unit(margins.top),
            margin_right: to_native_unit(margins.right),
            margin_bottom: to_native_unit(margins.bottom),
            margin_left: to_native_unit(margins.left),
            header_distance: to_native_unit(header_distance_cm),
            footer_distance: to_native_unit(footer_distance_cm),
        }
    }

    /// Width available between the left and right body margins.
    pub fn body_width(&self) -> Twips {
        self.width - self.margin_left - self.margin_right
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4(&Margins::default(), 1.0, 0.5)
    }
}
