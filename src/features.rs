//! Feature derivation for model inputs.
//!
//! Turns the attributes picked on the form into the 15-column record the
//! regressor was fit on. Column order and naming follow the training frame:
//!
//! `Company, TypeName, Inches, Ram, Weight, Touchscreen, Ips, X_res, Y_res,
//! ppi, Cpu brand, HDD, SSD, Gpu brand, os`
//!
//! **Critical for correctness**: the order here must match the training
//! pipeline exactly. The schema loaded alongside the model is checked against
//! [`FEATURE_COLUMNS`] so a reordered artifact fails at load instead of
//! silently mispredicting.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fields in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 15;

/// Whether a column carries a raw category string or a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Category,
    Number,
}

/// Name and kind of one position in the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureColumn {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn category(name: &'static str) -> FeatureColumn {
    FeatureColumn {
        name,
        kind: ColumnKind::Category,
    }
}

const fn number(name: &'static str) -> FeatureColumn {
    FeatureColumn {
        name,
        kind: ColumnKind::Number,
    }
}

/// Training-frame column layout, in model input order.
pub const FEATURE_COLUMNS: [FeatureColumn; FEATURE_COUNT] = [
    category("Company"),
    category("TypeName"),
    number("Inches"),
    number("Ram"),
    number("Weight"),
    number("Touchscreen"),
    number("Ips"),
    number("X_res"),
    number("Y_res"),
    number("ppi"),
    category("Cpu brand"),
    number("HDD"),
    number("SSD"),
    category("Gpu brand"),
    category("os"),
];

/// A "Yes"/"No" form selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Both selections, in the order the form lists them.
    pub fn all() -> [YesNo; 2] {
        [YesNo::No, YesNo::Yes]
    }

    /// Numeric flag fed to the model: Yes → 1, No → 0.
    pub fn as_flag(self) -> u8 {
        match self {
            YesNo::Yes => 1,
            YesNo::No => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

impl FromStr for YesNo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Yes" => Ok(YesNo::Yes),
            "No" => Ok(YesNo::No),
            _ => Err(Error::Parse {
                what: "yes/no selection",
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse a `WIDTHxHEIGHT` token such as `1920x1080`.
    ///
    /// Fails with [`Error::Parse`] unless there is exactly one `x` and both
    /// sides are non-empty runs of ASCII digits that fit in a `u32`.
    pub fn parse(token: &str) -> Result<Self> {
        let malformed = || Error::Parse {
            what: "resolution",
            input: token.to_string(),
        };

        let mut parts = token.split('x');
        let (width, height) = match (parts.next(), parts.next(), parts.next()) {
            (Some(w), Some(h), None) => (w, h),
            _ => return Err(malformed()),
        };

        let side = |s: &str| -> Option<u32> {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            s.parse().ok()
        };

        match (side(width), side(height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(malformed()),
        }
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Resolution::parse(s)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Attributes picked on the form, before derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpec {
    pub brand: String,
    pub form_factor: String,
    /// Weight in kilograms
    pub weight: f64,
    /// RAM in GB
    pub ram: u32,
    /// HDD size in GB, 0 when absent
    pub hdd: u32,
    /// SSD size in GB, 0 when absent
    pub ssd: u32,
    pub touchscreen: YesNo,
    pub ips: YesNo,
    /// Diagonal in inches
    pub screen_size: f64,
    pub resolution: Resolution,
    pub cpu_brand: String,
    pub gpu_brand: String,
    pub os: String,
}

/// One cell of the flattened feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Category(&'a str),
    Number(f64),
}

impl FeatureValue<'_> {
    pub fn kind(&self) -> ColumnKind {
        match self {
            FeatureValue::Category(_) => ColumnKind::Category,
            FeatureValue::Number(_) => ColumnKind::Number,
        }
    }
}

/// Model input record with named fields, in training-frame order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub company: String,
    pub type_name: String,
    pub inches: f64,
    pub ram: u32,
    pub weight: f64,
    pub touchscreen: u8,
    pub ips: u8,
    pub x_res: u32,
    pub y_res: u32,
    pub ppi: f64,
    pub cpu_brand: String,
    pub hdd: u32,
    pub ssd: u32,
    pub gpu_brand: String,
    pub os: String,
}

impl FeatureVector {
    /// Flat ordered view; position `i` is described by `FEATURE_COLUMNS[i]`.
    pub fn values(&self) -> [FeatureValue<'_>; FEATURE_COUNT] {
        [
            FeatureValue::Category(&self.company),
            FeatureValue::Category(&self.type_name),
            FeatureValue::Number(self.inches),
            FeatureValue::Number(f64::from(self.ram)),
            FeatureValue::Number(self.weight),
            FeatureValue::Number(f64::from(self.touchscreen)),
            FeatureValue::Number(f64::from(self.ips)),
            FeatureValue::Number(f64::from(self.x_res)),
            FeatureValue::Number(f64::from(self.y_res)),
            FeatureValue::Number(self.ppi),
            FeatureValue::Category(&self.cpu_brand),
            FeatureValue::Number(f64::from(self.hdd)),
            FeatureValue::Number(f64::from(self.ssd)),
            FeatureValue::Category(&self.gpu_brand),
            FeatureValue::Category(&self.os),
        ]
    }
}

/// Pixels per inch along the diagonal.
///
/// `screen_inches` must be positive; the form's slider bounds guarantee it.
pub fn pixel_density(width: u32, height: u32, screen_inches: f64) -> f64 {
    let w = f64::from(width);
    let h = f64::from(height);
    (w * w + h * h).sqrt() / screen_inches
}

/// Derive the model input record from form selections.
pub fn derive_features(spec: &RawSpec) -> FeatureVector {
    let Resolution { width, height } = spec.resolution;

    FeatureVector {
        company: spec.brand.clone(),
        type_name: spec.form_factor.clone(),
        inches: spec.screen_size,
        ram: spec.ram,
        weight: spec.weight,
        touchscreen: spec.touchscreen.as_flag(),
        ips: spec.ips.as_flag(),
        x_res: width,
        y_res: height,
        ppi: pixel_density(width, height, spec.screen_size),
        cpu_brand: spec.cpu_brand.clone(),
        hdd: spec.hdd,
        ssd: spec.ssd,
        gpu_brand: spec.gpu_brand.clone(),
        os: spec.os.clone(),
    }
}
