use super::projection::{Projection, TransverseMercator};
use crate::error::InputShapeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate reference systems with a built-in implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Crs {
    /// EPSG:4326, `(lon, lat)` in degrees.
    Wgs84Geographic,
    /// EPSG:3006.
    Sweref99Tm,
    /// EPSG:32601..=32660 (north) and EPSG:32701..=32760 (south).
    Utm { zone: u8, north: bool },
}

impl Crs {
    pub fn from_epsg(code: u32) -> Result<Self, InputShapeError> {
        match code {
            4326 => Ok(Crs::Wgs84Geographic),
            3006 => Ok(Crs::Sweref99Tm),
            32601..=32660 => Ok(Crs::Utm {
                zone: (code - 32600) as u8,
                north: true,
            }),
            32701..=32760 => Ok(Crs::Utm {
                zone: (code - 32700) as u8,
                north: false,
            }),
            _ => Err(InputShapeError::UnsupportedCrs(code)),
        }
    }

    pub fn epsg(&self) -> u32 {
        match *self {
            Crs::Wgs84Geographic => 4326,
            Crs::Sweref99Tm => 3006,
            Crs::Utm { zone, north: true } => 32600 + u32::from(zone),
            Crs::Utm { zone, north: false } => 32700 + u32::from(zone),
        }
    }

    pub fn is_projected(&self) -> bool {
        !matches!(self, Crs::Wgs84Geographic)
    }

    /// Projection from WGS84 geographic coordinates, `None` for the
    /// geographic system itself.
    pub fn projection(&self) -> Option<Box<dyn Projection>> {
        match *self {
            Crs::Wgs84Geographic => None,
            Crs::Sweref99Tm => Some(Box::new(TransverseMercator::sweref99_tm())),
            Crs::Utm { zone, north } => Some(Box::new(TransverseMercator::utm(zone, north))),
        }
    }
}

impl TryFrom<u32> for Crs {
    type Error = InputShapeError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Crs::from_epsg(code)
    }
}

impl From<Crs> for u32 {
    fn from(crs: Crs) -> u32 {
        crs.epsg()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}
