use std::fmt;
use std::str::FromStr;

use crate::error::VdsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundingBox {
    pub lat_min: String,
    pub lat_max: String,
    pub lon_max: String,
    pub lon_min: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub passwd: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Product(String);

impl Product {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Product {
    type Err = VdsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let is_valid = !trimmed.is_empty() && !trimmed.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(VdsError::InvalidProduct(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

pub fn parse_products(value: &str) -> Result<Vec<Product>, VdsError> {
    value
        .split(',')
        .map(|item| item.parse())
        .collect::<Result<Vec<_>, VdsError>>()
}

pub fn output_extension(format: &str) -> &'static str {
    if format.contains("NETCDF") { ".nc" } else { ".tif" }
}
