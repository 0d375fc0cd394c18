//! Generator model catalog
//!
//! Represents the generator models offered for sale: brand, fuel type,
//! rated power, price, and stock on hand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GeneratorId;

/// Fuel type of a generator model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FuelType {
    Diesel,
    Gasoline,
    NaturalGas,
    Propane,
    Solar,
}

impl FuelType {
    /// Parse fuel type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "diesel" => Some(Self::Diesel),
            "gasoline" | "gas" | "petrol" => Some(Self::Gasoline),
            "natural-gas" | "natural_gas" | "naturalgas" | "ng" => Some(Self::NaturalGas),
            "propane" | "lpg" => Some(Self::Propane),
            "solar" => Some(Self::Solar),
            _ => None,
        }
    }
}

impl Default for FuelType {
    fn default() -> Self {
        Self::Diesel
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diesel => write!(f, "Diesel"),
            Self::Gasoline => write!(f, "Gasoline"),
            Self::NaturalGas => write!(f, "Natural Gas"),
            Self::Propane => write!(f, "Propane"),
            Self::Solar => write!(f, "Solar"),
        }
    }
}

/// A generator model in the sales catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorModel {
    /// Unique identifier
    pub id: GeneratorId,

    /// Model name (e.g., "PowerMax 7500E")
    pub name: String,

    /// Manufacturer brand
    pub brand: String,

    /// Fuel type
    pub fuel: FuelType,

    /// Rated output in kilowatts
    pub power_kw: f64,

    /// List price in cents
    pub price_cents: i64,

    /// Units in stock
    pub stock: u32,

    /// Marketing description
    #[serde(default)]
    pub description: String,

    /// Whether this model is archived (no longer sold)
    pub archived: bool,

    /// When the catalog entry was created
    pub created_at: DateTime<Utc>,

    /// When the catalog entry was last modified
    pub updated_at: DateTime<Utc>,
}

impl GeneratorModel {
    /// Create a new catalog entry
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        fuel: FuelType,
        power_kw: f64,
        price_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: GeneratorId::new(),
            name: name.into(),
            brand: brand.into(),
            fuel,
            power_kw,
            price_cents,
            stock: 0,
            description: String::new(),
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the record as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the catalog entry
    pub fn validate(&self) -> Result<(), GeneratorValidationError> {
        if self.name.trim().is_empty() {
            return Err(GeneratorValidationError::EmptyName);
        }

        if self.brand.trim().is_empty() {
            return Err(GeneratorValidationError::EmptyBrand);
        }

        if !self.power_kw.is_finite() || self.power_kw <= 0.0 {
            return Err(GeneratorValidationError::InvalidPower(self.power_kw));
        }

        if self.price_cents < 0 {
            return Err(GeneratorValidationError::NegativePrice(self.price_cents));
        }

        Ok(())
    }
}

impl fmt::Display for GeneratorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({} kW, {})", self.brand, self.name, self.power_kw, self.fuel)
    }
}

/// Validation errors for generator models
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorValidationError {
    EmptyName,
    EmptyBrand,
    InvalidPower(f64),
    NegativePrice(i64),
}

impl fmt::Display for GeneratorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Model name cannot be empty"),
            Self::EmptyBrand => write!(f, "Brand cannot be empty"),
            Self::InvalidPower(kw) => write!(f, "Rated power must be positive, got {}", kw),
            Self::NegativePrice(cents) => write!(f, "Price cannot be negative, got {}", cents),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_type_parse() {
        assert_eq!(FuelType::parse("diesel"), Some(FuelType::Diesel));
        assert_eq!(FuelType::parse("natural-gas"), Some(FuelType::NaturalGas));
        assert_eq!(FuelType::parse("LPG"), Some(FuelType::Propane));
        assert_eq!(FuelType::parse("steam"), None);
    }

    #[test]
    fn test_new_model_validates() {
        let model = GeneratorModel::new("PowerMax 7500E", "Volta", FuelType::Diesel, 7.5, 129_900);
        assert!(model.validate().is_ok());
        assert!(!model.archived);
        assert_eq!(model.stock, 0);
    }

    #[test]
    fn test_invalid_power_rejected() {
        let mut model = GeneratorModel::new("X", "Volta", FuelType::Diesel, 0.0, 100);
        assert!(matches!(
            model.validate(),
            Err(GeneratorValidationError::InvalidPower(_))
        ));

        model.power_kw = f64::NAN;
        assert!(matches!(
            model.validate(),
            Err(GeneratorValidationError::InvalidPower(_))
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let model = GeneratorModel::new("X", "Volta", FuelType::Solar, 3.0, -1);
        assert_eq!(
            model.validate(),
            Err(GeneratorValidationError::NegativePrice(-1))
        );
    }

    #[test]
    fn test_fuel_serde_kebab_case() {
        let json = serde_json::to_string(&FuelType::NaturalGas).unwrap();
        assert_eq!(json, "\"natural-gas\"");
    }
}
