use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{catalog::CATALOG, error::FieldError};

/// Declares a closed vocabulary whose serialized form is the word the
/// prediction service was trained on, alongside an English label.
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal, $label:literal;)+ }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_wire(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = FieldError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let raw = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| {
                        value.as_wire().eq_ignore_ascii_case(raw)
                            || value.label().eq_ignore_ascii_case(raw)
                    })
                    .ok_or_else(|| FieldError::UnknownValue {
                        field: $kind,
                        value: raw.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

wire_enum!(FuelType, "combustibil", {
    Petrol => "Benzina", "Petrol";
    Diesel => "Diesel", "Diesel";
    Hybrid => "Hibrid", "Hybrid";
    Electric => "Electrica", "Electric";
    Lpg => "GPL", "LPG";
});

wire_enum!(BodyType, "caroserie", {
    Sedan => "Berlina", "Sedan";
    Suv => "SUV", "SUV";
    Hatchback => "Hatchback", "Hatchback";
    Wagon => "Break", "Wagon";
    Coupe => "Coupe", "Coupe";
    Convertible => "Cabrio", "Convertible";
    Minivan => "Minibus", "Minivan";
    Pickup => "Pickup", "Pickup";
});

wire_enum!(Color, "culoare", {
    Black => "Negru", "Black";
    White => "Alb", "White";
    Gray => "Gri", "Gray";
    Silver => "Argintiu", "Silver";
    Red => "Rosu", "Red";
    Blue => "Albastru", "Blue";
});

wire_enum!(Transmission, "cutie_viteza", {
    Manual => "Manuala", "Manual";
    Automatic => "Automata", "Automatic";
});

/// Editable form fields, named on the wire by their request keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    Brand,
    Model,
    Year,
    MileageKm,
    PowerHp,
    EngineCc,
    FuelType,
    BodyType,
    Color,
    Transmission,
}

impl QueryField {
    pub const ALL: &'static [QueryField] = &[
        QueryField::Brand,
        QueryField::Model,
        QueryField::Year,
        QueryField::MileageKm,
        QueryField::PowerHp,
        QueryField::EngineCc,
        QueryField::FuelType,
        QueryField::BodyType,
        QueryField::Color,
        QueryField::Transmission,
    ];

    pub fn key(self) -> &'static str {
        match self {
            QueryField::Brand => "marca",
            QueryField::Model => "model",
            QueryField::Year => "an_fabricatie",
            QueryField::MileageKm => "rulaj",
            QueryField::PowerHp => "putere",
            QueryField::EngineCc => "capacitate_motor",
            QueryField::FuelType => "combustibil",
            QueryField::BodyType => "caroserie",
            QueryField::Color => "culoare",
            QueryField::Transmission => "cutie_viteza",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            QueryField::Year | QueryField::MileageKm | QueryField::PowerHp | QueryField::EngineCc
        )
    }
}

impl FromStr for QueryField {
    type Err = FieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key() == raw)
            .ok_or_else(|| FieldError::UnknownField(raw.to_string()))
    }
}

/// Form state sent as the body of a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleQuery {
    #[serde(rename = "marca")]
    pub brand: String,
    pub model: String,
    #[serde(rename = "an_fabricatie")]
    pub year: i64,
    #[serde(rename = "rulaj")]
    pub mileage_km: i64,
    #[serde(rename = "putere")]
    pub power_hp: i64,
    #[serde(rename = "capacitate_motor")]
    pub engine_cc: i64,
    #[serde(rename = "combustibil")]
    pub fuel_type: FuelType,
    #[serde(rename = "caroserie")]
    pub body_type: BodyType,
    #[serde(rename = "culoare")]
    pub color: Color,
    #[serde(rename = "cutie_viteza")]
    pub transmission: Transmission,
}

impl Default for VehicleQuery {
    fn default() -> Self {
        Self {
            brand: "volkswagen".into(),
            model: "Golf".into(),
            year: 2018,
            mileage_km: 120_000,
            power_hp: 110,
            engine_cc: 1600,
            fuel_type: FuelType::Diesel,
            body_type: BodyType::Hatchback,
            color: Color::Black,
            transmission: Transmission::Manual,
        }
    }
}

impl VehicleQuery {
    /// Switches brand, keeping the current model only when the new brand
    /// lists it. The brand/model invariant is maintained here and nowhere else.
    pub fn select_brand(&mut self, brand: &str) {
        let keep_model = CATALOG.contains(brand, &self.model);
        self.brand = brand.to_string();
        if !keep_model {
            self.model.clear();
        }
    }

    /// Applies raw form input to one field. Integer fields never fail; enum
    /// words and models outside the current brand are rejected without
    /// touching the query.
    pub fn apply_raw(&mut self, field: QueryField, raw: &str) -> Result<(), FieldError> {
        match field {
            QueryField::Brand => self.select_brand(raw),
            QueryField::Model => {
                if !raw.is_empty() && !CATALOG.contains(&self.brand, raw) {
                    return Err(FieldError::ModelNotInBrand {
                        brand: self.brand.clone(),
                        model: raw.to_string(),
                    });
                }
                self.model = raw.to_string();
            }
            QueryField::Year => self.year = coerce_integer(raw),
            QueryField::MileageKm => self.mileage_km = coerce_integer(raw),
            QueryField::PowerHp => self.power_hp = coerce_integer(raw),
            QueryField::EngineCc => self.engine_cc = coerce_integer(raw),
            QueryField::FuelType => self.fuel_type = raw.parse()?,
            QueryField::BodyType => self.body_type = raw.parse()?,
            QueryField::Color => self.color = raw.parse()?,
            QueryField::Transmission => self.transmission = raw.parse()?,
        }
        Ok(())
    }

    /// Checks a query built outside the form, such as one read from a file,
    /// against the catalog: a non-empty model must be offered for the brand.
    pub fn check_selection(&self) -> Result<(), FieldError> {
        if !self.model.is_empty() && !CATALOG.contains(&self.brand, &self.model) {
            return Err(FieldError::ModelNotInBrand {
                brand: self.brand.clone(),
                model: self.model.clone(),
            });
        }
        Ok(())
    }

    /// Brand, model and a non-zero year are the only fields checked locally.
    pub fn has_required_fields(&self) -> bool {
        !self.brand.is_empty() && !self.model.is_empty() && self.year != 0
    }
}

/// Numeric input coercion: blank is 0, fractions truncate, anything
/// unparseable is 0.
pub fn coerce_integer(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    if let Ok(value) = raw.parse::<i64>() {
        return value;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
