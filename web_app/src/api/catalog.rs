//! # Plan Catalog
//!
//! Fixed list of the plans sold online. Plans are defined at build time and
//! identified by the closed [PlanKey] enumeration, so an unknown key can only
//! show up at the parsing boundary (forms, configuration rows).

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of every purchasable plan. Declaration order is catalog order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanKey {
    #[display("PACIFICO_PISCINA")]
    PacificoPiscina,
    #[display("PACIFICO_PUENTES")]
    PacificoPuentes,
    #[display("TRAVESIA")]
    Travesia,
    #[display("PASADIA_INFANTIL")]
    PasadiaInfantil,
    #[display("NOCHE_MAWA")]
    NocheMawa,
    #[display("NOCHE_MAWA_INFANTIL")]
    NocheMawaInfantil,
}

impl PlanKey {
    pub const ALL: [PlanKey; 6] = [
        PlanKey::PacificoPiscina,
        PlanKey::PacificoPuentes,
        PlanKey::Travesia,
        PlanKey::PasadiaInfantil,
        PlanKey::NocheMawa,
        PlanKey::NocheMawaInfantil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKey::PacificoPiscina => "PACIFICO_PISCINA",
            PlanKey::PacificoPuentes => "PACIFICO_PUENTES",
            PlanKey::Travesia => "TRAVESIA",
            PlanKey::PasadiaInfantil => "PASADIA_INFANTIL",
            PlanKey::NocheMawa => "NOCHE_MAWA",
            PlanKey::NocheMawaInfantil => "NOCHE_MAWA_INFANTIL",
        }
    }
}

impl FromStr for PlanKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown plan key: {s}"))
    }
}

/// Who the plan is priced for. The web discount only applies to adults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[display("adulto")]
    Adulto,
    #[display("infantil")]
    Infantil,
}

/// Kind of visit, decides which calendar dates can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[display("pasadia")]
    Pasadia,
    #[display("alojamiento")]
    Alojamiento,
}

/// Static plan definition, prices in COP without minor units
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Plan {
    pub key: PlanKey,
    pub name: &'static str,
    pub description: &'static str,
    pub base_price: i64,
    pub category: Category,
    pub plan_type: PlanType,
    pub includes: &'static [&'static str],
    pub featured: bool,
    pub max_age: Option<u8>,
}

static BASE_PLANS: [Plan; 6] = [
    Plan {
        key: PlanKey::PacificoPiscina,
        name: "Pacífico - Piscina",
        description: "Disfruta de nuestras piscinas naturales con vista al río",
        base_price: 60_000,
        category: Category::Adulto,
        plan_type: PlanType::Pasadia,
        includes: &["Acceso a piscinas", "Zona de hamacas", "Parqueadero"],
        featured: false,
        max_age: None,
    },
    Plan {
        key: PlanKey::PacificoPuentes,
        name: "Pacífico - Puentes",
        description: "Aventura en los puentes colgantes sobre el río",
        base_price: 60_000,
        category: Category::Adulto,
        plan_type: PlanType::Pasadia,
        includes: &["Recorrido puentes", "Guía acompañante", "Parqueadero"],
        featured: false,
        max_age: None,
    },
    Plan {
        key: PlanKey::Travesia,
        name: "Travesía Completa",
        description: "La experiencia completa: piscinas + puentes + sendero ecológico",
        base_price: 70_000,
        category: Category::Adulto,
        plan_type: PlanType::Pasadia,
        includes: &[
            "Piscinas",
            "Puentes",
            "Sendero ecológico",
            "Guía",
            "Parqueadero",
        ],
        featured: true,
        max_age: None,
    },
    Plan {
        key: PlanKey::PasadiaInfantil,
        name: "Pasadía Infantil",
        description: "Piscina infantil y zona de juegos para los más pequeños",
        base_price: 35_000,
        category: Category::Infantil,
        plan_type: PlanType::Pasadia,
        includes: &["Piscina infantil", "Zona de juegos", "Refrigerio"],
        featured: false,
        max_age: Some(11),
    },
    Plan {
        key: PlanKey::NocheMawa,
        name: "Noche Mawa",
        description: "Pasa la noche junto al río con la Travesía incluida",
        base_price: 180_000,
        category: Category::Adulto,
        plan_type: PlanType::Alojamiento,
        includes: &[
            "Habitación compartida",
            "Cena y desayuno",
            "Travesía completa",
            "Parqueadero",
        ],
        featured: false,
        max_age: None,
    },
    Plan {
        key: PlanKey::NocheMawaInfantil,
        name: "Noche Mawa Infantil",
        description: "Alojamiento para niños acompañados por un adulto",
        base_price: 90_000,
        category: Category::Infantil,
        plan_type: PlanType::Alojamiento,
        includes: &["Cama en habitación familiar", "Cena y desayuno"],
        featured: false,
        max_age: Some(11),
    },
];

/// Fixed, ordered list of plan definitions
pub fn base_plans() -> &'static [Plan] {
    &BASE_PLANS
}

/// Finds the definition of `key` in the catalog
pub fn find_plan(key: PlanKey) -> Option<&'static Plan> {
    BASE_PLANS.iter().find(|plan| plan.key == key)
}

/// Formats `amount` like `$ 108.000`
pub fn format_cop(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}$ {grouped}")
}
