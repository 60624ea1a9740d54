//! Charge-code table and evaluator
//!
//! Turns a [`JobEstimateInput`] into the ordered list of additive price/time
//! contributions. Order is fixed: Base, Size, House, Weekly, Dog & cat,
//! Turn-1. Codes whose condition does not hold are skipped entirely.

use crate::pricing::models::{ChargeLineItem, Frequency, JobEstimateInput, PropertyType};

/// Dollars per labor hour used by every time-based charge
pub const BASE_HOURLY_RATE: f64 = 55.0;

const BASE_PER_SQFT: f64 = 0.055;
const SIZE_PER_SQFT: f64 = 0.042;
const HOUSE_FLAT: f64 = 10.0;
const PETS_SMALL_FLAT: f64 = 15.0;
const PETS_LARGE_FLAT: f64 = 25.0;
const PETS_SMALL_MAX: u32 = 2;
const TURN_ONE_FLAT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeCode {
    Base,
    Size,
    House,
    Weekly,
    DogAndCat,
    Turn1,
}

impl ChargeCode {
    /// Evaluation order
    pub const ORDER: [ChargeCode; 6] = [
        ChargeCode::Base,
        ChargeCode::Size,
        ChargeCode::House,
        ChargeCode::Weekly,
        ChargeCode::DogAndCat,
        ChargeCode::Turn1,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Base => "BASE",
            Self::Size => "SIZE",
            Self::House => "HOUSE",
            Self::Weekly => "WEEKLY",
            Self::DogAndCat => "DOG_AND_CAT",
            Self::Turn1 => "TURN_1",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Base => "Base visit",
            Self::Size => "Size adjustment",
            Self::House => "House",
            Self::Weekly => "Weekly frequency discount",
            Self::DogAndCat => "Dogs and cats",
            Self::Turn1 => "Turn 1 deep clean",
        }
    }

    /// Labor hours contributed (negative for the weekly discount)
    pub fn hours(&self) -> f64 {
        match self {
            Self::Base => 0.60,
            Self::Size => 0.525,
            Self::House => 0.324,
            Self::Weekly => -0.25,
            Self::DogAndCat => 0.25,
            Self::Turn1 => 0.15,
        }
    }

    /// When the code applies, as shown by `estimator codes`
    pub fn condition(&self) -> &'static str {
        match self {
            Self::Base | Self::Size => "always",
            Self::House => "property type is house",
            Self::Weekly => "frequency is weekly",
            Self::DogAndCat => "at least one dog and one cat",
            Self::Turn1 => "service is deep_clean_blue or deep_clean_shine",
        }
    }

    /// Human-readable pricing formula, as shown by `estimator codes`
    pub fn formula(&self) -> String {
        let labor = format!("{} h x ${}", self.hours(), BASE_HOURLY_RATE);
        match self {
            Self::Base => format!("{} + sqft x {}", labor, BASE_PER_SQFT),
            Self::Size => format!("{} + sqft x {}", labor, SIZE_PER_SQFT),
            Self::House => format!("{} + ${}", labor, HOUSE_FLAT),
            Self::Weekly => labor,
            Self::DogAndCat => format!(
                "${} up to {} pets, else {} + ${}",
                PETS_SMALL_FLAT, PETS_SMALL_MAX, labor, PETS_LARGE_FLAT
            ),
            Self::Turn1 => format!("${} flat", TURN_ONE_FLAT),
        }
    }

    /// Dollar contribution for `input`, or `None` when the code does not apply
    pub fn dollars_for(&self, input: &JobEstimateInput) -> Option<f64> {
        let labor = self.hours() * BASE_HOURLY_RATE;
        let sqft = input.square_footage as f64;

        match self {
            Self::Base => Some(labor + sqft * BASE_PER_SQFT),
            Self::Size => Some(labor + sqft * SIZE_PER_SQFT),
            Self::House => (input.property_type == PropertyType::House).then_some(labor + HOUSE_FLAT),
            Self::Weekly => (input.frequency == Frequency::Weekly).then_some(labor),
            // Dog-only and cat-only households carry no charge item
            Self::DogAndCat => {
                if input.pets.dogs > 0 && input.pets.cats > 0 {
                    if input.pets.total() <= PETS_SMALL_MAX {
                        Some(PETS_SMALL_FLAT)
                    } else {
                        Some(labor + PETS_LARGE_FLAT)
                    }
                } else {
                    None
                }
            }
            Self::Turn1 => input.service_type.is_turn_one().then_some(TURN_ONE_FLAT),
        }
    }
}

/// Charge items emitted for one input plus their running totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargeSheet {
    pub items: Vec<ChargeLineItem>,
    pub total_time: f64,
    pub total_dollars: f64,
}

impl ChargeSheet {
    fn push(&mut self, code: ChargeCode, dollars: f64) {
        let time = code.hours();
        self.total_time += time;
        self.total_dollars += dollars;
        self.items.push(ChargeLineItem {
            code: code.code().to_string(),
            description: code.description().to_string(),
            time,
            dollars,
        });
    }
}

/// Evaluate every charge code in order against `input`
pub fn evaluate_charge_codes(input: &JobEstimateInput) -> ChargeSheet {
    let mut sheet = ChargeSheet::default();
    for code in ChargeCode::ORDER {
        if let Some(dollars) = code.dollars_for(input) {
            sheet.push(code, dollars);
        }
    }
    sheet
}
