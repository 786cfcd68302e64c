//! Rate value types
//!
//! Typed replacements for the loosely-shaped rows of the rate tables: a
//! resolved rate with its kind, the occupancy predicate attached to add-on
//! rows, and terrorism slabs keyed by occupancy type and sum-insured band.
//! Everything here is parsed once when rows are loaded; the resolver only
//! ever sees these types.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use core_kernel::{AddOnCode, Money, OccupancyCode, PerMille, ProductCode};

/// Errors raised while parsing stored rate attributes
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateParseError {
    #[error("Unknown rate kind: {0}")]
    UnknownRateKind(String),

    #[error("Unknown occupancy rule: {0}")]
    UnknownOccupancyRule(String),

    #[error("Occupancy rule {0} lists no occupancy codes")]
    EmptyOccupancyRule(String),

    #[error("Unknown occupancy type: {0}")]
    UnknownOccupancyType(String),
}

/// How a rate value is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    /// Value per thousand of the add-on's sum insured
    PerMille,
    /// Value percent of the add-on's sum insured
    Percentage,
    /// A fixed amount; sum insured is ignored
    Flat,
    /// Value percent of the policy's basic premium
    PercentOfBasicPremium,
    /// Included at policy rate, contributes nothing
    Free,
}

impl FromStr for RateKind {
    type Err = RateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per_mille" | "permille" => Ok(RateKind::PerMille),
            "percentage" | "percent" => Ok(RateKind::Percentage),
            "flat" | "fixed" | "amount" => Ok(RateKind::Flat),
            "percent_of_basic_rate" | "percent_of_basic_premium" => {
                Ok(RateKind::PercentOfBasicPremium)
            }
            "free" | "policy_rate" => Ok(RateKind::Free),
            _ => Err(RateParseError::UnknownRateKind(s.to_string())),
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RateKind::PerMille => "per_mille",
            RateKind::Percentage => "percentage",
            RateKind::Flat => "flat",
            RateKind::PercentOfBasicPremium => "percent_of_basic_premium",
            RateKind::Free => "free",
        };
        f.write_str(name)
    }
}

/// The outcome of a rate lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRate {
    pub value: Decimal,
    pub kind: RateKind,
}

impl ResolvedRate {
    pub fn new(value: Decimal, kind: RateKind) -> Self {
        Self { value, kind }
    }

    /// The "no applicable rate" sentinel: zero, flat
    pub fn none() -> Self {
        Self {
            value: dec!(0),
            kind: RateKind::Flat,
        }
    }

    /// Returns true for the zero flat sentinel
    pub fn is_none(&self) -> bool {
        self.kind == RateKind::Flat && self.value.is_zero()
    }
}

/// Predicate attached to an add-on rate row
///
/// Stored as `ALL`, `ONLY_<codes>` or `EXCEPT_<codes>`. A missing rule means
/// `ALL`. `<codes>` lists one or more occupancy codes, either joined with
/// underscores as the rate tables write them (`ONLY_1001_1001_2`) or
/// separated by commas (`ONLY_1001,1001_2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "codes", rename_all = "snake_case")]
pub enum OccupancyRule {
    MatchAll,
    MatchOnly(Vec<OccupancyCode>),
    MatchExcept(Vec<OccupancyCode>),
}

impl OccupancyRule {
    /// Parses a stored rule; `None` or blank is `MatchAll`
    pub fn parse(raw: Option<&str>) -> Result<Self, RateParseError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(OccupancyRule::MatchAll),
            Some(raw) => raw,
        };

        if raw.eq_ignore_ascii_case("ALL") {
            return Ok(OccupancyRule::MatchAll);
        }

        let upper = raw.to_ascii_uppercase();
        if upper.starts_with("ONLY_") {
            Self::parse_codes(raw, &raw["ONLY_".len()..]).map(OccupancyRule::MatchOnly)
        } else if upper.starts_with("EXCEPT_") {
            Self::parse_codes(raw, &raw["EXCEPT_".len()..]).map(OccupancyRule::MatchExcept)
        } else {
            Err(RateParseError::UnknownOccupancyRule(raw.to_string()))
        }
    }

    fn parse_codes(raw: &str, list: &str) -> Result<Vec<OccupancyCode>, RateParseError> {
        let codes: Vec<OccupancyCode> = list
            .split(',')
            .flat_map(split_joined_codes)
            .filter_map(|code| OccupancyCode::parse(&code).ok())
            .collect();

        if codes.is_empty() {
            return Err(RateParseError::EmptyOccupancyRule(raw.to_string()));
        }
        Ok(codes)
    }

    /// Evaluates the rule for an occupancy
    ///
    /// Without an occupancy only `MatchAll` and `MatchExcept` rows apply:
    /// nothing can be excluded, and nothing can be singled out.
    pub fn matches(&self, occupancy: Option<&OccupancyCode>) -> bool {
        match (self, occupancy) {
            (OccupancyRule::MatchAll, _) => true,
            (OccupancyRule::MatchOnly(codes), Some(occ)) => codes.contains(occ),
            (OccupancyRule::MatchOnly(_), None) => false,
            (OccupancyRule::MatchExcept(codes), Some(occ)) => !codes.contains(occ),
            (OccupancyRule::MatchExcept(_), None) => true,
        }
    }

    /// Lower is more specific: `ONLY` before `EXCEPT` before `ALL`
    pub fn specificity(&self) -> u8 {
        match self {
            OccupancyRule::MatchOnly(_) => 0,
            OccupancyRule::MatchExcept(_) => 1,
            OccupancyRule::MatchAll => 2,
        }
    }
}

/// Splits underscore-joined occupancy codes.
///
/// Occupancy codes are an IIB code of three or more characters with an
/// optional short sub-code (`1001_2`), so a segment shorter than
/// [`MIN_IIB_CODE_LEN`] continues the previous code and anything longer
/// starts a new one: `1001_1001_2` is `1001` and `1001_2`.
fn split_joined_codes(list: &str) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for segment in list.split('_').map(str::trim).filter(|s| !s.is_empty()) {
        match codes.last_mut() {
            Some(code) if segment.len() < MIN_IIB_CODE_LEN => {
                code.push('_');
                code.push_str(segment);
            }
            _ => codes.push(segment.to_string()),
        }
    }
    codes
}

/// Shortest IIB occupancy code
const MIN_IIB_CODE_LEN: usize = 3;

impl Default for OccupancyRule {
    fn default() -> Self {
        OccupancyRule::MatchAll
    }
}

/// Occupancy class used to pick terrorism slabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupancyType {
    Residential,
    NonIndustrial,
    Industrial,
}

impl OccupancyType {
    /// Name as stored in the rate tables
    pub fn as_str(&self) -> &'static str {
        match self {
            OccupancyType::Residential => "Residential",
            OccupancyType::NonIndustrial => "Non-Industrial",
            OccupancyType::Industrial => "Industrial",
        }
    }
}

impl FromStr for OccupancyType {
    type Err = RateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalised.as_str() {
            "residential" => Ok(OccupancyType::Residential),
            "nonindustrial" => Ok(OccupancyType::NonIndustrial),
            "industrial" => Ok(OccupancyType::Industrial),
            _ => Err(RateParseError::UnknownOccupancyType(s.to_string())),
        }
    }
}

impl fmt::Display for OccupancyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terrorism rate band over total sum insured: `[si_min, si_max)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrorismSlab {
    pub occupancy_type: OccupancyType,
    pub si_min: Money,
    /// `None` means the band is unbounded above
    pub si_max: Option<Money>,
    pub rate: PerMille,
}

impl TerrorismSlab {
    /// Returns true if `sum_insured` falls inside the half-open band
    pub fn contains(&self, sum_insured: &Money) -> bool {
        if *sum_insured < self.si_min {
            return false;
        }
        match &self.si_max {
            Some(max) => sum_insured < max,
            None => true,
        }
    }
}

/// One add-on rate row with its occupancy predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnRateRow {
    pub rule: OccupancyRule,
    pub rate: ResolvedRate,
}

/// Immutable input to a rate lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateQuery {
    pub product_code: ProductCode,
    pub occupancy_code: OccupancyCode,
    pub sum_insured: Money,
    pub add_on_code: Option<AddOnCode>,
}

impl RateQuery {
    pub fn new(
        product_code: ProductCode,
        occupancy_code: OccupancyCode,
        sum_insured: Money,
    ) -> Self {
        Self {
            product_code,
            occupancy_code,
            sum_insured,
            add_on_code: None,
        }
    }

    /// Derives the query for one add-on against the same risk
    pub fn for_add_on(&self, add_on_code: AddOnCode, sum_insured: Money) -> Self {
        Self {
            product_code: self.product_code.clone(),
            occupancy_code: self.occupancy_code.clone(),
            sum_insured,
            add_on_code: Some(add_on_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(code: &str) -> OccupancyCode {
        OccupancyCode::parse(code).unwrap()
    }

    #[test]
    fn test_rate_kind_aliases() {
        assert_eq!("PER_MILLE".parse::<RateKind>().unwrap(), RateKind::PerMille);
        assert_eq!("percent".parse::<RateKind>().unwrap(), RateKind::Percentage);
        assert_eq!("fixed".parse::<RateKind>().unwrap(), RateKind::Flat);
        assert_eq!(
            "PERCENT_OF_BASIC_RATE".parse::<RateKind>().unwrap(),
            RateKind::PercentOfBasicPremium
        );
        assert_eq!("POLICY_RATE".parse::<RateKind>().unwrap(), RateKind::Free);
        assert!("MIN_PREMIUM".parse::<RateKind>().is_err());
    }

    #[test]
    fn test_rule_parsing() {
        assert_eq!(OccupancyRule::parse(None).unwrap(), OccupancyRule::MatchAll);
        assert_eq!(OccupancyRule::parse(Some("  ")).unwrap(), OccupancyRule::MatchAll);
        assert_eq!(OccupancyRule::parse(Some("all")).unwrap(), OccupancyRule::MatchAll);
        assert_eq!(
            OccupancyRule::parse(Some("ONLY_1001_2")).unwrap(),
            OccupancyRule::MatchOnly(vec![occ("1001_2")])
        );
        assert_eq!(
            OccupancyRule::parse(Some("EXCEPT_1001,1001_2")).unwrap(),
            OccupancyRule::MatchExcept(vec![occ("1001"), occ("1001_2")])
        );
    }

    #[test]
    fn test_underscore_joined_rules() {
        let only = OccupancyRule::parse(Some("ONLY_1001_1001_2")).unwrap();
        assert_eq!(only, OccupancyRule::MatchOnly(vec![occ("1001"), occ("1001_2")]));
        assert!(only.matches(Some(&occ("1001"))));
        assert!(only.matches(Some(&occ("1001_2"))));
        assert!(!only.matches(Some(&occ("2001"))));

        let except = OccupancyRule::parse(Some("EXCEPT_1001_1001_2")).unwrap();
        assert_eq!(except, OccupancyRule::MatchExcept(vec![occ("1001"), occ("1001_2")]));
        assert!(!except.matches(Some(&occ("1001"))));
        assert!(!except.matches(Some(&occ("1001_2"))));
        assert!(except.matches(Some(&occ("3001"))));
    }

    #[test]
    fn test_joined_code_splitting() {
        assert_eq!(split_joined_codes("1001"), vec!["1001"]);
        assert_eq!(split_joined_codes("1001_2"), vec!["1001_2"]);
        assert_eq!(split_joined_codes("1001_2_2001"), vec!["1001_2", "2001"]);
        assert_eq!(split_joined_codes("1001__2001_"), vec!["1001", "2001"]);
    }

    #[test]
    fn test_rule_parse_errors() {
        assert!(matches!(
            OccupancyRule::parse(Some("ONLY_")),
            Err(RateParseError::EmptyOccupancyRule(_))
        ));
        assert!(matches!(
            OccupancyRule::parse(Some("Residential")),
            Err(RateParseError::UnknownOccupancyRule(_))
        ));
    }

    #[test]
    fn test_rule_matching() {
        let only = OccupancyRule::MatchOnly(vec![occ("1001"), occ("1001_2")]);
        assert!(only.matches(Some(&occ("1001_2"))));
        assert!(!only.matches(Some(&occ("2001"))));
        assert!(!only.matches(None));

        let except = OccupancyRule::MatchExcept(vec![occ("1001")]);
        assert!(!except.matches(Some(&occ("1001"))));
        assert!(except.matches(Some(&occ("1001_2"))));
        assert!(except.matches(None));

        assert!(OccupancyRule::MatchAll.matches(None));
    }

    #[test]
    fn test_rule_specificity() {
        let only = OccupancyRule::MatchOnly(vec![occ("1001")]);
        let except = OccupancyRule::MatchExcept(vec![occ("1001")]);
        assert!(only.specificity() < except.specificity());
        assert!(except.specificity() < OccupancyRule::MatchAll.specificity());
    }

    #[test]
    fn test_occupancy_type_parsing() {
        assert_eq!(
            "Non-Industrial".parse::<OccupancyType>().unwrap(),
            OccupancyType::NonIndustrial
        );
        assert_eq!("INDUSTRIAL".parse::<OccupancyType>().unwrap(), OccupancyType::Industrial);
        assert_eq!("residential".parse::<OccupancyType>().unwrap(), OccupancyType::Residential);
        assert!("Agricultural".parse::<OccupancyType>().is_err());
    }

    #[test]
    fn test_slab_is_half_open() {
        let slab = TerrorismSlab {
            occupancy_type: OccupancyType::Industrial,
            si_min: Money::new(dec!(0)),
            si_max: Some(Money::new(dec!(20000000000))),
            rate: PerMille::new(dec!(0.20)),
        };
        assert!(slab.contains(&Money::new(dec!(0))));
        assert!(slab.contains(&Money::new(dec!(19999999999.99))));
        assert!(!slab.contains(&Money::new(dec!(20000000000))));
    }

    #[test]
    fn test_unbounded_slab() {
        let slab = TerrorismSlab {
            occupancy_type: OccupancyType::Industrial,
            si_min: Money::new(dec!(20000000000)),
            si_max: None,
            rate: PerMille::new(dec!(0.15)),
        };
        assert!(slab.contains(&Money::new(dec!(90000000000))));
        assert!(!slab.contains(&Money::new(dec!(100))));
    }

    #[test]
    fn test_sentinel() {
        assert!(ResolvedRate::none().is_none());
        assert!(!ResolvedRate::new(dec!(7), RateKind::Flat).is_none());
        assert!(!ResolvedRate::new(dec!(0), RateKind::Free).is_none());
    }
}
