//! Postal addresses used for home delivery.

use std::fmt;
use std::str::FromStr;

use crate::config::{POSTCODE_MAX, POSTCODE_MIN};
use crate::error::{MarketError, MarketResult};

/// Optional unit (apartment) number. Blank input means "no unit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unit(Option<u32>);

impl Unit {
    pub const NONE: Self = Self(None);

    pub const fn number(&self) -> Option<u32> {
        self.0
    }
}

impl FromStr for Unit {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Ok(Self::NONE);
        }
        match raw.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Self(Some(n))),
            _ => Err(MarketError::Validation(format!(
                "'{raw}' is not a valid unit number"
            ))),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "U{n} "),
            None => Ok(()),
        }
    }
}

/// Parse an enum variant by case-insensitive name, rejecting numeric input.
fn parse_variant<T: Copy>(raw: &str, variants: &[(&str, T)], what: &str) -> MarketResult<T> {
    let raw = raw.trim();
    variants
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(raw))
        .map(|(_, v)| *v)
        .ok_or_else(|| MarketError::Validation(format!("'{raw}' is not a valid {what}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreetType {
    St,
    Rd,
    Ave,
    Blvd,
    Dr,
    Ln,
    Ct,
    Pl,
    Ter,
    Way,
}

impl StreetType {
    const VARIANTS: [(&'static str, Self); 10] = [
        ("St", Self::St),
        ("Rd", Self::Rd),
        ("Ave", Self::Ave),
        ("Blvd", Self::Blvd),
        ("Dr", Self::Dr),
        ("Ln", Self::Ln),
        ("Ct", Self::Ct),
        ("Pl", Self::Pl),
        ("Ter", Self::Ter),
        ("Way", Self::Way),
    ];

    pub fn label(&self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, v)| v == self)
            .map_or("", |(name, _)| name)
    }
}

impl FromStr for StreetType {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Self::VARIANTS, "street type")
    }
}

impl fmt::Display for StreetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Australian states and territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Qld,
    Nsw,
    Vic,
    Tas,
    Sa,
    Wa,
    Nt,
    Act,
}

impl State {
    const VARIANTS: [(&'static str, Self); 8] = [
        ("QLD", Self::Qld),
        ("NSW", Self::Nsw),
        ("VIC", Self::Vic),
        ("TAS", Self::Tas),
        ("SA", Self::Sa),
        ("WA", Self::Wa),
        ("NT", Self::Nt),
        ("ACT", Self::Act),
    ];

    pub fn label(&self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, v)| v == self)
            .map_or("", |(name, _)| name)
    }
}

impl FromStr for State {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(s, &Self::VARIANTS, "state")
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A street address. Construct through [`Address::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    unit: Unit,
    street_number: u32,
    street_name: String,
    street_type: StreetType,
    city: String,
    postcode: u32,
    state: State,
}

impl Address {
    pub const fn builder() -> AddressBuilder {
        AddressBuilder {
            unit: Unit::NONE,
            street_number: None,
            street_name: None,
            street_type: None,
            city: None,
            postcode: None,
            state: None,
        }
    }

    pub const fn postcode(&self) -> u32 {
        self.postcode
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {} {}, {} {} {}",
            self.unit,
            self.street_number,
            self.street_name,
            self.street_type,
            self.city,
            self.state,
            self.postcode
        )
    }
}

/// Validate a street number on its own (the console prompts for it separately).
pub fn validate_street_number(n: u32) -> MarketResult<u32> {
    if n == 0 {
        return Err(MarketError::Validation(
            "Street number must be a non-zero positive integer".into(),
        ));
    }
    Ok(n)
}

/// Validate a postcode on its own.
pub fn validate_postcode(n: u32) -> MarketResult<u32> {
    if !(POSTCODE_MIN..=POSTCODE_MAX).contains(&n) {
        return Err(MarketError::Validation(format!(
            "Postcode must be between {POSTCODE_MIN} and {POSTCODE_MAX} inclusive"
        )));
    }
    Ok(n)
}

/// Builder for [`Address`]. Every field except the unit is required.
#[derive(Debug, Clone)]
pub struct AddressBuilder {
    unit: Unit,
    street_number: Option<u32>,
    street_name: Option<String>,
    street_type: Option<StreetType>,
    city: Option<String>,
    postcode: Option<u32>,
    state: Option<State>,
}

impl AddressBuilder {
    #[must_use]
    pub const fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    #[must_use]
    pub const fn street_number(mut self, n: u32) -> Self {
        self.street_number = Some(n);
        self
    }

    #[must_use]
    pub fn street_name(mut self, name: impl Into<String>) -> Self {
        self.street_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn street_type(mut self, street_type: StreetType) -> Self {
        self.street_type = Some(street_type);
        self
    }

    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub const fn postcode(mut self, postcode: u32) -> Self {
        self.postcode = Some(postcode);
        self
    }

    #[must_use]
    pub const fn state(mut self, state: State) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the address (returns error if a field is missing or invalid)
    pub fn build(self) -> MarketResult<Address> {
        let missing = |field: &str| MarketError::Validation(format!("{field} is required"));
        let non_blank = |value: Option<String>, field: &str| -> MarketResult<String> {
            let value = value.ok_or_else(|| missing(field))?;
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(MarketError::Validation(format!("{field} cannot be blank")));
            }
            Ok(trimmed.to_string())
        };

        Ok(Address {
            unit: self.unit,
            street_number: validate_street_number(
                self.street_number.ok_or_else(|| missing("street number"))?,
            )?,
            street_name: non_blank(self.street_name, "street name")?,
            street_type: self.street_type.ok_or_else(|| missing("street type"))?,
            city: non_blank(self.city, "city")?,
            postcode: validate_postcode(self.postcode.ok_or_else(|| missing("postcode"))?)?,
            state: self.state.ok_or_else(|| missing("state"))?,
        })
    }
}
