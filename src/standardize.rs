//! Address standardization
//!
//! Maps an upstream validation result into the canonical
//! {number, street, city, state, zip, zipPlus4} record. Prefers the
//! provider's structured components and falls back to the raw address line
//! when structure is absent. Total over its input: every field of the output
//! is optional and an empty result yields an empty address.

use crate::validation::provider::ValidationResult;
use serde::Serialize;

/// Canonical standardized form of a validated US address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardizedAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_plus4: Option<String>,
}

/// Pull the first structured component of the requested type (e.g. `route`,
/// `street_number`) out of the provider response.
fn find_component<'a>(result: &'a ValidationResult, component_type: &str) -> Option<&'a str> {
    let components = result.address.as_ref()?.address_components.as_ref()?;

    components
        .iter()
        .find(|component| component.component_type.as_deref() == Some(component_type))
        .and_then(|component| component.component_name.as_ref())
        .and_then(|name| name.text.as_deref())
}

fn first_address_line(result: &ValidationResult) -> Option<&str> {
    result
        .address
        .as_ref()?
        .postal_address
        .as_ref()?
        .address_lines
        .as_ref()?
        .first()
        .map(String::as_str)
}

/// Derive street name + suffix, preferring the structured component over the
/// raw line.
fn derive_street(result: &ValidationResult) -> Option<String> {
    if let Some(route) = find_component(result, "route") {
        return Some(route.to_string());
    }

    first_address_line(result).map(str::to_string)
}

/// Derive the primary number from the structured component or the first token
/// of the address line. A purely alphabetic leading token yields no number.
fn derive_number(result: &ValidationResult) -> Option<String> {
    if let Some(street_number) = find_component(result, "street_number") {
        return Some(street_number.to_string());
    }

    let first_token = first_address_line(result)?.split_whitespace().next()?;
    if first_token.starts_with(|c: char| c.is_ascii_digit()) {
        Some(first_token.to_string())
    } else {
        None
    }
}

/// Split a raw postal code into a 5-digit base and an optional ZIP+4 form.
///
/// Hyphenated codes split at the first hyphen; a 9-digit run without a
/// separator is split positionally after the fifth character.
fn split_postal_code(postal_code: &str) -> (Option<String>, Option<String>) {
    if postal_code.contains('-') {
        let mut parts = postal_code.split('-');
        let base = parts.next().unwrap_or_default();
        let plus4 = parts.next().unwrap_or_default();

        let zip_plus4 = if plus4.is_empty() {
            postal_code.to_string()
        } else {
            format!("{base}-{plus4}")
        };
        (Some(base.to_string()), Some(zip_plus4))
    } else if let Some((split, _)) = postal_code.char_indices().nth(5) {
        let (zip, plus4) = postal_code.split_at(split);
        (Some(zip.to_string()), Some(format!("{zip}-{plus4}")))
    } else {
        (Some(postal_code.to_string()), None)
    }
}

/// Convert an upstream validation result into the standardized address shape.
pub fn standardize_address(result: &ValidationResult) -> StandardizedAddress {
    let postal = result
        .address
        .as_ref()
        .and_then(|address| address.postal_address.as_ref());

    let (zip, zip_plus4) = match postal.and_then(|p| p.postal_code.as_deref()) {
        Some(postal_code) => split_postal_code(postal_code),
        None => (None, None),
    };

    StandardizedAddress {
        number: derive_number(result),
        street: derive_street(result),
        city: postal.and_then(|p| p.locality.clone()),
        state: postal.and_then(|p| p.administrative_area.clone()),
        zip,
        zip_plus4,
    }
}
