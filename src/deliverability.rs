//! Deliverability assessment
//!
//! Translates the upstream verdict and USPS delivery-point-validation fields
//! into a deliverability decision with a stable issue taxonomy. The issue
//! strings form the wire contract and must not change. Total over its input:
//! a fully absent result assesses as not deliverable with DPV_NOT_CONFIRMED.

use crate::validation::provider::ValidationResult;
use serde::Serialize;

/// Why an address was judged not deliverable
///
/// Serialized names are the wire vocabulary consumed by API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliverabilityIssue {
    DpvNotConfirmed,
    MissingSecondary,
    UnconfirmedComponents,
    InsufficientAddress,
    NonUsAddress,
}

/// Deliverability verdict for a validated address
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverabilityAssessment {
    pub is_deliverable: bool,
    pub issues: Vec<DeliverabilityIssue>,
    pub missing_secondary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpv_confirmation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpv_footnotes: Option<String>,
}

/// DPV codes S/D mean secondary info (apt/unit) is missing or required.
fn is_missing_secondary(dpv_confirmation: Option<&str>) -> bool {
    matches!(dpv_confirmation, Some("S") | Some("D"))
}

/// Evaluate USPS-style deliverability from an upstream validation result.
///
/// All checks run independently and their issues accumulate in a fixed
/// order; a deliverable verdict suppresses the emitted list entirely.
pub fn assess_deliverability(result: &ValidationResult) -> DeliverabilityAssessment {
    let mut issues = Vec::new();

    let usps = result.usps_data.as_ref();
    let dpv_confirmation = usps.and_then(|data| data.dpv_confirmation.clone());
    let dpv_footnotes = usps.and_then(|data| data.dpv_footnotes.clone());

    let region_code = result
        .address
        .as_ref()
        .and_then(|address| address.postal_address.as_ref())
        .and_then(|postal| postal.region_code.as_deref())
        .map(str::to_uppercase);
    let region_code_is_us = match region_code.as_deref() {
        None => true,
        Some(code) => code == "US",
    };
    if !region_code_is_us {
        issues.push(DeliverabilityIssue::NonUsAddress);
    }

    let missing_secondary = is_missing_secondary(dpv_confirmation.as_deref());
    if missing_secondary {
        issues.push(DeliverabilityIssue::MissingSecondary);
    }

    let has_unconfirmed = result
        .verdict
        .as_ref()
        .and_then(|verdict| verdict.has_unconfirmed_components)
        == Some(true);
    if has_unconfirmed {
        issues.push(DeliverabilityIssue::UnconfirmedComponents);
    }

    let address_complete = result
        .verdict
        .as_ref()
        .and_then(|verdict| verdict.address_complete);
    if address_complete == Some(false) {
        issues.push(DeliverabilityIssue::InsufficientAddress);
    }

    if dpv_confirmation.as_deref() != Some("Y") {
        issues.push(DeliverabilityIssue::DpvNotConfirmed);
    }

    let is_deliverable = region_code_is_us
        && dpv_confirmation.as_deref() == Some("Y")
        && !missing_secondary
        && !has_unconfirmed
        && address_complete != Some(false);

    DeliverabilityAssessment {
        is_deliverable,
        issues: if is_deliverable { Vec::new() } else { issues },
        missing_secondary,
        dpv_confirmation,
        dpv_footnotes,
    }
}
