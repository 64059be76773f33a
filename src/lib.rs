//! addressd - US Address Validation Service
//!
//! Normalizes a free-form US postal address into a standardized structural
//! form and a deliverability verdict by calling the Google Address Validation
//! API and interpreting its response codes.
//!
//! # Overview
//!
//! The interpretation core is two pure functions over a single upstream
//! result:
//! - [`standardize::standardize_address`] extracts
//!   {number, street, city, state, zip, zipPlus4} with graceful fallback when
//!   the provider returned no structured components.
//! - [`deliverability::assess_deliverability`] translates
//!   delivery-point-validation codes and verdict flags into a deliverability
//!   decision with a stable issue taxonomy.
//!
//! Everything else is plumbing: a warp HTTP surface, reqwest provider
//! clients behind trait seams, and the usual configuration/observability
//! machinery.
//!
//! # Quick Start
//!
//! ```rust
//! use addressd::deliverability::assess_deliverability;
//! use addressd::standardize::standardize_address;
//! use addressd::validation::provider::ValidationResult;
//!
//! let result: ValidationResult = serde_json::from_str(
//!     r#"{
//!         "address": {
//!             "postalAddress": { "postalCode": "94043-1351", "locality": "Mountain View" }
//!         },
//!         "uspsData": { "dpvConfirmation": "Y" }
//!     }"#,
//! )
//! .unwrap();
//!
//! let standardized = standardize_address(&result);
//! assert_eq!(standardized.zip.as_deref(), Some("94043"));
//! assert_eq!(standardized.zip_plus4.as_deref(), Some("94043-1351"));
//!
//! let assessment = assess_deliverability(&result);
//! assert!(assessment.is_deliverable);
//! assert!(assessment.issues.is_empty());
//! ```

pub mod config;
pub mod deliverability;
pub mod error;
pub mod observability;
pub mod server;
pub mod standardize;
pub mod testing;
pub mod validation;

pub use config::AppConfig;
pub use deliverability::{assess_deliverability, DeliverabilityAssessment, DeliverabilityIssue};
pub use error::{ServiceError, ServiceResult};
pub use server::ApiServer;
pub use standardize::{standardize_address, StandardizedAddress};
pub use validation::provider::{AddressValidator, ProviderError, SuggestionProvider};
