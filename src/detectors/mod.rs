//! Detector registry (C3, spec §4.3).
//!
//! Every detector is a pure, deterministic `fn(&str, &RedactionContext) ->
//! Vec<Span>`: no shared state, no I/O, safe to run concurrently across a
//! thread-per-detector fan-out (C4). Detector registration is a compile-time
//! table rather than a dynamic plugin mechanism (spec §9, Open Question
//! resolved in DESIGN.md): adding a detector means adding a module and a row
//! here, nothing else.

pub mod account;
pub mod address;
pub mod age;
pub mod bank_account;
pub mod biometric;
pub mod common;
pub mod credit_card;
pub mod date;
pub mod dea;
pub mod device_id;
pub mod drivers_license;
pub mod email;
pub mod fax;
pub mod health_plan;
pub mod hospital;
pub mod ip;
pub mod medicare_medicaid;
pub mod mrn;
pub mod name;
pub mod npi;
pub mod passport;
pub mod phone;
pub mod ssn;
pub mod unique_id;
pub mod url;
pub mod vehicle;
pub mod zip;

use crate::context::RedactionContext;
use crate::span::Span;

pub type DetectFn = fn(&str, &RedactionContext) -> Vec<Span>;

/// One row of the compile-time detector table: a name (used for fault
/// reporting and `match_source` cross-checks) and the function pointer C4
/// invokes.
#[derive(Clone, Copy)]
pub struct Detector {
    pub name: &'static str,
    pub detect: DetectFn,
}

/// The full enabled-by-default detector set, in no particular order —
/// arbitration, not registration order, decides which spans survive.
pub static REGISTRY: &[Detector] = &[
    Detector { name: "ssn", detect: ssn::detect },
    Detector { name: "mrn", detect: mrn::detect },
    Detector { name: "phone", detect: phone::detect },
    Detector { name: "fax", detect: fax::detect },
    Detector { name: "email", detect: email::detect },
    Detector { name: "address", detect: address::detect },
    Detector { name: "zip", detect: zip::detect },
    Detector { name: "medicare", detect: medicare_medicaid::detect_medicare },
    Detector { name: "medicaid", detect: medicare_medicaid::detect_medicaid },
    Detector { name: "dea", detect: dea::detect },
    Detector { name: "npi", detect: npi::detect },
    Detector { name: "account_number", detect: account::detect },
    Detector { name: "credit_card", detect: credit_card::detect },
    Detector { name: "bank_account", detect: bank_account::detect },
    Detector { name: "drivers_license", detect: drivers_license::detect },
    Detector { name: "passport", detect: passport::detect },
    Detector { name: "health_plan", detect: health_plan::detect },
    Detector { name: "ip", detect: ip::detect },
    Detector { name: "url", detect: url::detect },
    Detector { name: "device_id", detect: device_id::detect },
    Detector { name: "vehicle", detect: vehicle::detect },
    Detector { name: "biometric", detect: biometric::detect },
    Detector { name: "age_over_89", detect: age::detect },
    Detector { name: "unique_id", detect: unique_id::detect },
    Detector { name: "hospital", detect: hospital::detect },
    Detector { name: "name", detect: name::detect },
    Detector { name: "date", detect: date::detect },
];
