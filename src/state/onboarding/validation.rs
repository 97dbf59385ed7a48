//! Per-step validation rules

use super::field::FieldId;
use super::registry::Step;
use super::store::{ErrorMap, FormState};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
pub const DEFAULT_PHONE_PATTERN: &str = r"^(?:\+91[\-\s]?|0)?[6-9]\d{9}$";

const FSSAI_LENGTH: usize = 14;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_EMAIL_PATTERN).expect("email pattern compiles"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_PHONE_PATTERN).expect("phone pattern compiles"));

pub fn is_email_valid(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_phone_valid(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// True for a non-empty string made of ASCII digits only
pub fn contains_only_numbers(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// String predicates used by the step rules.
///
/// The phone pattern can be swapped through configuration; everything else
/// is fixed.
#[derive(Debug, Clone, Default)]
pub struct ValidationRules {
    phone: Option<Regex>,
}

impl ValidationRules {
    /// Rules with a custom phone pattern
    pub fn with_phone_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            phone: Some(Regex::new(pattern)?),
        })
    }

    fn phone_ok(&self, value: &str) -> bool {
        match &self.phone {
            Some(re) => re.is_match(value),
            None => is_phone_valid(value),
        }
    }

    /// Compute the error map for one step.
    ///
    /// Only the step's own fields are checked and every one of them gets an
    /// entry, empty when valid.
    pub fn validate(&self, step: Step, form: &FormState) -> ErrorMap {
        let mut errors = ErrorMap::new();
        let v = |id: FieldId| form.value(id);

        match step {
            Step::User => {
                errors.insert(FieldId::Email, email_error(v(FieldId::Email)));
                errors.insert(FieldId::Mobile, self.mobile_error(v(FieldId::Mobile)));
                errors.insert(FieldId::Name, required(v(FieldId::Name), "Name is required"));
            }
            Step::KycDetails => {
                errors.insert(
                    FieldId::ProviderStoreName,
                    required(v(FieldId::ProviderStoreName), "Provider name is required"),
                );
                errors.insert(
                    FieldId::Address,
                    required(v(FieldId::Address), "Address is required"),
                );
                errors.insert(FieldId::ContactEmail, email_error(v(FieldId::ContactEmail)));
                errors.insert(
                    FieldId::ContactMobile,
                    self.mobile_error(v(FieldId::ContactMobile)),
                );
                errors.insert(FieldId::Pan, required(v(FieldId::Pan), "PAN is required"));
                errors.insert(FieldId::Gstn, required(v(FieldId::Gstn), "GSTIN is required"));
                errors.insert(FieldId::Fssai, fssai_error(v(FieldId::Fssai)));
            }
            Step::KycDocuments => {
                errors.insert(
                    FieldId::AddressProof,
                    required(v(FieldId::AddressProof), "Address proof is required"),
                );
                errors.insert(
                    FieldId::IdProof,
                    required(v(FieldId::IdProof), "ID proof is required"),
                );
                errors.insert(
                    FieldId::PanProof,
                    required(v(FieldId::PanProof), "PAN is required"),
                );
                errors.insert(
                    FieldId::GstProof,
                    required(v(FieldId::GstProof), "GSTIN proof is required"),
                );
            }
            Step::BankDetails => {
                errors.insert(
                    FieldId::AccHolderName,
                    required(v(FieldId::AccHolderName), "Name is required"),
                );
                errors.insert(FieldId::AccNumber, account_number_error(v(FieldId::AccNumber)));
                errors.insert(
                    FieldId::BankName,
                    required(v(FieldId::BankName), "Bank name is required"),
                );
                errors.insert(
                    FieldId::BranchName,
                    required(v(FieldId::BranchName), "Branch name is required"),
                );
                errors.insert(FieldId::Ifsc, required(v(FieldId::Ifsc), "IFSC code is required"));
                errors.insert(
                    FieldId::CancelledCheque,
                    required(v(FieldId::CancelledCheque), "Cancelled cheque is required"),
                );
            }
        }

        errors
    }

    fn mobile_error(&self, value: &str) -> &'static str {
        if is_blank(value) {
            "Mobile is required"
        } else if !self.phone_ok(value) {
            "Please enter a valid mobile number"
        } else {
            ""
        }
    }
}

/// Validate a step with the default rules
#[cfg(test)]
pub fn validate(step: Step, form: &FormState) -> ErrorMap {
    ValidationRules::default().validate(step, form)
}

fn required(value: &str, message: &'static str) -> &'static str {
    if is_blank(value) {
        message
    } else {
        ""
    }
}

fn email_error(value: &str) -> &'static str {
    if is_blank(value) {
        "Email is required"
    } else if !is_email_valid(value) {
        "Please enter a valid email address"
    } else {
        ""
    }
}

fn fssai_error(value: &str) -> &'static str {
    if is_blank(value) {
        "FSSAI is required"
    } else if !contains_only_numbers(value) || value.len() != FSSAI_LENGTH {
        "FSSAI should be 14 digit number"
    } else {
        ""
    }
}

fn account_number_error(value: &str) -> &'static str {
    if is_blank(value) {
        "Account number is required"
    } else if !contains_only_numbers(value) {
        "Please enter a valid number"
    } else {
        ""
    }
}
