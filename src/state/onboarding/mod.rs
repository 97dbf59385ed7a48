//! Provider onboarding: field registry, form store, validation, wizard and
//! payload assembly

mod field;
mod registry;
mod store;
mod submission;
mod validation;
mod wizard;

pub use field::FieldDescriptor;
pub use registry::{descriptor, Step};
pub use store::FormPatch;
pub use submission::OrganizationPayload;
pub use validation::ValidationRules;
pub use wizard::{OnboardingWizard, StepChange};

#[cfg(test)]
pub use field::FieldId;
#[cfg(test)]
pub use wizard::WizardStatus;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::field::FieldId;
    use super::store::{FormPatch, FormState, FormStore};

    /// Values that pass every step
    pub fn valid_patch() -> FormPatch {
        FormPatch::new()
            .with(FieldId::Email, "asha@example.com")
            .with(FieldId::Mobile, "9876543210")
            .with(FieldId::Name, "Asha Rao")
            .with(FieldId::ProviderStoreName, "Rao Fresh Mart")
            .with(FieldId::Address, "12 MG Road, Bengaluru")
            .with(FieldId::ContactEmail, "store@raofresh.in")
            .with(FieldId::ContactMobile, "+91 9123456780")
            .with(FieldId::Pan, "ABCDE1234F")
            .with(FieldId::Gstn, "29ABCDE1234F1Z5")
            .with(FieldId::Fssai, "12345678901234")
            .with(FieldId::AddressProof, "https://files.example.com/address.pdf")
            .with(FieldId::IdProof, "https://files.example.com/id.pdf")
            .with(FieldId::PanProof, "https://files.example.com/pan.pdf")
            .with(FieldId::GstProof, "https://files.example.com/gst.pdf")
            .with(FieldId::AccHolderName, "Asha Rao")
            .with(FieldId::AccNumber, "001234567890")
            .with(FieldId::BankName, "State Bank of India")
            .with(FieldId::BranchName, "MG Road")
            .with(FieldId::Ifsc, "SBIN0001234")
            .with(FieldId::CancelledCheque, "https://files.example.com/cheque.pdf")
    }

    pub fn valid_form() -> FormState {
        let mut store = FormStore::new();
        store.set(valid_patch());
        store.get().clone()
    }
}
