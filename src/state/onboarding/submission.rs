//! Assembles the organization payload and sends it

use super::field::FieldId;
use super::store::FormState;
use crate::api::{ApiClientTrait, ApiError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub mobile: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetailsPayload {
    pub acc_holder_name: String,
    pub acc_number: String,
    #[serde(rename = "IFSC")]
    pub ifsc: String,
    pub cancelled_cheque: String,
    pub bank_name: String,
    pub branch_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanPayload {
    #[serde(rename = "PAN")]
    pub pan: String,
    pub proof: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GstnPayload {
    #[serde(rename = "GSTN")]
    pub gstn: String,
    pub proof: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDetailsPayload {
    pub name: String,
    pub address: String,
    pub contact_email: String,
    pub contact_mobile: String,
    pub address_proof: String,
    pub id_proof: String,
    pub bank_details: BankDetailsPayload,
    #[serde(rename = "PAN")]
    pub pan: PanPayload,
    #[serde(rename = "GSTN")]
    pub gstn: GstnPayload,
    #[serde(rename = "FSSAI")]
    pub fssai: String,
}

/// Body of the create-organization call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPayload {
    pub user: UserPayload,
    pub provider_details: ProviderDetailsPayload,
}

impl OrganizationPayload {
    /// Nest the flat form values into the shape the API expects
    pub fn assemble(form: &FormState) -> Self {
        let v = |id: FieldId| form.owned(id);
        Self {
            user: UserPayload {
                name: v(FieldId::Name),
                email: v(FieldId::Email),
                mobile: v(FieldId::Mobile),
            },
            provider_details: ProviderDetailsPayload {
                name: v(FieldId::ProviderStoreName),
                address: v(FieldId::Address),
                contact_email: v(FieldId::ContactEmail),
                contact_mobile: v(FieldId::ContactMobile),
                address_proof: v(FieldId::AddressProof),
                id_proof: v(FieldId::IdProof),
                bank_details: BankDetailsPayload {
                    acc_holder_name: v(FieldId::AccHolderName),
                    acc_number: v(FieldId::AccNumber),
                    ifsc: v(FieldId::Ifsc),
                    cancelled_cheque: v(FieldId::CancelledCheque),
                    bank_name: v(FieldId::BankName),
                    branch_name: v(FieldId::BranchName),
                },
                pan: PanPayload {
                    pan: v(FieldId::Pan),
                    proof: v(FieldId::PanProof),
                },
                gstn: GstnPayload {
                    gstn: v(FieldId::Gstn),
                    proof: v(FieldId::GstProof),
                },
                fssai: v(FieldId::Fssai),
            },
        }
    }
}

/// Sends the assembled payload through the API client
pub struct SubmissionAssembler<'a, C: ?Sized> {
    api: &'a C,
}

impl<'a, C> SubmissionAssembler<'a, C>
where
    C: ApiClientTrait + ?Sized,
{
    pub fn new(api: &'a C) -> Self {
        Self { api }
    }

    /// Build the payload from the form and create the organization
    pub async fn submit(&self, form: &FormState) -> Result<(), ApiError> {
        let payload = OrganizationPayload::assemble(form);
        self.api.create_organization(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApiClientTrait;
    use crate::state::onboarding::fixtures::valid_form;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_payload_wire_shape() {
        let payload = OrganizationPayload::assemble(&valid_form());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "user": {
                    "name": "Asha Rao",
                    "email": "asha@example.com",
                    "mobile": "9876543210"
                },
                "providerDetails": {
                    "name": "Rao Fresh Mart",
                    "address": "12 MG Road, Bengaluru",
                    "contactEmail": "store@raofresh.in",
                    "contactMobile": "+91 9123456780",
                    "addressProof": "https://files.example.com/address.pdf",
                    "idProof": "https://files.example.com/id.pdf",
                    "bankDetails": {
                        "accHolderName": "Asha Rao",
                        "accNumber": "001234567890",
                        "IFSC": "SBIN0001234",
                        "cancelledCheque": "https://files.example.com/cheque.pdf",
                        "bankName": "State Bank of India",
                        "branchName": "MG Road"
                    },
                    "PAN": { "PAN": "ABCDE1234F", "proof": "https://files.example.com/pan.pdf" },
                    "GSTN": { "GSTN": "29ABCDE1234F1Z5", "proof": "https://files.example.com/gst.pdf" },
                    "FSSAI": "12345678901234"
                }
            })
        );
    }

    #[test]
    fn test_empty_form_assembles_empty_strings() {
        let payload = OrganizationPayload::assemble(&FormState::default());
        assert_eq!(payload.user.email, "");
        assert_eq!(payload.provider_details.pan.proof, "");
    }

    #[tokio::test]
    async fn test_submit_sends_assembled_payload() {
        let form = valid_form();
        let expected = OrganizationPayload::assemble(&form);

        let mut api = MockApiClientTrait::new();
        api.expect_create_organization()
            .withf(move |payload| payload == &expected)
            .times(1)
            .returning(|_| Ok(()));

        let result = SubmissionAssembler::new(&api).submit(&form).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_submit_passes_failure_through() {
        let mut api = MockApiClientTrait::new();
        api.expect_create_organization()
            .times(1)
            .returning(|_| Err(ApiError::from_response(409, r#"{"error":"duplicate PAN"}"#)));

        let err = SubmissionAssembler::new(&api)
            .submit(&valid_form())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "duplicate PAN");
    }
}
