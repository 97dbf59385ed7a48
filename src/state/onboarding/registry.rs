//! Wizard steps and the fields each one owns

use super::field::{FieldDescriptor, FieldId, InputKind};

const DOCUMENT: InputKind = InputKind::File {
    accept: "pdf/image",
};

static USER_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::new(FieldId::Email, "Email", InputKind::Email)
        .placeholder("Enter email address"),
    FieldDescriptor::new(FieldId::Mobile, "Mobile Number", InputKind::Tel)
        .placeholder("Enter mobile number"),
    FieldDescriptor::new(FieldId::Name, "Name", InputKind::Text).placeholder("Enter full name"),
];

static KYC_DETAIL_FIELDS: [FieldDescriptor; 7] = [
    FieldDescriptor::new(FieldId::ProviderStoreName, "Provider Name", InputKind::Text)
        .placeholder("Enter provider (store) name"),
    FieldDescriptor::new(FieldId::Address, "Registered Address", InputKind::Text)
        .placeholder("Enter registered address"),
    FieldDescriptor::new(FieldId::ContactEmail, "Email", InputKind::Email)
        .placeholder("Enter contact email"),
    FieldDescriptor::new(FieldId::ContactMobile, "Mobile Number", InputKind::Tel)
        .placeholder("Enter contact mobile number"),
    FieldDescriptor::new(FieldId::Pan, "PAN", InputKind::Text)
        .placeholder("Enter PAN")
        .uppercase(),
    FieldDescriptor::new(FieldId::Gstn, "GSTIN", InputKind::Text)
        .placeholder("Enter GSTIN")
        .uppercase(),
    FieldDescriptor::new(FieldId::Fssai, "FSSAI Number", InputKind::Numeric)
        .placeholder("14 digit FSSAI licence number"),
];

static KYC_DOCUMENT_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::new(FieldId::AddressProof, "Address Proof", DOCUMENT)
        .placeholder("Document URL or path"),
    FieldDescriptor::new(FieldId::IdProof, "ID Proof", DOCUMENT)
        .placeholder("Document URL or path"),
    FieldDescriptor::new(FieldId::PanProof, "PAN Card", DOCUMENT)
        .placeholder("Document URL or path"),
    FieldDescriptor::new(FieldId::GstProof, "GSTIN Certificate", DOCUMENT)
        .placeholder("Document URL or path"),
];

static BANK_DETAIL_FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor::new(FieldId::AccHolderName, "Account Holder Name", InputKind::Text)
        .placeholder("Name as per bank records"),
    FieldDescriptor::new(FieldId::AccNumber, "Account Number", InputKind::Numeric)
        .placeholder("Enter account number"),
    FieldDescriptor::new(FieldId::BankName, "Bank Name", InputKind::Text)
        .placeholder("Enter bank name"),
    FieldDescriptor::new(FieldId::BranchName, "Branch Name", InputKind::Text)
        .placeholder("Enter branch name"),
    FieldDescriptor::new(FieldId::Ifsc, "IFSC Code", InputKind::Text)
        .placeholder("Enter IFSC code")
        .uppercase(),
    FieldDescriptor::new(FieldId::CancelledCheque, "Cancelled Cheque", DOCUMENT)
        .placeholder("Document URL or path"),
];

/// One page of the onboarding wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    #[default]
    User,
    KycDetails,
    KycDocuments,
    BankDetails,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::User,
        Step::KycDetails,
        Step::KycDocuments,
        Step::BankDetails,
    ];

    pub const FIRST: Step = Step::User;
    pub const LAST: Step = Step::BankDetails;

    /// 1-based position of the step
    pub fn number(self) -> usize {
        match self {
            Step::User => 1,
            Step::KycDetails => 2,
            Step::KycDocuments => 3,
            Step::BankDetails => 4,
        }
    }

    pub fn from_number(number: usize) -> Option<Self> {
        Self::ALL.get(number.checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    pub fn heading(self) -> &'static str {
        match self {
            Step::User => "Details of Provider",
            Step::KycDetails => "KYC Details",
            Step::KycDocuments => "KYC Documents",
            Step::BankDetails => "Bank Details",
        }
    }

    /// Label of the primary button on this step
    pub fn continue_label(self) -> &'static str {
        if self.is_last() {
            "Invite"
        } else {
            "Continue"
        }
    }

    /// Ordered inputs rendered on this step
    pub fn fields(self) -> &'static [FieldDescriptor] {
        match self {
            Step::User => &USER_FIELDS,
            Step::KycDetails => &KYC_DETAIL_FIELDS,
            Step::KycDocuments => &KYC_DOCUMENT_FIELDS,
            Step::BankDetails => &BANK_DETAIL_FIELDS,
        }
    }

    pub fn field(self, index: usize) -> Option<&'static FieldDescriptor> {
        self.fields().get(index)
    }

    pub fn owns(self, id: FieldId) -> bool {
        self.fields().iter().any(|f| f.id == id)
    }
}

/// Look up the descriptor of a field on whichever step owns it
pub fn descriptor(id: FieldId) -> Option<&'static FieldDescriptor> {
    Step::ALL
        .iter()
        .flat_map(|step| step.fields())
        .find(|f| f.id == id)
}
