//! Form field value objects

use std::fmt;

/// Key of a single onboarding input.
///
/// The set is closed: every key a step renders or a rule checks is listed
/// here, so the form state can never be asked for an unknown field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    // User
    Email,
    Mobile,
    Name,
    // KYC details
    ProviderStoreName,
    Address,
    ContactEmail,
    ContactMobile,
    Pan,
    Gstn,
    Fssai,
    // KYC documents
    AddressProof,
    IdProof,
    PanProof,
    GstProof,
    // Bank details
    AccHolderName,
    AccNumber,
    BankName,
    BranchName,
    Ifsc,
    CancelledCheque,
}

impl FieldId {
    pub const ALL: [FieldId; 20] = [
        FieldId::Email,
        FieldId::Mobile,
        FieldId::Name,
        FieldId::ProviderStoreName,
        FieldId::Address,
        FieldId::ContactEmail,
        FieldId::ContactMobile,
        FieldId::Pan,
        FieldId::Gstn,
        FieldId::Fssai,
        FieldId::AddressProof,
        FieldId::IdProof,
        FieldId::PanProof,
        FieldId::GstProof,
        FieldId::AccHolderName,
        FieldId::AccNumber,
        FieldId::BankName,
        FieldId::BranchName,
        FieldId::Ifsc,
        FieldId::CancelledCheque,
    ];

    /// Key used by the back-office API for this field
    pub fn key(self) -> &'static str {
        match self {
            FieldId::Email => "email",
            FieldId::Mobile => "mobile",
            FieldId::Name => "name",
            FieldId::ProviderStoreName => "providerStoreName",
            FieldId::Address => "address",
            FieldId::ContactEmail => "contactEmail",
            FieldId::ContactMobile => "contactMobile",
            FieldId::Pan => "PAN",
            FieldId::Gstn => "GSTN",
            FieldId::Fssai => "FSSAI",
            FieldId::AddressProof => "address_proof",
            FieldId::IdProof => "id_proof",
            FieldId::PanProof => "PAN_proof",
            FieldId::GstProof => "GST_proof",
            FieldId::AccHolderName => "accHolderName",
            FieldId::AccNumber => "accNumber",
            FieldId::BankName => "bankName",
            FieldId::BranchName => "branchName",
            FieldId::Ifsc => "IFSC",
            FieldId::CancelledCheque => "cancelledCheque",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How an input is edited and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    /// Digits only; other characters are dropped on input
    Numeric,
    /// Reference to an uploaded document (URL or local path)
    File { accept: &'static str },
}

impl InputKind {
    /// Whether a typed character is accepted into a field of this kind
    pub fn accepts(&self, c: char) -> bool {
        match self {
            InputKind::Numeric => c.is_ascii_digit(),
            InputKind::Tel => c.is_ascii_digit() || matches!(c, '+' | '-' | ' '),
            InputKind::Email => !c.is_whitespace(),
            InputKind::Text | InputKind::File { .. } => !c.is_control(),
        }
    }

    /// Short tag shown next to the field label
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            InputKind::Email => Some("email"),
            InputKind::Tel => Some("phone"),
            InputKind::Numeric => Some("digits"),
            InputKind::File { accept } => Some(accept),
            InputKind::Text => None,
        }
    }
}

/// Static metadata describing one onboarding input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
    pub placeholder: Option<&'static str>,
    /// Typed letters are upper-cased (registration numbers)
    pub uppercase: bool,
}

impl FieldDescriptor {
    pub const fn new(id: FieldId, label: &'static str, kind: InputKind) -> Self {
        Self {
            id,
            label,
            kind,
            required: true,
            placeholder: None,
            uppercase: false,
        }
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub const fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    /// Normalize a typed character for this field, or reject it
    pub fn normalize_char(&self, c: char) -> Option<char> {
        if !self.kind.accepts(c) {
            return None;
        }
        if self.uppercase {
            Some(c.to_ascii_uppercase())
        } else {
            Some(c)
        }
    }

    /// Label with the required marker, as shown in the form
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.to_string()
        }
    }
}
