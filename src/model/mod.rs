use std::fmt;

use serde::{Deserialize, Serialize};

/// AWS account identifier. Kept as the plain 12 digit string the APIs use.
pub type AccountId = String;

/// Value reported in place of the root email of the caller's management account,
/// which the account API cannot return.
pub const MANAGEMENT_ROOT_EMAIL: &str = "management account - not available";

/// Length of every AWS account identifier.
pub const ACCOUNT_ID_LEN: usize = 12;

/// Returns true for exactly twelve ASCII digits.
pub fn is_well_formed_account_id(id: &str) -> bool {
    id.len() == ACCOUNT_ID_LEN && id.bytes().all(|byte| byte.is_ascii_digit())
}

/// The three alternate contact slots an account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlternateContactKind {
    Billing,
    Operations,
    Security,
}

impl AlternateContactKind {
    /// Every kind, in report column order.
    pub const ALL: [AlternateContactKind; 3] = [
        AlternateContactKind::Billing,
        AlternateContactKind::Operations,
        AlternateContactKind::Security,
    ];

    /// Title-case label used in menus and listings.
    pub fn label(self) -> &'static str {
        match self {
            AlternateContactKind::Billing => "Billing",
            AlternateContactKind::Operations => "Operations",
            AlternateContactKind::Security => "Security",
        }
    }

    /// Upper-case name the account API expects.
    pub fn api_name(self) -> &'static str {
        match self {
            AlternateContactKind::Billing => "BILLING",
            AlternateContactKind::Operations => "OPERATIONS",
            AlternateContactKind::Security => "SECURITY",
        }
    }
}

impl fmt::Display for AlternateContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An alternate contact record. The contact type is implied by the slot it is
/// stored in and therefore not part of the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlternateContact {
    pub name: String,
    pub title: String,
    pub email_address: String,
    pub phone_number: String,
}

/// Primary contact information of an account. Optional members are only
/// serialized when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactInformation {
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line3: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_or_county: Option<String>,
    pub full_name: String,
    pub phone_number: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_or_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

/// Directory entry of an account in the organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgAccount {
    pub id: AccountId,
    pub name: String,
    pub status: String,
}

impl OrgAccount {
    pub fn new(
        id: impl Into<AccountId>,
        name: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: status.into(),
        }
    }
}

/// One page of an organization account listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPage {
    pub accounts: Vec<OrgAccount>,
    pub next_token: Option<String>,
}

/// Outcome of confirming a root email change with a one-time password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryEmailUpdateStatus {
    Accepted,
    Pending,
}
