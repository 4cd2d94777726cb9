//! Remote service seam.
//!
//! Every remote call the tool makes goes through [`ContactsBackend`]. The
//! production implementation lives in [`aws`]; tests drive the operations with
//! an in-memory implementation instead.
//!
//! Methods taking `account: Option<&str>` follow the account API convention
//! that the caller's own account is addressed by omitting the account ID. Use
//! [`target_account`] to derive that argument.

pub mod aws;

use crate::error::Result;
use crate::model::{
    AccountPage, AlternateContact, AlternateContactKind, ContactInformation,
    PrimaryEmailUpdateStatus,
};

/// Blocking access to the directory, account-contact and object-storage services.
pub trait ContactsBackend {
    /// Account ID of the credentials in use.
    fn caller_account_id(&self) -> Result<String>;

    /// One page of every account in the organization.
    fn list_accounts(&self, next_token: Option<&str>) -> Result<AccountPage>;

    /// One page of the accounts directly under an organizational unit or root.
    fn list_accounts_for_parent(&self, parent_id: &str, next_token: Option<&str>)
    -> Result<AccountPage>;

    fn get_alternate_contact(
        &self,
        account: Option<&str>,
        kind: AlternateContactKind,
    ) -> Result<AlternateContact>;

    fn put_alternate_contact(
        &self,
        account: Option<&str>,
        kind: AlternateContactKind,
        contact: &AlternateContact,
    ) -> Result<()>;

    fn delete_alternate_contact(&self, account: Option<&str>, kind: AlternateContactKind)
    -> Result<()>;

    fn get_contact_information(&self, account: Option<&str>) -> Result<ContactInformation>;

    fn put_contact_information(
        &self,
        account: Option<&str>,
        information: &ContactInformation,
    ) -> Result<()>;

    /// Root email of a member account. Not available for the management account.
    fn get_primary_email(&self, account: &str) -> Result<String>;

    /// Sends a one-time password to `email` to start a root email change.
    fn start_primary_email_update(&self, account: Option<&str>, email: &str) -> Result<()>;

    fn accept_primary_email_update(
        &self,
        account: Option<&str>,
        otp: &str,
        email: &str,
    ) -> Result<PrimaryEmailUpdateStatus>;

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;
}

/// Returns `None` when `account` is the caller's own account.
pub fn target_account<'a>(account: &'a str, caller: &str) -> Option<&'a str> {
    if account == caller { None } else { Some(account) }
}
