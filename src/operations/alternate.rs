use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::backend::{ContactsBackend, target_account};
use crate::error::{ManagerError, Result};
use crate::model::{AccountId, AlternateContact, AlternateContactKind};
use crate::operations::Listing;
use crate::prompt::Prompter;

/// Marker rendered for an alternate contact slot that is not configured.
pub const NOT_CONFIGURED: &str = "Null";

/// Alternate contacts fetched for one account, in the order they were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAlternateContacts {
    pub account: AccountId,
    pub contacts: Vec<(AlternateContactKind, Option<AlternateContact>)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateContactListing {
    pub accounts: Vec<AccountAlternateContacts>,
}

impl Listing for AlternateContactListing {
    fn root_key(&self) -> &'static str {
        "AlternateContact"
    }

    fn export_prefix(&self) -> &'static str {
        "alternate-contact-list"
    }

    fn entries(&self) -> Result<Map<String, Value>> {
        self.accounts
            .iter()
            .map(|record| -> Result<(String, Value)> {
                let contacts = record
                    .contacts
                    .iter()
                    .map(|(kind, contact)| -> Result<(String, Value)> {
                        let value = match contact {
                            Some(contact) => serde_json::to_value(contact)?,
                            None => Value::String(NOT_CONFIGURED.to_string()),
                        };
                        Ok((kind.label().to_string(), value))
                    })
                    .collect::<Result<Map<String, Value>>>()?;
                Ok((record.account.clone(), Value::Object(contacts)))
            })
            .collect()
    }
}

/// Fetches the requested alternate contact types of every account. A contact
/// that is not configured is recorded as `None`.
#[instrument(level = "info", skip_all, fields(accounts = accounts.len(), ?kinds))]
pub fn list_alternate_contacts(
    backend: &dyn ContactsBackend,
    caller: &str,
    accounts: &[AccountId],
    kinds: &[AlternateContactKind],
) -> Result<AlternateContactListing> {
    let mut records = Vec::with_capacity(accounts.len());
    for account in accounts {
        let mut contacts = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            info!(%account, %kind, "getting alternate contact");
            contacts.push((kind, fetch_alternate_contact(backend, caller, account, kind)?));
        }
        records.push(AccountAlternateContacts {
            account: account.clone(),
            contacts,
        });
    }
    Ok(AlternateContactListing { accounts: records })
}

/// Single alternate contact lookup mapping "not found" to `None`.
pub fn fetch_alternate_contact(
    backend: &dyn ContactsBackend,
    caller: &str,
    account: &str,
    kind: AlternateContactKind,
) -> Result<Option<AlternateContact>> {
    match backend.get_alternate_contact(target_account(account, caller), kind) {
        Ok(contact) => Ok(Some(contact)),
        Err(ManagerError::Remote(err)) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Asks once for the contact details applied by [`update_alternate_contacts`].
/// The examples in the prompts are derived from `kind`.
pub fn prompt_alternate_contact(
    prompter: &mut dyn Prompter,
    kind: AlternateContactKind,
) -> Result<AlternateContact> {
    let label = kind.label();
    let email_address = prompter.input(&format!(
        "Type the email address (E.g. {}.team@email.com)",
        label.to_lowercase()
    ))?;
    let name = prompter.input(&format!("Type the name (E.g. {label} Team)"))?;
    let phone_number = prompter.input("Type the phone number (E.g. (000) 000-0000)")?;
    let title = prompter.input(&format!("Type the title (E.g. {label} Internal Team)"))?;
    Ok(AlternateContact {
        name,
        title,
        email_address,
        phone_number,
    })
}

/// Writes the same contact into every requested slot of every account.
#[instrument(level = "info", skip_all, fields(accounts = accounts.len(), ?kinds))]
pub fn update_alternate_contacts(
    backend: &dyn ContactsBackend,
    caller: &str,
    accounts: &[AccountId],
    kinds: &[AlternateContactKind],
    contact: &AlternateContact,
) -> Result<()> {
    for account in accounts {
        for &kind in kinds {
            info!(%account, %kind, "updating alternate contact");
            backend.put_alternate_contact(target_account(account, caller), kind, contact)?;
        }
    }
    Ok(())
}

/// Removes the requested slots. Slots that are already empty are skipped.
#[instrument(level = "info", skip_all, fields(accounts = accounts.len(), ?kinds))]
pub fn delete_alternate_contacts(
    backend: &dyn ContactsBackend,
    caller: &str,
    accounts: &[AccountId],
    kinds: &[AlternateContactKind],
) -> Result<()> {
    for account in accounts {
        for &kind in kinds {
            info!(%account, %kind, "deleting alternate contact");
            match backend.delete_alternate_contact(target_account(account, caller), kind) {
                Ok(()) => {}
                Err(ManagerError::Remote(err)) if err.is_not_found() => {
                    info!(%account, %kind, "alternate contact was not configured");
                }
                Err(err) => return Err(err),
            }
        }
    }
    Ok(())
}
