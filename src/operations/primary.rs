use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::backend::{ContactsBackend, target_account};
use crate::error::{ManagerError, Result};
use crate::model::{AccountId, ContactInformation};
use crate::operations::Listing;
use crate::prompt::Prompter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountContactInformation {
    pub account: AccountId,
    pub information: ContactInformation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInformationListing {
    pub accounts: Vec<AccountContactInformation>,
}

impl Listing for ContactInformationListing {
    fn root_key(&self) -> &'static str {
        "PrimaryContactInformation"
    }

    fn export_prefix(&self) -> &'static str {
        "primary-contact-information-list"
    }

    fn entries(&self) -> Result<Map<String, Value>> {
        self.accounts
            .iter()
            .map(|record| -> Result<(String, Value)> {
                let value = serde_json::to_value(&record.information)?;
                Ok((record.account.clone(), value))
            })
            .collect()
    }
}

#[instrument(level = "info", skip_all, fields(accounts = accounts.len()))]
pub fn list_contact_information(
    backend: &dyn ContactsBackend,
    caller: &str,
    accounts: &[AccountId],
) -> Result<ContactInformationListing> {
    let mut records = Vec::with_capacity(accounts.len());
    for account in accounts {
        info!(%account, "getting primary contact information");
        let information = backend.get_contact_information(target_account(account, caller))?;
        records.push(AccountContactInformation {
            account: account.clone(),
            information,
        });
    }
    Ok(ContactInformationListing { accounts: records })
}

/// Raw answers of the primary contact information form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city: String,
    pub company_name: String,
    pub country_code: String,
    pub district_or_county: String,
    pub full_name: String,
    pub phone_number: String,
    pub postal_code: String,
    pub state_or_region: String,
    pub website_url: String,
}

impl ContactForm {
    /// Asks every question of the form once, in display order.
    pub fn prompt(prompter: &mut dyn Prompter) -> Result<Self> {
        Ok(Self {
            address_line1: prompter.input(
                "[REQUIRED] Address line 1 (the first line of the primary contact address)",
            )?,
            address_line2: prompter.input(
                "[OPTIONAL] Address line 2 (the second line of the primary contact address, if any)",
            )?,
            address_line3: prompter.input(
                "[OPTIONAL] Address line 3 (the third line of the primary contact address, if any)",
            )?,
            city: prompter.input("[REQUIRED] City (the city of the primary contact address)")?,
            company_name: prompter.input(
                "[OPTIONAL] Company name (the name of the company associated with the primary contact information, if any)",
            )?,
            country_code: prompter.input(
                "[REQUIRED] Country code (the ISO-3166 two-letter country code for the primary contact address)",
            )?,
            district_or_county: prompter.input(
                "[OPTIONAL] District or county (the district or county of the primary contact address, if any)",
            )?,
            full_name: prompter
                .input("[REQUIRED] Full name (the full name of the primary contact address)")?,
            phone_number: prompter.input(
                "[REQUIRED] Phone number (the phone number of the primary contact information)",
            )?,
            postal_code: prompter.input(
                "[REQUIRED] Postal code (the postal code of the primary contact address)",
            )?,
            state_or_region: prompter.input(
                "[OPTIONAL] State or region (the state or region of the primary contact address)",
            )?,
            website_url: prompter.input(
                "[OPTIONAL] Website URL (the URL of the website associated with the primary contact information, if any)",
            )?,
        })
    }

    /// Builds the request payload. Values are trimmed; blank optional fields
    /// are dropped and blank required fields are reported by name.
    pub fn into_payload(self) -> Result<ContactInformation> {
        let mut missing = Vec::new();
        let mut required = |name: &'static str, value: String| {
            let value = value.trim().to_string();
            if value.is_empty() {
                missing.push(name);
            }
            value
        };

        let address_line1 = required("AddressLine1", self.address_line1);
        let city = required("City", self.city);
        let country_code = required("CountryCode", self.country_code);
        let full_name = required("FullName", self.full_name);
        let phone_number = required("PhoneNumber", self.phone_number);
        let postal_code = required("PostalCode", self.postal_code);

        if !missing.is_empty() {
            return Err(ManagerError::MissingRequiredFields(missing));
        }

        Ok(ContactInformation {
            address_line1,
            address_line2: optional(self.address_line2),
            address_line3: optional(self.address_line3),
            city,
            company_name: optional(self.company_name),
            country_code,
            district_or_county: optional(self.district_or_county),
            full_name,
            phone_number,
            postal_code,
            state_or_region: optional(self.state_or_region),
            website_url: optional(self.website_url),
        })
    }
}

fn optional(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Runs the form until every required field is filled in. Each rejected
/// attempt names the empty fields and starts over from the first question.
pub fn prompt_contact_information(prompter: &mut dyn Prompter) -> Result<ContactInformation> {
    loop {
        match ContactForm::prompt(prompter)?.into_payload() {
            Ok(information) => return Ok(information),
            Err(ManagerError::MissingRequiredFields(fields)) => {
                warn!(?fields, "contact information form rejected");
                for field in fields {
                    prompter.say(&format!("Error: The {field} field cannot be empty."));
                }
                prompter.say(
                    "\nSome of the required fields were left empty, please fill in the fields again.\n",
                );
            }
            Err(err) => return Err(err),
        }
    }
}

/// Writes the same primary contact information to every account.
#[instrument(level = "info", skip_all, fields(accounts = accounts.len()))]
pub fn update_contact_information(
    backend: &dyn ContactsBackend,
    caller: &str,
    accounts: &[AccountId],
    information: &ContactInformation,
) -> Result<()> {
    for account in accounts {
        info!(%account, "updating primary contact information");
        backend.put_contact_information(target_account(account, caller), information)?;
    }
    Ok(())
}
