use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::backend::{ContactsBackend, target_account};
use crate::error::{ManagerError, Result};
use crate::model::{AccountId, MANAGEMENT_ROOT_EMAIL, PrimaryEmailUpdateStatus};
use crate::operations::Listing;
use crate::prompt::Prompter;
use crate::style::Style;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEmailListing {
    pub accounts: Vec<(AccountId, String)>,
}

impl Listing for RootEmailListing {
    fn root_key(&self) -> &'static str {
        "RootEmailAddresses"
    }

    fn export_prefix(&self) -> &'static str {
        "root-email-address-list"
    }

    fn entries(&self) -> Result<Map<String, Value>> {
        Ok(self
            .accounts
            .iter()
            .map(|(account, email)| (account.clone(), Value::String(email.clone())))
            .collect())
    }
}

/// Root email of `account`, or [`MANAGEMENT_ROOT_EMAIL`] for the caller's account.
pub fn fetch_root_email(
    backend: &dyn ContactsBackend,
    caller: &str,
    account: &str,
) -> Result<String> {
    if account == caller {
        return Ok(MANAGEMENT_ROOT_EMAIL.to_string());
    }
    backend.get_primary_email(account)
}

#[instrument(level = "info", skip_all, fields(accounts = accounts.len()))]
pub fn list_root_emails(
    backend: &dyn ContactsBackend,
    caller: &str,
    accounts: &[AccountId],
) -> Result<RootEmailListing> {
    let mut records = Vec::with_capacity(accounts.len());
    for account in accounts {
        info!(%account, "getting root email address");
        records.push((account.clone(), fetch_root_email(backend, caller, account)?));
    }
    Ok(RootEmailListing { accounts: records })
}

/// Syntax check for `local@domain.tld` with a two to seven letter top-level label.
pub fn is_valid_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let local_ok = local.starts_with(|ch: char| ch.is_ascii_alphanumeric() || ch == '_')
        && local
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || "._%+-".contains(ch));
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '-');
    let tld_ok = (2..=7).contains(&tld.len())
        && tld.chars().all(|ch| ch.is_ascii_alphabetic() || ch == '|')
        && tld.ends_with(|ch: char| ch.is_ascii_alphabetic());

    local_ok && host_ok && tld_ok
}

/// Per-account progress of a root email update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Pending,
    Done,
}

impl UpdateState {
    pub fn glyph(self) -> char {
        match self {
            UpdateState::Pending => '⟳',
            UpdateState::Done => '✔',
        }
    }
}

/// Tracks which accounts still need their root email changed. Accounts are
/// kept sorted and only ever move from pending to done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEmailProgress {
    entries: Vec<(AccountId, UpdateState)>,
}

impl RootEmailProgress {
    pub fn new(accounts: &[AccountId]) -> Self {
        let mut entries: Vec<(AccountId, UpdateState)> = accounts
            .iter()
            .map(|account| (account.clone(), UpdateState::Pending))
            .collect();
        entries.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0));
        Self { entries }
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, state)| *state == UpdateState::Pending)
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.pending_count() == 0
    }

    pub fn state_of(&self, account: &str) -> Option<UpdateState> {
        self.entries
            .iter()
            .find(|(id, _)| id == account)
            .map(|(_, state)| *state)
    }

    /// Menu lines such as `⟳ - 111111111111`.
    pub fn menu_items(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(account, state)| format!("{} - {account}", state.glyph()))
            .collect()
    }

    pub fn account_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(account, _)| account.as_str())
    }

    pub fn mark_done(&mut self, account: &str) {
        for (id, state) in &mut self.entries {
            if id == account {
                *state = UpdateState::Done;
            }
        }
    }
}

/// Interactive root email update over `accounts`.
///
/// The user repeatedly picks an account (done ones included), types the new
/// address and confirms it with the one-time password sent to that address.
/// The run ends once every account is done; any remote error ends it early.
#[instrument(level = "info", skip_all, fields(accounts = accounts.len()))]
pub fn update_root_emails(
    backend: &dyn ContactsBackend,
    caller: &str,
    accounts: &[AccountId],
    prompter: &mut dyn Prompter,
    style: Style,
) -> Result<RootEmailProgress> {
    let mut progress = RootEmailProgress::new(accounts);

    while !progress.is_complete() {
        let title = format!(
            "Select the AWS account to update the root email ({} AWS account(s) left):",
            progress.pending_count()
        );
        let index = prompter.select(&title, &progress.menu_items())?;
        let account = progress
            .account_at(index)
            .ok_or_else(|| {
                ManagerError::InvalidRequest(format!("no account at menu index {index}"))
            })?
            .to_string();
        prompter.say(&format!(
            "{}{}{}{}\n",
            style.info("You have selected to "),
            style.value("Update"),
            style.info(" the root email of the AWS Account "),
            style.value(&account),
        ));

        let email = prompt_email(prompter)?;
        change_root_email(backend, caller, &account, &email, prompter)?;
        progress.mark_done(&account);
        prompter.say(&format!(
            "\n{}{}{}{}{}\n",
            style.info("New root email updated to "),
            style.value(&email),
            style.info(" to AWS account "),
            style.value(&account),
            style.info(" successfully."),
        ));
    }

    prompter.say(&style.success("✔ All new root email updated successfully."));
    Ok(progress)
}

fn prompt_email(prompter: &mut dyn Prompter) -> Result<String> {
    loop {
        let email = prompter.input("Type the new root email address")?;
        if is_valid_email(&email) {
            return Ok(email);
        }
        prompter.say("Invalid email, try it again.");
    }
}

/// Starts the change for one account and asks for the one-time password until
/// the service accepts it.
#[instrument(level = "info", skip(backend, caller, prompter))]
pub fn change_root_email(
    backend: &dyn ContactsBackend,
    caller: &str,
    account: &str,
    email: &str,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let target = target_account(account, caller);
    backend.start_primary_email_update(target, email)?;
    info!("one-time password sent");

    loop {
        let otp = prompter.input(&format!(
            "\nType the one-time password (OTP) received at {email}"
        ))?;
        match backend.accept_primary_email_update(target, &otp, email)? {
            PrimaryEmailUpdateStatus::Accepted => {
                info!("root email change accepted");
                return Ok(());
            }
            PrimaryEmailUpdateStatus::Pending => warn!("root email change still pending"),
        }
    }
}
