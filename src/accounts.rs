//! Account selection: turning what the user typed into a validated set of
//! account IDs.

use tracing::{debug, info, instrument};

use crate::backend::ContactsBackend;
use crate::error::{ManagerError, Result};
use crate::model::{AccountId, AccountPage, OrgAccount, is_well_formed_account_id};

/// What the user asked for at the account prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSelector {
    /// Every account in the organization.
    All,
    /// Accounts directly under an organizational unit (`ou-…`) or root (`r-…`).
    Parent(String),
    /// A literal, comma separated list.
    Explicit(Vec<AccountId>),
}

impl AccountSelector {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "all" {
            AccountSelector::All
        } else if raw.starts_with("ou") || raw.starts_with("r-") {
            AccountSelector::Parent(raw.to_string())
        } else {
            let compact: String = raw.chars().filter(|ch| *ch != ' ').collect();
            AccountSelector::Explicit(compact.split(',').map(str::to_string).collect())
        }
    }

    /// Expands the selector into account IDs. Explicit lists are returned as typed.
    pub fn resolve(&self, backend: &dyn ContactsBackend) -> Result<Vec<AccountId>> {
        match self {
            AccountSelector::All => Ok(ids(list_organization_accounts(backend)?)),
            AccountSelector::Parent(parent) => Ok(ids(list_parent_accounts(backend, parent)?)),
            AccountSelector::Explicit(accounts) => Ok(accounts.clone()),
        }
    }
}

/// Every account in the organization, following continuation tokens until the
/// listing is exhausted.
#[instrument(level = "debug", skip_all)]
pub fn list_organization_accounts(backend: &dyn ContactsBackend) -> Result<Vec<OrgAccount>> {
    collect_pages(|token| backend.list_accounts(token))
}

/// Every account directly under `parent`.
#[instrument(level = "debug", skip(backend))]
pub fn list_parent_accounts(
    backend: &dyn ContactsBackend,
    parent: &str,
) -> Result<Vec<OrgAccount>> {
    collect_pages(|token| backend.list_accounts_for_parent(parent, token))
}

fn collect_pages<F>(mut fetch: F) -> Result<Vec<OrgAccount>>
where
    F: FnMut(Option<&str>) -> Result<AccountPage>,
{
    let mut accounts = Vec::new();
    let mut next_token: Option<String> = None;
    loop {
        let page = fetch(next_token.as_deref())?;
        debug!(page_size = page.accounts.len(), "fetched account page");
        accounts.extend(page.accounts);
        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }
    Ok(accounts)
}

fn ids(accounts: Vec<OrgAccount>) -> Vec<AccountId> {
    accounts.into_iter().map(|account| account.id).collect()
}

/// Checks that every account is a well formed ID and a member of the
/// organization. Shape is checked for all entries before the organization
/// listing is fetched, so malformed input never costs a remote call.
#[instrument(level = "info", skip_all, fields(account_count = accounts.len()))]
pub fn validate_accounts(backend: &dyn ContactsBackend, accounts: &[AccountId]) -> Result<()> {
    if accounts.is_empty() {
        return Err(ManagerError::EmptyAccountSelection);
    }
    if let Some(bad) = accounts.iter().find(|id| !is_well_formed_account_id(id)) {
        return Err(ManagerError::InvalidAccountId(bad.clone()));
    }

    let members = ids(list_organization_accounts(backend)?);
    if let Some(outsider) = accounts.iter().find(|id| !members.contains(id)) {
        return Err(ManagerError::AccountNotInOrganization(outsider.clone()));
    }
    info!("all selected accounts belong to the organization");
    Ok(())
}

/// Removes repeated IDs, keeping the first occurrence of each.
pub fn dedup_accounts(accounts: Vec<AccountId>) -> Vec<AccountId> {
    let mut unique: Vec<AccountId> = Vec::with_capacity(accounts.len());
    for account in accounts {
        if !unique.contains(&account) {
            unique.push(account);
        }
    }
    unique
}
