#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

use aws_contacts_manager::backend::ContactsBackend;
use aws_contacts_manager::error::{RESOURCE_NOT_FOUND, RemoteError};
use aws_contacts_manager::model::{
    AccountPage, AlternateContact, AlternateContactKind, ContactInformation, OrgAccount,
    PrimaryEmailUpdateStatus,
};
use aws_contacts_manager::prompt::Prompter;
use aws_contacts_manager::Result;

pub const CALLER: &str = "000000000000";
pub const MEMBER_A: &str = "111111111111";
pub const MEMBER_B: &str = "222222222222";
pub const VALID_OTP: &str = "123456";

/// In-memory organization with the account contact APIs on top.
pub struct FakeBackend {
    pub caller: String,
    pub accounts: Vec<OrgAccount>,
    pub page_size: usize,
    pub parents: HashMap<String, Vec<OrgAccount>>,
    pub alternate: RefCell<HashMap<(String, AlternateContactKind), AlternateContact>>,
    pub contact_information: RefCell<HashMap<String, ContactInformation>>,
    pub primary_emails: RefCell<HashMap<String, String>>,
    pub pending_emails: RefCell<HashMap<String, String>>,
    pub objects: RefCell<Vec<(String, String, Vec<u8>)>>,
    pub failing: RefCell<HashSet<(&'static str, String)>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn new(caller: &str, accounts: Vec<OrgAccount>) -> Self {
        Self {
            caller: caller.to_string(),
            accounts,
            page_size: 2,
            parents: HashMap::new(),
            alternate: RefCell::new(HashMap::new()),
            contact_information: RefCell::new(HashMap::new()),
            primary_emails: RefCell::new(HashMap::new()),
            pending_emails: RefCell::new(HashMap::new()),
            objects: RefCell::new(Vec::new()),
            failing: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Caller account plus the two member accounts.
    pub fn organization() -> Self {
        Self::new(
            CALLER,
            vec![
                OrgAccount::new(CALLER, "management", "ACTIVE"),
                OrgAccount::new(MEMBER_A, "workloads", "ACTIVE"),
                OrgAccount::new(MEMBER_B, "sandbox", "SUSPENDED"),
            ],
        )
    }

    pub fn with_alternate(
        self,
        account: &str,
        kind: AlternateContactKind,
        contact: AlternateContact,
    ) -> Self {
        self.alternate
            .borrow_mut()
            .insert((account.to_string(), kind), contact);
        self
    }

    pub fn with_contact_information(self, account: &str, information: ContactInformation) -> Self {
        self.contact_information
            .borrow_mut()
            .insert(account.to_string(), information);
        self
    }

    pub fn with_primary_email(self, account: &str, email: &str) -> Self {
        self.primary_emails
            .borrow_mut()
            .insert(account.to_string(), email.to_string());
        self
    }

    pub fn with_parent(mut self, parent: &str, accounts: Vec<OrgAccount>) -> Self {
        self.parents.insert(parent.to_string(), accounts);
        self
    }

    /// Makes `operation` fail with an access denied fault for `account`.
    pub fn fail(&self, operation: &'static str, account: &str) {
        self.failing
            .borrow_mut()
            .insert((operation, account.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.split(':').next() == Some(operation))
            .count()
    }

    fn resolve(&self, account: Option<&str>) -> String {
        account.unwrap_or(&self.caller).to_string()
    }

    fn record(&self, operation: &'static str, account: Option<&str>, detail: &str) -> Result<()> {
        let target = account.unwrap_or("self");
        self.calls
            .borrow_mut()
            .push(format!("{operation}:{target}:{detail}"));
        let resolved = self.resolve(account);
        if self.failing.borrow().contains(&(operation, resolved)) {
            return Err(RemoteError::new(
                operation,
                Some("AccessDeniedException".to_string()),
                "access denied",
            )
            .into());
        }
        Ok(())
    }

    fn page(accounts: &[OrgAccount], page_size: usize, token: Option<&str>) -> AccountPage {
        let start: usize = token.and_then(|token| token.parse().ok()).unwrap_or(0);
        let end = (start + page_size).min(accounts.len());
        AccountPage {
            accounts: accounts[start..end].to_vec(),
            next_token: (end < accounts.len()).then(|| end.to_string()),
        }
    }
}

fn not_found(operation: &'static str) -> aws_contacts_manager::ManagerError {
    RemoteError::new(operation, Some(RESOURCE_NOT_FOUND.to_string()), "not found").into()
}

impl ContactsBackend for FakeBackend {
    fn caller_account_id(&self) -> Result<String> {
        Ok(self.caller.clone())
    }

    fn list_accounts(&self, next_token: Option<&str>) -> Result<AccountPage> {
        self.record("ListAccounts", None, next_token.unwrap_or("-"))?;
        Ok(Self::page(&self.accounts, self.page_size, next_token))
    }

    fn list_accounts_for_parent(
        &self,
        parent_id: &str,
        next_token: Option<&str>,
    ) -> Result<AccountPage> {
        self.record("ListAccountsForParent", None, parent_id)?;
        let accounts = self.parents.get(parent_id).cloned().unwrap_or_default();
        Ok(Self::page(&accounts, self.page_size, next_token))
    }

    fn get_alternate_contact(
        &self,
        account: Option<&str>,
        kind: AlternateContactKind,
    ) -> Result<AlternateContact> {
        self.record("GetAlternateContact", account, kind.api_name())?;
        self.alternate
            .borrow()
            .get(&(self.resolve(account), kind))
            .cloned()
            .ok_or_else(|| not_found("GetAlternateContact"))
    }

    fn put_alternate_contact(
        &self,
        account: Option<&str>,
        kind: AlternateContactKind,
        contact: &AlternateContact,
    ) -> Result<()> {
        self.record("PutAlternateContact", account, kind.api_name())?;
        self.alternate
            .borrow_mut()
            .insert((self.resolve(account), kind), contact.clone());
        Ok(())
    }

    fn delete_alternate_contact(
        &self,
        account: Option<&str>,
        kind: AlternateContactKind,
    ) -> Result<()> {
        self.record("DeleteAlternateContact", account, kind.api_name())?;
        self.alternate
            .borrow_mut()
            .remove(&(self.resolve(account), kind))
            .map(|_| ())
            .ok_or_else(|| not_found("DeleteAlternateContact"))
    }

    fn get_contact_information(&self, account: Option<&str>) -> Result<ContactInformation> {
        self.record("GetContactInformation", account, "-")?;
        Ok(self
            .contact_information
            .borrow()
            .get(&self.resolve(account))
            .cloned()
            .unwrap_or_else(sample_contact_information))
    }

    fn put_contact_information(
        &self,
        account: Option<&str>,
        information: &ContactInformation,
    ) -> Result<()> {
        self.record("PutContactInformation", account, "-")?;
        self.contact_information
            .borrow_mut()
            .insert(self.resolve(account), information.clone());
        Ok(())
    }

    fn get_primary_email(&self, account: &str) -> Result<String> {
        self.record("GetPrimaryEmail", Some(account), "-")?;
        Ok(self
            .primary_emails
            .borrow()
            .get(account)
            .cloned()
            .unwrap_or_else(|| format!("root+{account}@example.com")))
    }

    fn start_primary_email_update(&self, account: Option<&str>, email: &str) -> Result<()> {
        self.record("StartPrimaryEmailUpdate", account, email)?;
        self.pending_emails
            .borrow_mut()
            .insert(self.resolve(account), email.to_string());
        Ok(())
    }

    fn accept_primary_email_update(
        &self,
        account: Option<&str>,
        otp: &str,
        email: &str,
    ) -> Result<PrimaryEmailUpdateStatus> {
        self.record("AcceptPrimaryEmailUpdate", account, otp)?;
        let resolved = self.resolve(account);
        let started = self.pending_emails.borrow().get(&resolved).cloned();
        if otp == VALID_OTP && started.as_deref() == Some(email) {
            self.pending_emails.borrow_mut().remove(&resolved);
            self.primary_emails
                .borrow_mut()
                .insert(resolved, email.to_string());
            Ok(PrimaryEmailUpdateStatus::Accepted)
        } else {
            Ok(PrimaryEmailUpdateStatus::Pending)
        }
    }

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        self.record("PutObject", None, bucket)?;
        if bucket == "missing-bucket" {
            return Err(RemoteError::new(
                "PutObject",
                Some("NoSuchBucket".to_string()),
                "bucket does not exist",
            )
            .into());
        }
        self.objects
            .borrow_mut()
            .push((bucket.to_string(), key.to_string(), body));
        Ok(())
    }
}

pub fn sample_contact_information() -> ContactInformation {
    ContactInformation {
        address_line1: "1 Main Street".to_string(),
        city: "Seattle".to_string(),
        country_code: "US".to_string(),
        full_name: "Jane Doe".to_string(),
        phone_number: "+1 206 555 0100".to_string(),
        postal_code: "98101".to_string(),
        ..ContactInformation::default()
    }
}

pub fn billing_contact() -> AlternateContact {
    AlternateContact {
        name: "Billing Team".to_string(),
        title: "Billing Internal Team".to_string(),
        email_address: "billing.team@example.com".to_string(),
        phone_number: "(000) 000-0000".to_string(),
    }
}

/// Answer fed to the next prompt.
#[derive(Debug, Clone)]
pub enum Answer {
    Select(usize),
    Input(&'static str),
    Confirm(bool),
}

/// Prompter replaying a fixed script and recording everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    fn next(&mut self, prompt: &str) -> Answer {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for prompt {prompt:?}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, title: &str, items: &[String]) -> Result<usize> {
        match self.next(title) {
            Answer::Select(index) => {
                assert!(index < items.len(), "index {index} out of range for {items:?}");
                Ok(index)
            }
            other => panic!("expected a selection for {title:?}, script has {other:?}"),
        }
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        match self.next(prompt) {
            Answer::Input(text) => Ok(text.to_string()),
            other => panic!("expected text for {prompt:?}, script has {other:?}"),
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        match self.next(prompt) {
            Answer::Confirm(answer) => Ok(answer),
            other => panic!("expected a confirmation for {prompt:?}, script has {other:?}"),
        }
    }

    fn say(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}
