//! Interactive session.
//!
//! [`Shell::read_command`] walks the user through the menus and produces a
//! [`Command`]; [`Shell::dispatch`] executes it. Keeping the two apart lets
//! tests dispatch commands directly.

pub mod command;

use std::time::Instant;

use chrono::Local;
use serde_json::Value;
use tracing::{error, info, info_span};

use crate::accounts::{AccountSelector, dedup_accounts, validate_accounts};
use crate::backend::ContactsBackend;
use crate::config::Settings;
use crate::error::{ManagerError, Result};
use crate::io::object_store::export_json;
use crate::model::{AccountId, AlternateContactKind};
use crate::operations::Listing;
use crate::operations::alternate::{
    delete_alternate_contacts, list_alternate_contacts, prompt_alternate_contact,
    update_alternate_contacts,
};
use crate::operations::primary::{
    list_contact_information, prompt_contact_information, update_contact_information,
};
use crate::operations::root_email::{list_root_emails, update_root_emails};
use crate::prompt::Prompter;
use crate::report::generate_report;
use crate::style::Style;

pub use command::{Action, Command, ContactArea};

const ACCOUNTS_PROMPT: &str =
    "AWS account ID(s) (enter a list of AWS account IDs separated by comma / Organizational unit ID / all)";
const DELETE_ACCOUNT_PROMPT: &str =
    "AWS account ID (delete action allowed for one AWS account at a time)";

pub struct Shell<B, P> {
    backend: B,
    prompter: P,
    settings: Settings,
    style: Style,
}

impl<B: ContactsBackend, P: Prompter> Shell<B, P> {
    pub fn new(backend: B, prompter: P, settings: Settings) -> Self {
        let style = Style::new(settings.color);
        Self {
            backend,
            prompter,
            settings,
            style,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Runs sessions until the user declines to continue. Validation failures
    /// end the loop with an error; failed operations are reported and the user
    /// may start over.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.banner();
            let caller = self.backend.caller_account_id()?;

            if let Some(command) = self.read_command()? {
                self.execute(&caller, command)?;
            }

            if !self
                .prompter
                .confirm("Would you like to run the AWS Contacts Manager tool again?")?
            {
                break;
            }
        }
        Ok(())
    }

    /// Dispatches `command`, timing it and reporting its outcome. Only
    /// validation failures are returned as errors.
    pub fn execute(&mut self, caller: &str, command: Command) -> Result<()> {
        let span = info_span!("command", name = command.name());
        let _guard = span.enter();
        let started = Instant::now();

        match self.dispatch(caller, command) {
            Ok(()) => {
                let elapsed = started.elapsed().as_secs_f64();
                info!(elapsed, "command completed");
                self.prompter
                    .say(&format!("\nCompleted successfully in {elapsed:0.4} seconds!\n"));
                Ok(())
            }
            Err(err) if err.is_validation() => Err(err),
            Err(err) => {
                error!(error = %err, "command failed");
                self.prompter.say(&format!("\n{}", self.style.error(&err.to_string())));
                self.prompter.say("\nERROR: something went wrong.\n");
                Ok(())
            }
        }
    }

    fn banner(&mut self) {
        self.prompter.say(&format!("\n{}", self.style.title("Contacts Manager")));
        self.prompter.say(&self.style.italic(
            "Solution developed for batch management of AWS accounts contacts.\n",
        ));
    }

    /// Walks the menus. Returns `None` when the selection was refused without
    /// being an error, e.g. too many accounts for a root email update.
    pub fn read_command(&mut self) -> Result<Option<Command>> {
        let area = self.choose(
            "Choose the contact type or report:",
            &ContactArea::ALL,
            ContactArea::label,
        )?;
        self.prompter.say(&format!(
            "{}{}{}\n",
            self.style.info("You have selected "),
            self.style.value(area.label()),
            self.style.info("!"),
        ));

        if area == ContactArea::Report {
            self.prompter.say(&self.style.note(
                "the management account is not supported to get root email address, value will be \"management account - not available\".\n",
            ));
            return Ok(Some(Command::GenerateReport));
        }

        let action = self.choose("Choose the action:", area.actions(), Action::label)?;
        self.prompter.say(&format!(
            "{}{}{}{}{}\n",
            self.style.info("You have selected to "),
            self.style.value(action.label()),
            self.style.info(" AWS account(s) "),
            self.style.value(area.label()),
            self.style.info("!"),
        ));

        let command = match (area, action) {
            (ContactArea::AlternateContacts, Action::Delete) => {
                let raw = self.prompter.input(DELETE_ACCOUNT_PROMPT)?;
                let accounts: Vec<AccountId> = raw.trim().split(',').map(str::to_string).collect();
                if accounts.len() != 1 {
                    self.prompter
                        .say("Error: the delete action is allowed for one AWS account at a time.");
                    return Ok(None);
                }
                self.validate(&accounts)?;
                let kinds = self.read_contact_kinds()?;
                Command::DeleteAlternateContacts { accounts, kinds }
            }
            (ContactArea::AlternateContacts, action) => {
                let accounts = self.read_accounts()?;
                let kinds = self.read_contact_kinds()?;
                if action == Action::List {
                    Command::ListAlternateContacts { accounts, kinds }
                } else {
                    Command::UpdateAlternateContacts { accounts, kinds }
                }
            }
            (ContactArea::PrimaryContactInformation, Action::List) => {
                Command::ListContactInformation {
                    accounts: self.read_accounts()?,
                }
            }
            (ContactArea::PrimaryContactInformation, _) => Command::UpdateContactInformation {
                accounts: self.read_accounts()?,
            },
            (ContactArea::RootEmailAddresses, Action::List) => {
                self.prompter.say(&self.style.note(
                    "the management account is not supported. If added, value will be \"management account - not available\".\n",
                ));
                Command::ListRootEmails {
                    accounts: self.read_accounts()?,
                }
            }
            (ContactArea::RootEmailAddresses, _) => {
                let limit = self.settings.root_email_batch_limit;
                self.prompter.say(&self.style.note(&format!(
                    "For security reasons and better experience, only {limit} AWS accounts are allowed at a time.\n"
                )));
                let accounts = self.read_accounts()?;
                if accounts.len() > limit {
                    self.prompter.say(&format!(
                        "Error: there are more than {limit} AWS accounts selected, please segment into groups of up to {limit} AWS accounts to continue."
                    ));
                    return Ok(None);
                }
                Command::UpdateRootEmails { accounts }
            }
            (ContactArea::Report, _) => Command::GenerateReport,
        };
        Ok(Some(command))
    }

    fn choose<T: Copy>(
        &mut self,
        title: &str,
        options: &[T],
        label: fn(T) -> &'static str,
    ) -> Result<T> {
        let labels: Vec<String> = options
            .iter()
            .map(|option| label(*option).to_string())
            .collect();
        let index = self.prompter.select(title, &labels)?;
        options
            .get(index)
            .copied()
            .ok_or_else(|| ManagerError::InvalidRequest(format!("no menu entry at index {index}")))
    }

    /// Resolves, validates and deduplicates the account selection.
    fn read_accounts(&mut self) -> Result<Vec<AccountId>> {
        let raw = self.prompter.input(ACCOUNTS_PROMPT)?;
        let accounts = AccountSelector::parse(&raw).resolve(&self.backend)?;
        self.validate(&accounts)?;
        let accounts = dedup_accounts(accounts);
        self.prompter.say(&format!(
            "Number of individual AWS accounts detected: {}\n",
            accounts.len()
        ));
        Ok(accounts)
    }

    fn validate(&mut self, accounts: &[AccountId]) -> Result<()> {
        validate_accounts(&self.backend, accounts)?;
        self.prompter
            .say(&format!("AWS account validation: {}", self.style.success("\u{2713}")));
        Ok(())
    }

    fn read_contact_kinds(&mut self) -> Result<Vec<AlternateContactKind>> {
        let choices: Vec<String> = command::CONTACT_KIND_CHOICES
            .iter()
            .map(|choice| choice.to_string())
            .collect();
        let index = self
            .prompter
            .select("\nChoose the alternate contact type:", &choices)?;
        self.prompter.say(&format!(
            "Alternate contact type: {}\n",
            choices.get(index).map(String::as_str).unwrap_or("All")
        ));
        Ok(command::contact_kinds_for_choice(index))
    }

    /// Executes one command against the backend.
    pub fn dispatch(&mut self, caller: &str, command: Command) -> Result<()> {
        match command {
            Command::ListAlternateContacts { accounts, kinds } => {
                let listing = list_alternate_contacts(&self.backend, caller, &accounts, &kinds)?;
                self.deliver(&listing)
            }
            Command::UpdateAlternateContacts { accounts, kinds } => {
                let first = kinds.first().copied().unwrap_or(AlternateContactKind::Billing);
                let contact = prompt_alternate_contact(&mut self.prompter, first)?;
                self.prompter.say("");
                update_alternate_contacts(&self.backend, caller, &accounts, &kinds, &contact)
            }
            Command::DeleteAlternateContacts { accounts, kinds } => {
                delete_alternate_contacts(&self.backend, caller, &accounts, &kinds)
            }
            Command::ListContactInformation { accounts } => {
                let listing = list_contact_information(&self.backend, caller, &accounts)?;
                self.deliver(&listing)
            }
            Command::UpdateContactInformation { accounts } => {
                let information = prompt_contact_information(&mut self.prompter)?;
                update_contact_information(&self.backend, caller, &accounts, &information)
            }
            Command::ListRootEmails { accounts } => {
                let listing = list_root_emails(&self.backend, caller, &accounts)?;
                self.deliver(&listing)
            }
            Command::UpdateRootEmails { accounts } => {
                update_root_emails(&self.backend, caller, &accounts, &mut self.prompter, self.style)
                    .map(|_| ())
            }
            Command::GenerateReport => {
                let path = generate_report(
                    &self.backend,
                    caller,
                    &self.settings.report_dir,
                    Local::now(),
                )?;
                self.prompter.say(&format!("Report written to {}", path.display()));
                Ok(())
            }
        }
    }

    /// Prints the listing or, when the user asks for it, uploads it to S3.
    fn deliver(&mut self, listing: &dyn Listing) -> Result<()> {
        if self
            .prompter
            .confirm("\nDo you want to export the result to an S3 bucket?")?
        {
            let bucket = self.prompter.input("S3 bucket name")?;
            let bucket = bucket.trim();
            let key = export_json(
                &self.backend,
                bucket,
                listing.export_prefix(),
                &listing.document()?,
                Local::now(),
            )?;
            self.prompter.say(&format!("Exported to s3://{bucket}/{key}"));
        } else {
            let rendered = serde_json::to_string_pretty(&Value::Object(listing.entries()?))?;
            self.prompter.say("\nReturn: \n");
            self.prompter.say(&rendered);
        }
        Ok(())
    }
}
