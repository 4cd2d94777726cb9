//! Organization-wide contacts report.
//!
//! One row per account of the organization joining the directory entry, the
//! primary contact information, the root email and the three alternate
//! contacts. The result is materialised as a single worksheet by
//! [`excel_write`](crate::io::excel_write).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, instrument};

use crate::accounts::list_organization_accounts;
use crate::backend::{ContactsBackend, target_account};
use crate::error::Result;
use crate::io::{excel_write, file_timestamp};
use crate::model::AlternateContactKind;
use crate::operations::alternate::fetch_alternate_contact;
use crate::operations::root_email::fetch_root_email;

/// Name of the only worksheet of the report.
pub const REPORT_SHEET: &str = "Contacts";

/// Report columns, in output order.
pub const REPORT_COLUMNS: [&str; 17] = [
    "Account ID",
    "Account Name",
    "Status",
    "Root Email Address",
    "Phone Number",
    "Billing Alternate Contact - Name",
    "Billing Alternate Contact - Title",
    "Billing Alternate Contact - Email",
    "Billing Alternate Contact - Phone Number",
    "Operations Alternate Contact - Name",
    "Operations Alternate Contact - Title",
    "Operations Alternate Contact - Email",
    "Operations Alternate Contact - Phone Number",
    "Security Alternate Contact - Name",
    "Security Alternate Contact - Title",
    "Security Alternate Contact - Email",
    "Security Alternate Contact - Phone Number",
];

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Collects the report for every account in the organization. The account
/// selection of the session plays no part. Any remote failure aborts the
/// whole report.
#[instrument(level = "info", skip_all)]
pub fn build_report(backend: &dyn ContactsBackend, caller: &str) -> Result<SheetTable> {
    let accounts = list_organization_accounts(backend)?;
    let mut rows = Vec::with_capacity(accounts.len());

    for account in &accounts {
        info!(account = %account.id, "getting information for account");
        let information = backend.get_contact_information(target_account(&account.id, caller))?;
        let root_email = fetch_root_email(backend, caller, &account.id)?;

        let mut row = vec![
            account.id.clone(),
            account.name.clone(),
            account.status.clone(),
            root_email,
            information.phone_number,
        ];
        for kind in AlternateContactKind::ALL {
            let contact = fetch_alternate_contact(backend, caller, &account.id, kind)?
                .unwrap_or_default();
            row.extend([
                contact.name,
                contact.title,
                contact.email_address,
                contact.phone_number,
            ]);
        }
        rows.push(row);
    }

    Ok(SheetTable {
        sheet_name: REPORT_SHEET.to_string(),
        columns: REPORT_COLUMNS.iter().map(|column| column.to_string()).collect(),
        rows,
    })
}

/// File name of a report generated at `now`.
pub fn report_file_name(now: DateTime<Local>) -> String {
    format!("aws-contacts-report-{}.xlsx", file_timestamp(now))
}

/// Builds the report and writes it into `directory`. Nothing is written when
/// collection fails.
pub fn generate_report(
    backend: &dyn ContactsBackend,
    caller: &str,
    directory: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let table = build_report(backend, caller)?;
    let path = directory.join(report_file_name(now));
    excel_write::write_workbook(&path, &table)?;
    info!(path = %path.display(), rows = table.rows.len(), "report written");
    Ok(path)
}
