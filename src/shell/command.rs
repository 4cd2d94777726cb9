use crate::model::{AccountId, AlternateContactKind};

/// First menu: which kind of contact to work on, or the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactArea {
    AlternateContacts,
    PrimaryContactInformation,
    RootEmailAddresses,
    Report,
}

impl ContactArea {
    pub const ALL: [ContactArea; 4] = [
        ContactArea::AlternateContacts,
        ContactArea::PrimaryContactInformation,
        ContactArea::RootEmailAddresses,
        ContactArea::Report,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactArea::AlternateContacts => "Alternate contacts",
            ContactArea::PrimaryContactInformation => "Primary contacts information",
            ContactArea::RootEmailAddresses => "Root email addresses",
            ContactArea::Report => "Generate contacts report",
        }
    }

    /// Actions offered for this area. The report has none.
    pub fn actions(self) -> &'static [Action] {
        match self {
            ContactArea::AlternateContacts => &[Action::List, Action::Update, Action::Delete],
            ContactArea::PrimaryContactInformation | ContactArea::RootEmailAddresses => {
                &[Action::List, Action::Update]
            }
            ContactArea::Report => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Update,
    Delete,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::List => "List",
            Action::Update => "Update",
            Action::Delete => "Delete",
        }
    }
}

/// Alternate contact type menu entries; `All` expands to every type.
pub const CONTACT_KIND_CHOICES: [&str; 4] = ["Billing", "Operations", "Security", "All"];

/// Maps a [`CONTACT_KIND_CHOICES`] index to the contact types it stands for.
pub fn contact_kinds_for_choice(index: usize) -> Vec<AlternateContactKind> {
    match AlternateContactKind::ALL.get(index) {
        Some(kind) => vec![*kind],
        None => AlternateContactKind::ALL.to_vec(),
    }
}

/// A fully specified unit of work, ready to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListAlternateContacts {
        accounts: Vec<AccountId>,
        kinds: Vec<AlternateContactKind>,
    },
    UpdateAlternateContacts {
        accounts: Vec<AccountId>,
        kinds: Vec<AlternateContactKind>,
    },
    DeleteAlternateContacts {
        accounts: Vec<AccountId>,
        kinds: Vec<AlternateContactKind>,
    },
    ListContactInformation {
        accounts: Vec<AccountId>,
    },
    UpdateContactInformation {
        accounts: Vec<AccountId>,
    },
    ListRootEmails {
        accounts: Vec<AccountId>,
    },
    UpdateRootEmails {
        accounts: Vec<AccountId>,
    },
    GenerateReport,
}

impl Command {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListAlternateContacts { .. } => "list-alternate-contacts",
            Command::UpdateAlternateContacts { .. } => "update-alternate-contacts",
            Command::DeleteAlternateContacts { .. } => "delete-alternate-contacts",
            Command::ListContactInformation { .. } => "list-contact-information",
            Command::UpdateContactInformation { .. } => "update-contact-information",
            Command::ListRootEmails { .. } => "list-root-emails",
            Command::UpdateRootEmails { .. } => "update-root-emails",
            Command::GenerateReport => "generate-report",
        }
    }
}
