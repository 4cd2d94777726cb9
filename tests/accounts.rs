mod common;

use aws_contacts_manager::ManagerError;
use aws_contacts_manager::accounts::{
    AccountSelector, dedup_accounts, list_organization_accounts, validate_accounts,
};
use aws_contacts_manager::model::OrgAccount;
use common::{CALLER, FakeBackend, MEMBER_A, MEMBER_B};

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn selector_parsing_distinguishes_all_parents_and_lists() {
    assert_eq!(AccountSelector::parse("all"), AccountSelector::All);
    assert_eq!(
        AccountSelector::parse("ou-ab12-cdef3456"),
        AccountSelector::Parent("ou-ab12-cdef3456".to_string())
    );
    assert_eq!(
        AccountSelector::parse("r-ab12"),
        AccountSelector::Parent("r-ab12".to_string())
    );
    assert_eq!(
        AccountSelector::parse("111111111111, 222222222222"),
        AccountSelector::Explicit(ids(&[MEMBER_A, MEMBER_B]))
    );
    assert_eq!(
        AccountSelector::parse("111111111111"),
        AccountSelector::Explicit(ids(&[MEMBER_A]))
    );
}

#[test]
fn all_selector_follows_every_continuation_page() {
    let accounts: Vec<OrgAccount> = (1..=7)
        .map(|n| OrgAccount::new(format!("{n:012}"), format!("account-{n}"), "ACTIVE"))
        .collect();
    let backend = FakeBackend::new(CALLER, accounts.clone());

    let resolved = AccountSelector::All.resolve(&backend).expect("accounts resolved");

    let expected: Vec<String> = accounts.iter().map(|account| account.id.clone()).collect();
    assert_eq!(resolved, expected);
    // Seven accounts with two per page.
    assert_eq!(backend.calls_to("ListAccounts"), 4);
}

#[test]
fn parent_selector_lists_accounts_under_the_parent() {
    let backend = FakeBackend::organization().with_parent(
        "ou-ab12-cdef3456",
        vec![
            OrgAccount::new(MEMBER_A, "workloads", "ACTIVE"),
            OrgAccount::new(MEMBER_B, "sandbox", "ACTIVE"),
            OrgAccount::new("333333333333", "logs", "ACTIVE"),
        ],
    );

    let resolved = AccountSelector::parse("ou-ab12-cdef3456")
        .resolve(&backend)
        .expect("accounts resolved");

    assert_eq!(resolved, ids(&[MEMBER_A, MEMBER_B, "333333333333"]));
    assert_eq!(backend.calls_to("ListAccountsForParent"), 2);
}

#[test]
fn members_pass_validation() {
    let backend = FakeBackend::organization();
    validate_accounts(&backend, &ids(&[MEMBER_A, CALLER])).expect("members are valid");
    assert_eq!(list_organization_accounts(&backend).expect("listed").len(), 3);
}

#[test]
fn malformed_ids_fail_before_any_remote_lookup() {
    let backend = FakeBackend::organization();

    let err = validate_accounts(&backend, &ids(&[MEMBER_A, "12345"])).unwrap_err();

    assert!(matches!(err, ManagerError::InvalidAccountId(ref id) if id == "12345"));
    assert!(err.is_validation());
    assert!(backend.calls().is_empty());
}

#[test]
fn non_digit_ids_are_rejected() {
    let backend = FakeBackend::organization();
    let err = validate_accounts(&backend, &ids(&["11111111111a"])).unwrap_err();
    assert!(matches!(err, ManagerError::InvalidAccountId(_)));
}

#[test]
fn every_entry_is_checked_for_membership() {
    let backend = FakeBackend::organization();

    let err = validate_accounts(&backend, &ids(&[MEMBER_A, "999999999999"])).unwrap_err();

    assert!(matches!(err, ManagerError::AccountNotInOrganization(ref id) if id == "999999999999"));
}

#[test]
fn empty_selection_is_rejected() {
    let backend = FakeBackend::organization();
    let err = validate_accounts(&backend, &[]).unwrap_err();
    assert!(matches!(err, ManagerError::EmptyAccountSelection));
}

#[test]
fn dedup_keeps_first_occurrence_order() {
    let unique = dedup_accounts(ids(&[MEMBER_B, MEMBER_A, MEMBER_B, MEMBER_A]));
    assert_eq!(unique, ids(&[MEMBER_B, MEMBER_A]));
}
