use aws_config::{BehaviorVersion, Region};
use aws_sdk_account::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_account::types::{
    AlternateContactType, ContactInformation as SdkContactInformation,
    PrimaryEmailUpdateStatus as SdkPrimaryEmailUpdateStatus,
};
use aws_sdk_organizations::types::Account;
use aws_sdk_s3::primitives::ByteStream;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, instrument};

use crate::backend::ContactsBackend;
use crate::error::{ManagerError, RemoteError, Result};
use crate::model::{
    AccountPage, AlternateContact, AlternateContactKind, ContactInformation, OrgAccount,
    PrimaryEmailUpdateStatus,
};

/// [`ContactsBackend`] backed by the AWS SDK.
///
/// The SDK is async; every call is driven to completion on a private
/// current-thread runtime so callers see plain blocking functions.
pub struct AwsBackend {
    runtime: Runtime,
    account: aws_sdk_account::Client,
    organizations: aws_sdk_organizations::Client,
    s3: aws_sdk_s3::Client,
    sts: aws_sdk_sts::Client,
}

impl AwsBackend {
    /// Loads the shared AWS configuration (optionally pinned to a named
    /// profile and region) and builds the service clients.
    #[instrument(level = "debug")]
    pub fn connect(profile: Option<&str>, region: Option<&str>) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| ManagerError::Runtime(err.to_string()))?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_owned()));
        }
        let shared = runtime.block_on(loader.load());
        debug!(region = ?shared.region(), "loaded AWS configuration");

        Ok(Self {
            account: aws_sdk_account::Client::new(&shared),
            organizations: aws_sdk_organizations::Client::new(&shared),
            s3: aws_sdk_s3::Client::new(&shared),
            sts: aws_sdk_sts::Client::new(&shared),
            runtime,
        })
    }
}

impl ContactsBackend for AwsBackend {
    fn caller_account_id(&self) -> Result<String> {
        let output = self
            .runtime
            .block_on(self.sts.get_caller_identity().send())
            .map_err(|err| remote_error("GetCallerIdentity", err))?;
        output.account().map(str::to_owned).ok_or_else(|| {
            RemoteError::new("GetCallerIdentity", None, "response carried no account").into()
        })
    }

    fn list_accounts(&self, next_token: Option<&str>) -> Result<AccountPage> {
        let output = self
            .runtime
            .block_on(
                self.organizations
                    .list_accounts()
                    .set_next_token(next_token.map(str::to_owned))
                    .send(),
            )
            .map_err(|err| remote_error("ListAccounts", err))?;
        Ok(AccountPage {
            accounts: output.accounts().iter().map(org_account).collect(),
            next_token: output.next_token().map(str::to_owned),
        })
    }

    fn list_accounts_for_parent(
        &self,
        parent_id: &str,
        next_token: Option<&str>,
    ) -> Result<AccountPage> {
        let output = self
            .runtime
            .block_on(
                self.organizations
                    .list_accounts_for_parent()
                    .parent_id(parent_id)
                    .set_next_token(next_token.map(str::to_owned))
                    .send(),
            )
            .map_err(|err| remote_error("ListAccountsForParent", err))?;
        Ok(AccountPage {
            accounts: output.accounts().iter().map(org_account).collect(),
            next_token: output.next_token().map(str::to_owned),
        })
    }

    fn get_alternate_contact(
        &self,
        account: Option<&str>,
        kind: AlternateContactKind,
    ) -> Result<AlternateContact> {
        let output = self
            .runtime
            .block_on(
                self.account
                    .get_alternate_contact()
                    .set_account_id(account.map(str::to_owned))
                    .alternate_contact_type(contact_type(kind))
                    .send(),
            )
            .map_err(|err| remote_error("GetAlternateContact", err))?;
        let contact = output
            .alternate_contact()
            .map(|contact| AlternateContact {
                name: contact.name().unwrap_or_default().to_owned(),
                title: contact.title().unwrap_or_default().to_owned(),
                email_address: contact.email_address().unwrap_or_default().to_owned(),
                phone_number: contact.phone_number().unwrap_or_default().to_owned(),
            })
            .unwrap_or_default();
        Ok(contact)
    }

    fn put_alternate_contact(
        &self,
        account: Option<&str>,
        kind: AlternateContactKind,
        contact: &AlternateContact,
    ) -> Result<()> {
        self.runtime
            .block_on(
                self.account
                    .put_alternate_contact()
                    .set_account_id(account.map(str::to_owned))
                    .alternate_contact_type(contact_type(kind))
                    .email_address(&contact.email_address)
                    .name(&contact.name)
                    .phone_number(&contact.phone_number)
                    .title(&contact.title)
                    .send(),
            )
            .map_err(|err| remote_error("PutAlternateContact", err))?;
        Ok(())
    }

    fn delete_alternate_contact(
        &self,
        account: Option<&str>,
        kind: AlternateContactKind,
    ) -> Result<()> {
        self.runtime
            .block_on(
                self.account
                    .delete_alternate_contact()
                    .set_account_id(account.map(str::to_owned))
                    .alternate_contact_type(contact_type(kind))
                    .send(),
            )
            .map_err(|err| remote_error("DeleteAlternateContact", err))?;
        Ok(())
    }

    fn get_contact_information(&self, account: Option<&str>) -> Result<ContactInformation> {
        let output = self
            .runtime
            .block_on(
                self.account
                    .get_contact_information()
                    .set_account_id(account.map(str::to_owned))
                    .send(),
            )
            .map_err(|err| remote_error("GetContactInformation", err))?;
        let info = output.contact_information().ok_or_else(|| {
            RemoteError::new(
                "GetContactInformation",
                None,
                "response carried no contact information",
            )
        })?;
        Ok(ContactInformation {
            address_line1: info.address_line1().to_owned(),
            address_line2: info.address_line2().map(str::to_owned),
            address_line3: info.address_line3().map(str::to_owned),
            city: info.city().to_owned(),
            company_name: info.company_name().map(str::to_owned),
            country_code: info.country_code().to_owned(),
            district_or_county: info.district_or_county().map(str::to_owned),
            full_name: info.full_name().to_owned(),
            phone_number: info.phone_number().to_owned(),
            postal_code: info.postal_code().to_owned(),
            state_or_region: info.state_or_region().map(str::to_owned),
            website_url: info.website_url().map(str::to_owned),
        })
    }

    fn put_contact_information(
        &self,
        account: Option<&str>,
        information: &ContactInformation,
    ) -> Result<()> {
        let payload = SdkContactInformation::builder()
            .address_line1(&information.address_line1)
            .set_address_line2(information.address_line2.clone())
            .set_address_line3(information.address_line3.clone())
            .city(&information.city)
            .set_company_name(information.company_name.clone())
            .country_code(&information.country_code)
            .set_district_or_county(information.district_or_county.clone())
            .full_name(&information.full_name)
            .phone_number(&information.phone_number)
            .postal_code(&information.postal_code)
            .set_state_or_region(information.state_or_region.clone())
            .set_website_url(information.website_url.clone())
            .build()
            .map_err(|err| ManagerError::InvalidRequest(err.to_string()))?;

        self.runtime
            .block_on(
                self.account
                    .put_contact_information()
                    .set_account_id(account.map(str::to_owned))
                    .contact_information(payload)
                    .send(),
            )
            .map_err(|err| remote_error("PutContactInformation", err))?;
        Ok(())
    }

    fn get_primary_email(&self, account: &str) -> Result<String> {
        let output = self
            .runtime
            .block_on(self.account.get_primary_email().account_id(account).send())
            .map_err(|err| remote_error("GetPrimaryEmail", err))?;
        Ok(output.primary_email().unwrap_or_default().to_owned())
    }

    fn start_primary_email_update(&self, account: Option<&str>, email: &str) -> Result<()> {
        self.runtime
            .block_on(
                self.account
                    .start_primary_email_update()
                    .set_account_id(account.map(str::to_owned))
                    .primary_email(email)
                    .send(),
            )
            .map_err(|err| remote_error("StartPrimaryEmailUpdate", err))?;
        Ok(())
    }

    fn accept_primary_email_update(
        &self,
        account: Option<&str>,
        otp: &str,
        email: &str,
    ) -> Result<PrimaryEmailUpdateStatus> {
        let output = self
            .runtime
            .block_on(
                self.account
                    .accept_primary_email_update()
                    .set_account_id(account.map(str::to_owned))
                    .otp(otp)
                    .primary_email(email)
                    .send(),
            )
            .map_err(|err| remote_error("AcceptPrimaryEmailUpdate", err))?;
        Ok(match output.status() {
            Some(SdkPrimaryEmailUpdateStatus::Accepted) => PrimaryEmailUpdateStatus::Accepted,
            _ => PrimaryEmailUpdateStatus::Pending,
        })
    }

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        self.runtime
            .block_on(
                self.s3
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .body(ByteStream::from(body))
                    .send(),
            )
            .map_err(|err| remote_error("PutObject", err))?;
        Ok(())
    }
}

fn contact_type(kind: AlternateContactKind) -> AlternateContactType {
    match kind {
        AlternateContactKind::Billing => AlternateContactType::Billing,
        AlternateContactKind::Operations => AlternateContactType::Operations,
        AlternateContactKind::Security => AlternateContactType::Security,
    }
}

#[allow(deprecated)]
fn org_account(account: &Account) -> OrgAccount {
    OrgAccount::new(
        account.id().unwrap_or_default(),
        account.name().unwrap_or_default(),
        account.status().map(|status| status.as_str()).unwrap_or_default(),
    )
}

fn remote_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> ManagerError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = err
        .as_service_error()
        .and_then(|service_error| service_error.code())
        .map(str::to_owned);
    RemoteError::new(operation, code, DisplayErrorContext(&err).to_string()).into()
}
