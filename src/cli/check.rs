//! `entrytally check` subcommand for validating account details

use clap::Args;

use crate::services::validation::{
    validate_email, validate_name, validate_password, validate_phone_number,
};
use crate::types::{EntryTallyError, Result, ValidationError};

/// Validate sign-up fields
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// 10-digit phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Password
    #[arg(long)]
    pub password: Option<String>,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let results = self.results();
        if results.is_empty() {
            return Err(EntryTallyError::Config(
                "Provide at least one of --name, --email, --phone, --password".into(),
            ));
        }

        let mut first_error = None;
        for (field, result) in results {
            match result {
                Ok(()) => println!("{}: ok", field),
                Err(e) => {
                    println!("{}: {}", field, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Outcome per provided field, in form order
    fn results(&self) -> Vec<(&'static str, std::result::Result<(), ValidationError>)> {
        let mut results = Vec::new();
        if let Some(name) = &self.name {
            results.push(("name", validate_name(name)));
        }
        if let Some(email) = &self.email {
            results.push(("email", validate_email(email)));
        }
        if let Some(phone) = &self.phone {
            results.push(("phone", validate_phone_number(phone)));
        }
        if let Some(password) = &self.password {
            results.push(("password", validate_password(password)));
        }
        results
    }
}
