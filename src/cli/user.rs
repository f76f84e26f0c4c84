//! User CLI commands

use clap::Args;

use crate::error::ExpenseResult;
use crate::services::UserService;
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct CreateUserArgs {
    /// User name (unique)
    #[arg(long)]
    pub name: String,

    /// Email address for budget alerts
    #[arg(long)]
    pub email: Option<String>,
}

/// Handle `create-user`
pub fn handle_create_user(storage: &Storage, args: CreateUserArgs) -> ExpenseResult<()> {
    let user = UserService::new(storage).create(&args.name, args.email.as_deref())?;
    println!("User '{}' created with id={}.", user.name, user.id);
    Ok(())
}
