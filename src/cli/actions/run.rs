use crate::{
    cli::{actions::Action, globals::GlobalArgs},
    client::AuthClient,
};
use anyhow::Result;
use secrecy::ExposeSecret;
use tracing::info;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
// To add a new action, add a new `Action::*` variant and a corresponding arm here.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    let client = AuthClient::from_base_url(&globals.base_url)?;

    match action {
        Action::Login { email, password } => {
            let result = client.login(&email, password.expose_secret()).await?;
            info!("logged in as {}", result.user.email);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Action::Register {
            email,
            full_name,
            password,
        } => {
            client
                .register(&email, &full_name, password.expose_secret())
                .await?;
            println!("registration accepted for {email}, confirmation email pending");
        }
        Action::Recover { email } => {
            client.recover(&email).await?;
            println!("recovery requested for {email}");
        }
        Action::ResetPassword {
            token,
            new_password,
        } => {
            client
                .reset_password(&token, new_password.expose_secret())
                .await?;
            println!("password updated");
        }
        Action::ConfirmEmail { token } => {
            client.confirm_email_address(&token).await?;
            println!("email address confirmed");
        }
    }

    Ok(())
}
