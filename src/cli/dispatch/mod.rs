use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to an action plus its global arguments.
/// # Errors
/// Returns an error if a required argument is missing or no known subcommand
/// was given.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let base_url = matches
        .get_one::<String>("base-url")
        .map(String::to_string)
        .context("missing required argument: --base-url")?;

    let globals = GlobalArgs::new(base_url);

    // Closure to return a subcommand's argument or a uniform error
    let arg = |sub: &clap::ArgMatches, name: &str| -> Result<String> {
        sub.get_one::<String>(name)
            .map(String::to_string)
            .with_context(|| format!("missing required argument: --{name}"))
    };

    let action = match matches.subcommand() {
        Some(("login", sub)) => Action::Login {
            email: arg(sub, "email")?,
            password: SecretString::from(arg(sub, "password")?),
        },
        Some(("register", sub)) => Action::Register {
            email: arg(sub, "email")?,
            full_name: arg(sub, "full-name")?,
            password: SecretString::from(arg(sub, "password")?),
        },
        Some(("recover", sub)) => Action::Recover {
            email: arg(sub, "email")?,
        },
        Some(("reset-password", sub)) => Action::ResetPassword {
            token: arg(sub, "token")?,
            new_password: SecretString::from(arg(sub, "new-password")?),
        },
        Some(("confirm-email", sub)) => Action::ConfirmEmail {
            token: arg(sub, "token")?,
        },
        _ => anyhow::bail!("missing subcommand"),
    };

    Ok((action, globals))
}
