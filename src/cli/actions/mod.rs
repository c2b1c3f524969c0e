// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

use crate::cli::globals::GlobalArgs;
use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Login {
        email: String,
        password: SecretString,
    },
    Register {
        email: String,
        full_name: String,
        password: SecretString,
    },
    Recover {
        email: String,
    },
    ResetPassword {
        token: String,
        new_password: SecretString,
    },
    ConfirmEmail {
        token: String,
    },
}

impl Action {
    // Convenience wrapper so call sites can do `action.execute(&globals).await`.
    // When adding new actions, extend the match in `run::execute`.
    /// Execute the action.
    /// # Errors
    /// Returns an error if the transport cannot be built or the operation
    /// resolves to one of its failure outcomes.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
