//! Session resolution for the CLI.
//!
//! The signed-in identity comes from `SYNVO_USER_EMAIL` and
//! `SYNVO_USER_NAME`. The role is looked up from the API once per
//! invocation; a failed lookup degrades to the default role instead of
//! failing the command.

use synvo_client::SynvoClient;
use synvo_core::user::Session;
use synvo_core::AppConfig;

/// Resolves the signed-in session, or `None` when no identity is configured.
pub(crate) async fn current_session(client: &SynvoClient, config: &AppConfig) -> Option<Session> {
    let email = config.user_email.clone()?;
    let role = client.resolve_role(&email).await;
    Some(Session {
        email,
        display_name: config.user_name.clone(),
        role,
    })
}

/// Resolves the session for commands that need one.
///
/// # Errors
///
/// Returns an error when no identity is configured.
pub(crate) async fn require_session(
    client: &SynvoClient,
    config: &AppConfig,
) -> anyhow::Result<Session> {
    current_session(client, config).await.ok_or_else(|| {
        anyhow::anyhow!(
            "not signed in; set SYNVO_USER_EMAIL (and optionally SYNVO_USER_NAME) in the environment"
        )
    })
}

/// Resolves the session and checks for the admin role.
///
/// # Errors
///
/// Returns an error when no identity is configured or the resolved role is
/// not `"admin"`.
pub(crate) async fn require_admin(
    client: &SynvoClient,
    config: &AppConfig,
) -> anyhow::Result<Session> {
    let session = require_session(client, config).await?;
    if !session.is_admin() {
        return Err(anyhow::anyhow!(
            "admin commands require the admin role; '{}' has role '{}'",
            session.email,
            session.role
        ));
    }
    Ok(session)
}
