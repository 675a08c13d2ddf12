use std::io::BufRead;

use anyhow::Context;
use serde::Serialize;
use tcc_auth::Session;
use tcc_core::requests::RegisterRequest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    name: Option<String>,
    role: Option<String>,
    expires_at: Option<String>,
    token_source: Option<String>,
    base_url: String,
}

impl AuthStatusResponse {
    fn from_session(session: &Session, base_url: &str) -> Self {
        let claims = session.claims();
        Self {
            authenticated: session.is_authenticated(),
            user_id: claims.map(|c| c.sub.clone()),
            email: claims.map(|c| c.email.clone()),
            name: claims.map(|c| c.name.clone()),
            role: claims.map(|c| c.role.to_string()),
            expires_at: claims
                .and_then(tcc_auth::TccClaims::expires_at)
                .map(|at| at.to_rfc3339()),
            token_source: session.source().map(|s| s.as_str().to_string()),
            base_url: base_url.to_string(),
        }
    }
}

pub async fn handle(
    action: AuthCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login {
            email,
            password,
            password_stdin,
        } => {
            let password = resolve_password(password, password_stdin)?;
            let response = ctx.client.login(&email, &password).await?;
            ctx.session
                .login(&response.token)
                .context("failed to store session token")?;
            tracing::info!(user = %response.user.email, "logged in");
            status(ctx, flags)
        }
        AuthCommands::Register {
            name,
            email,
            password,
            password_stdin,
        } => {
            let password = resolve_password(password, password_stdin)?;
            let request = RegisterRequest {
                name,
                email,
                password,
            };
            let response = ctx.client.register(&request).await?;
            ctx.session
                .login(&response.token)
                .context("failed to store session token")?;
            status(ctx, flags)
        }
        AuthCommands::Logout => {
            ctx.session.logout().context("failed to clear session token")?;
            status(ctx, flags)
        }
        AuthCommands::Status => status(ctx, flags),
        AuthCommands::Whoami => {
            let user = ctx.client.me(ctx.token()?).await?;
            output(&user, flags.format)
        }
    }
}

fn status(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = AuthStatusResponse::from_session(&ctx.session, &ctx.config.client.base_url);
    output(&status, flags.format)
}

fn resolve_password(password: Option<String>, from_stdin: bool) -> anyhow::Result<String> {
    if from_stdin {
        return read_password(std::io::stdin().lock());
    }
    password.context("a password is required: pass --password or --password-stdin")
}

fn read_password(reader: impl BufRead) -> anyhow::Result<String> {
    let line = reader
        .lines()
        .next()
        .context("no password on stdin")?
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    anyhow::ensure!(!password.is_empty(), "empty password on stdin");
    Ok(password)
}
