use tcc_core::requests::NewUser;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let token = ctx.token()?;
    if ctx.session.identity().is_some_and(|identity| !identity.is_admin()) {
        tracing::warn!("the stored session is not an admin; the server will likely refuse");
    }
    match action {
        UserCommands::List => output(&ctx.client.list_users(token).await?, flags.format),
        UserCommands::Create {
            name,
            email,
            password,
            role,
        } => {
            let new = NewUser {
                name,
                email,
                password,
                role,
            };
            output(&ctx.client.create_user(token, &new).await?, flags.format)
        }
        UserCommands::Delete { id } => output(&ctx.client.delete_user(token, &id).await?, flags.format),
    }
}
