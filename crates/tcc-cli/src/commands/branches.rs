use tcc_core::requests::{BranchUpdate, NewBranch};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BranchCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: BranchCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let token = ctx.token()?;
    match action {
        BranchCommands::List => output(&ctx.client.list_branches(token).await?, flags.format),
        BranchCommands::Get { id } => output(&ctx.client.get_branch(token, &id).await?, flags.format),
        BranchCommands::Create { name, location } => {
            let branch = ctx
                .client
                .create_branch(token, &NewBranch { name, location })
                .await?;
            output(&branch, flags.format)
        }
        BranchCommands::Update { id, name, location } => {
            let update = BranchUpdate { name, location };
            anyhow::ensure!(!update.is_empty(), "nothing to update: pass --name or --location");
            let branch = ctx.client.update_branch(token, &id, &update).await?;
            output(&branch, flags.format)
        }
        BranchCommands::Delete { id } => {
            output(&ctx.client.delete_branch(token, &id).await?, flags.format)
        }
    }
}
