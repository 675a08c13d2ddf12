use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Health => commands::health::handle(ctx, flags).await,
        Commands::Auth { action } => commands::auth::handle(action, ctx, flags).await,
        Commands::Dashboard => commands::dashboard::handle(ctx, flags).await,
        Commands::Activity(args) => commands::activity::handle(&args, ctx, flags).await,
        Commands::Branches { action } => commands::branches::handle(action, ctx, flags).await,
        Commands::Trucks { action } => commands::trucks::handle(action, ctx, flags).await,
        Commands::Consignments { action } => {
            commands::consignments::handle(action, ctx, flags).await
        }
        Commands::Dispatch { action } => commands::dispatch_flow::handle(action, ctx, flags).await,
        Commands::Reports { action } => commands::reports::handle(action, ctx, flags).await,
        Commands::Users { action } => commands::users::handle(action, ctx, flags).await,
    }
}
