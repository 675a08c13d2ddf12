use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::root_commands::ActivityArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &ActivityArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let feed = ctx
        .client
        .activity(ctx.token()?, args.limit, args.entity)
        .await?;
    // Tables show the entries, not the envelope.
    if flags.format == OutputFormat::Table {
        return output(&feed.data, flags.format);
    }
    output(&feed, flags.format)
}
