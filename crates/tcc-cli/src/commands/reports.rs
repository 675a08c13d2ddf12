use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let token = ctx.token()?;
    match action {
        ReportCommands::Consignments { from, to } => {
            if let (Some(from), Some(to)) = (from, to) {
                anyhow::ensure!(from <= to, "--from must not be after --to");
            }
            let report = ctx.client.consignment_report(token, from, to).await?;
            output(&report, flags.format)
        }
        ReportCommands::Trucks => output(&ctx.client.fleet_report(token).await?, flags.format),
    }
}
