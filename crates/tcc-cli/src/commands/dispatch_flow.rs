use tcc_core::requests::DispatchRequest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DispatchCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: DispatchCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let token = ctx.token()?;
    let consignment = match action {
        DispatchCommands::List => {
            return output(&ctx.client.list_dispatched(token).await?, flags.format);
        }
        DispatchCommands::Assign { consignment, truck } => {
            let request = DispatchRequest {
                consignment_id: consignment,
                truck_id: truck,
            };
            ctx.client.dispatch(token, &request).await?
        }
        DispatchCommands::Deliver { consignment_id } => {
            ctx.client.deliver(token, &consignment_id).await?
        }
        DispatchCommands::Cancel { consignment_id } => {
            ctx.client.cancel_dispatch(token, &consignment_id).await?
        }
    };
    tracing::info!(
        tracking = %consignment.tracking_number,
        status = %consignment.status,
        "dispatch updated"
    );
    output(&consignment, flags.format)
}
