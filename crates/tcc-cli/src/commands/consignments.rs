use tcc_core::requests::{ConsignmentUpdate, ConsignmentUpdateBuilder, NewConsignment};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConsignmentCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: ConsignmentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let token = ctx.token()?;
    match action {
        ConsignmentCommands::List { status } => {
            output(&ctx.client.list_consignments(token, status).await?, flags.format)
        }
        ConsignmentCommands::Get { id } => {
            output(&ctx.client.get_consignment(token, &id).await?, flags.format)
        }
        ConsignmentCommands::Track { tracking_number } => output(
            &ctx.client.track_consignment(token, &tracking_number).await?,
            flags.format,
        ),
        ConsignmentCommands::Create {
            origin,
            destination,
            sender,
            receiver,
            description,
            weight_kg,
        } => {
            let new = NewConsignment {
                origin_branch_id: origin,
                destination_branch_id: destination,
                sender_name: sender,
                receiver_name: receiver,
                description,
                weight_kg,
            };
            let consignment = ctx.client.create_consignment(token, &new).await?;
            tracing::info!(tracking = %consignment.tracking_number, "consignment booked");
            output(&consignment, flags.format)
        }
        ConsignmentCommands::Update {
            id,
            origin,
            destination,
            sender,
            receiver,
            description,
            weight_kg,
            status,
        } => {
            let update = UpdateFlags {
                origin,
                destination,
                sender,
                receiver,
                description,
                weight_kg,
                status,
            }
            .into_update();
            anyhow::ensure!(!update.is_empty(), "nothing to update");
            output(
                &ctx.client.update_consignment(token, &id, &update).await?,
                flags.format,
            )
        }
        ConsignmentCommands::Delete { id } => {
            output(&ctx.client.delete_consignment(token, &id).await?, flags.format)
        }
    }
}

struct UpdateFlags {
    origin: Option<String>,
    destination: Option<String>,
    sender: Option<String>,
    receiver: Option<String>,
    description: Option<String>,
    weight_kg: Option<f64>,
    status: Option<tcc_core::enums::ConsignmentStatus>,
}

impl UpdateFlags {
    fn into_update(self) -> ConsignmentUpdate {
        let mut builder = ConsignmentUpdateBuilder::new();
        if let Some(origin) = self.origin {
            builder = builder.origin_branch_id(origin);
        }
        if let Some(destination) = self.destination {
            builder = builder.destination_branch_id(destination);
        }
        if let Some(sender) = self.sender {
            builder = builder.sender_name(sender);
        }
        if let Some(receiver) = self.receiver {
            builder = builder.receiver_name(receiver);
        }
        if let Some(description) = self.description {
            builder = builder.description(Some(description));
        }
        if let Some(weight) = self.weight_kg {
            builder = builder.weight_kg(Some(weight));
        }
        if let Some(status) = self.status {
            builder = builder.status(status);
        }
        builder.build()
    }
}
