use tcc_client::trucks::TruckQuery;
use tcc_core::requests::{NewTruck, TruckUpdate, TruckUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TruckCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: TruckCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let token = ctx.token()?;
    match action {
        TruckCommands::List { available, branch } => {
            let query = TruckQuery {
                available,
                branch_id: branch,
            };
            output(&ctx.client.list_trucks(token, &query).await?, flags.format)
        }
        TruckCommands::Get { id } => output(&ctx.client.get_truck(token, &id).await?, flags.format),
        TruckCommands::Create {
            registration,
            branch,
            capacity_kg,
            available,
        } => {
            let new = NewTruck {
                registration_number: registration,
                branch_id: branch,
                capacity_kg,
                is_available: available,
            };
            output(&ctx.client.create_truck(token, &new).await?, flags.format)
        }
        TruckCommands::Update {
            id,
            registration,
            branch,
            clear_branch,
            capacity_kg,
            available,
        } => {
            let update = truck_update(registration, branch, clear_branch, capacity_kg, available);
            anyhow::ensure!(!update.is_empty(), "nothing to update");
            output(&ctx.client.update_truck(token, &id, &update).await?, flags.format)
        }
        TruckCommands::Delete { id } => {
            output(&ctx.client.delete_truck(token, &id).await?, flags.format)
        }
    }
}

fn truck_update(
    registration: Option<String>,
    branch: Option<String>,
    clear_branch: bool,
    capacity_kg: Option<f64>,
    available: Option<bool>,
) -> TruckUpdate {
    let mut builder = TruckUpdateBuilder::new();
    if let Some(registration) = registration {
        builder = builder.registration_number(registration);
    }
    if clear_branch {
        builder = builder.branch_id(None);
    } else if let Some(branch) = branch {
        builder = builder.branch_id(Some(branch));
    }
    if let Some(capacity) = capacity_kg {
        builder = builder.capacity_kg(Some(capacity));
    }
    if let Some(available) = available {
        builder = builder.is_available(available);
    }
    builder.build()
}
