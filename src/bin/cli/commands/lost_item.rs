use chrono::{DateTime, Utc};
use clap::Subcommand;
use lostfound::dto::{CreateLostItemDto, LostItemQueryDto, UpdateLostItemDto};
use lostfound::models::{FoundIn, LostItemStatus};

use crate::client::LostFoundClient;
use crate::output::{self, OutputConfig};

/// Lost item commands
#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List lost items, newest find first
    List {
        /// Only items with this status (found, stored, claimed, returned, disposed)
        #[clap(long)]
        status: Option<LostItemStatus>,
        /// Only items found in this kind of place (vehicle, station, stop, depot, other)
        #[clap(long)]
        found_in: Option<FoundIn>,
        #[clap(long)]
        route: Option<String>,
        #[clap(long)]
        vehicle: Option<String>,
        /// Only items still held (found or stored)
        #[clap(long, conflicts_with = "closed")]
        open: bool,
        /// Only items whose case is closed
        #[clap(long)]
        closed: bool,
        /// Only items found at or after this RFC 3339 time
        #[clap(long)]
        after: Option<DateTime<Utc>>,
        /// Only items found at or before this RFC 3339 time
        #[clap(long)]
        before: Option<DateTime<Utc>>,
        /// Text to look for in the title or description
        #[clap(long)]
        search: Option<String>,
        #[clap(long)]
        limit: Option<i64>,
        #[clap(long)]
        offset: Option<i64>,
    },
    /// Register a newly found item
    Register {
        /// Short label for the item
        title: String,
        #[clap(long)]
        found_in: FoundIn,
        #[clap(long)]
        description: Option<String>,
        #[clap(long)]
        route: Option<String>,
        #[clap(long)]
        vehicle: Option<String>,
        /// When the item was found (RFC 3339); defaults to now
        #[clap(long)]
        found_at: Option<DateTime<Utc>>,
        /// Where the item is being held
        #[clap(long)]
        storage: Option<String>,
        #[clap(long)]
        status: Option<LostItemStatus>,
    },
    /// Show a lost item
    Get {
        id: i64,
    },
    /// Change fields of a lost item
    Update {
        id: i64,
        #[clap(long)]
        title: Option<String>,
        /// New description; an empty string clears it
        #[clap(long)]
        description: Option<String>,
        #[clap(long)]
        found_in: Option<FoundIn>,
        /// New route; an empty string clears it
        #[clap(long)]
        route: Option<String>,
        /// New vehicle; an empty string clears it
        #[clap(long)]
        vehicle: Option<String>,
        #[clap(long)]
        found_at: Option<DateTime<Utc>>,
        /// New storage location; an empty string clears it
        #[clap(long)]
        storage: Option<String>,
        #[clap(long)]
        status: Option<LostItemStatus>,
    },
    /// Delete a lost item
    Delete {
        id: i64,
    },
}

/// Maps a CLI text value onto a nullable update: empty clears, anything else sets
fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.trim().is_empty() { None } else { Some(v) })
}

/// Executes a lost item command
pub async fn execute(
    client: &LostFoundClient,
    cmd: ItemCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ItemCommands::List {
            status,
            found_in,
            route,
            vehicle,
            open,
            closed,
            after,
            before,
            search,
            limit,
            offset,
        } => {
            let query = LostItemQueryDto {
                status,
                found_in,
                route_number: route,
                vehicle_number: vehicle,
                open: match (open, closed) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                found_after: after,
                found_before: before,
                search,
                limit,
                offset,
            };
            let items = client.list_lost_items(&query).await?;
            output::print_lost_items(&items, config)?;
        }
        ItemCommands::Register {
            title,
            found_in,
            description,
            route,
            vehicle,
            found_at,
            storage,
            status,
        } => {
            let dto = CreateLostItemDto {
                title,
                description,
                found_in,
                route_number: route,
                vehicle_number: vehicle,
                found_at,
                storage_location: storage,
                status,
            };
            let item = client.create_lost_item(&dto).await?;
            output::print_lost_item(&item, config)?;
        }
        ItemCommands::Get { id } => match client.get_lost_item(id).await? {
            Some(item) => output::print_lost_item(&item, config)?,
            None => return Err(format!("Lost item {} not found", id).into()),
        },
        ItemCommands::Update {
            id,
            title,
            description,
            found_in,
            route,
            vehicle,
            found_at,
            storage,
            status,
        } => {
            let dto = UpdateLostItemDto {
                title,
                description: clearable(description),
                found_in,
                route_number: clearable(route),
                vehicle_number: clearable(vehicle),
                found_at,
                storage_location: clearable(storage),
                status,
            };
            let item = client.update_lost_item(id, &dto).await?;
            output::print_lost_item(&item, config)?;
        }
        ItemCommands::Delete { id } => {
            client.delete_lost_item(id).await?;
            if !config.quiet {
                println!("Deleted lost item {}", id);
            }
        }
    }
    Ok(())
}
