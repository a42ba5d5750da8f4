use clap::ValueEnum;
use lostfound::models::LostItem;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// When true, print only IDs
    pub quiet: bool,
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Prints a list of lost items in the configured format
pub fn print_lost_items(items: &[LostItem], config: &OutputConfig) -> serde_json::Result<()> {
    match config.format {
        OutputFormat::Human => {
            if items.is_empty() {
                if !config.quiet {
                    println!("No lost items found.");
                }
                return Ok(());
            }
            if config.quiet {
                for item in items {
                    println!("{}", item.get_id());
                }
                return Ok(());
            }
            let id_width = items.iter().map(|i| i.get_id().to_string().len()).max().unwrap_or(2).max(2);
            println!("{:<id_width$}  {:<9}  {:<8}  {:<16}  TITLE", "ID", "STATUS", "FOUND IN", "FOUND AT");
            for item in items {
                println!(
                    "{:<id_width$}  {:<9}  {:<8}  {:<16}  {}",
                    item.get_id(),
                    item.get_status(),
                    item.get_found_in(),
                    item.get_found_at().format("%Y-%m-%d %H:%M"),
                    item.get_title(),
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
    }
    Ok(())
}

/// Prints a single lost item in the configured format
pub fn print_lost_item(item: &LostItem, config: &OutputConfig) -> serde_json::Result<()> {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", item.get_id());
                return Ok(());
            }
            println!("ID:          {}", item.get_id());
            println!("Title:       {}", item.get_title());
            println!("Description: {}", or_dash(item.get_description()));
            println!("Found in:    {}", item.get_found_in());
            println!("Route:       {}", or_dash(item.get_route_number()));
            println!("Vehicle:     {}", or_dash(item.get_vehicle_number()));
            println!("Found at:    {}", item.get_found_at());
            println!("Stored at:   {}", or_dash(item.get_storage_location()));
            println!("Status:      {}", item.get_status());
            println!("Created:     {}", item.get_created_at());
            println!("Updated:     {}", item.get_updated_at());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
    }
    Ok(())
}
