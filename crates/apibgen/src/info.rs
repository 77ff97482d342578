use std::path::PathBuf;

use crate::prelude::{println, *};
use apibgen_core::collection::{Collection, Item};

#[derive(Debug, clap::Args)]
pub struct Options {
    /// Path to the collection JSON export
    #[clap(env = "APIBGEN_INPUT")]
    pub input: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct InfoOutput {
    pub name: String,
    pub description: String,
    pub host: String,
    pub variables: usize,
    pub folders: usize,
    pub requests: usize,
}

/// Summarize a loaded collection without rendering it.
pub fn collect_info(collection: &Collection) -> InfoOutput {
    InfoOutput {
        name: collection.title().to_string(),
        description: collection.description_text().to_string(),
        host: collection.domain(),
        variables: collection.variable_map().len(),
        folders: collection.items.iter().filter(|i| i.is_folder()).count(),
        requests: count_requests(&collection.items),
    }
}

fn count_requests(items: &[Item]) -> usize {
    items
        .iter()
        .map(|item| usize::from(item.request.is_some()) + count_requests(&item.children))
        .sum()
}

pub fn run(options: Options, _global: crate::Global) -> Result<()> {
    let collection = crate::convert::load_collection(&options.input)?;
    let output = collect_info(&collection);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["Name", output.name]);
    table.add_row(prettytable::row!["Host", output.host]);
    table.add_row(prettytable::row!["Variables", output.variables]);
    table.add_row(prettytable::row!["Folders", output.folders]);
    table.add_row(prettytable::row!["Requests", output.requests]);
    table.printstd();

    if !output.description.is_empty() {
        println!();
        println!("{}", output.description);
    }

    Ok(())
}
