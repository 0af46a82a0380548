use duesly_client::commands;
use duesly_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, ImportCommand, RequestCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Request { command } => match command {
            RequestCommand::List { filter, as_of, .. } => commands::requests::list(
                filter.clone(),
                as_of.as_ref().map(|value| value.as_str().to_string()),
            ),
            RequestCommand::Due {
                within,
                this_month,
                as_of,
                ..
            } => commands::requests::due(
                *within,
                *this_month,
                as_of.as_ref().map(|value| value.as_str().to_string()),
            ),
        },
        Commands::Badge { as_of, .. } => {
            commands::badge::run(as_of.as_ref().map(|value| value.as_str().to_string()))
        }
        Commands::Import { command } => match command {
            ImportCommand::Create {
                dry_run,
                json: _,
                path,
            } => commands::import::run(path.clone(), *dry_run),
            ImportCommand::List { .. } => commands::import::list(),
            ImportCommand::Undo { import_id, .. } => commands::import::undo(import_id),
        },
    }
}
