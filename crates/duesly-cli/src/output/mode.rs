use crate::cli::{Commands, ImportCommand, RequestCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Request { command } => match command {
            RequestCommand::List { json, .. } | RequestCommand::Due { json, .. } => *json,
        },
        Commands::Badge { json, .. } => *json,
        Commands::Import { command } => match command {
            ImportCommand::Create { json, .. }
            | ImportCommand::List { json }
            | ImportCommand::Undo { json, .. } => *json,
        },
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
