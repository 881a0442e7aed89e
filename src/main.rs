mod cli;

use clap::Parser;
use serde::Serialize;

use cli::{CliArgs, CollectionCommand, Command, PrefsCommand, SavedCommand};
use golem_lib::commands;
use golem_lib::models::CreateSavedRequest;
use golem_lib::{AppConfig, AppState};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    golem_lib::init_logging(args.log_level.as_deref());

    let config = AppConfig::resolve(args.data_dir.clone());
    let state = match AppState::initialize(config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&state, args.command).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(state: &AppState, command: Command) -> Result<(), String> {
    match command {
        Command::Send { method, url } => {
            let (outcome, history_write) = commands::send_request(state, &method, &url).await;
            // Wait for the history row before the process exits
            if let Some(history_write) = history_write {
                if let Err(e) = history_write.await {
                    log::error!("History task failed: {}", e);
                }
            }

            let response = outcome.map_err(|e| format!("Error: {}", e))?;
            println!("{}", response.summary());
            for header in &response.headers {
                println!("{}: {}", header.key, header.value);
            }
            println!();
            println!("{}", response.body);
        }
        Command::History { limit, offset } => {
            print_json(&commands::load_history(state, limit, offset).await?)?;
        }
        Command::Search { term, limit } => {
            print_json(&commands::search_history(state, term, limit).await?)?;
        }
        Command::Forget { id } => {
            if !commands::delete_history_entry(state, id).await? {
                println!("No history entry {}", id);
            }
        }
        Command::ClearHistory => {
            let removed = commands::clear_history(state).await?;
            println!("Removed {} history entries", removed);
        }
        Command::Export { path } => {
            let count = commands::export_history(state, path.clone()).await?;
            println!("Exported {} entries to {}", count, path.display());
        }
        Command::Import { path } => {
            let count = commands::import_history(state, path.clone()).await?;
            println!("Imported {} entries from {}", count, path.display());
        }
        Command::Collections(cmd) => match cmd {
            CollectionCommand::List => print_json(&commands::load_collections(state).await?)?,
            CollectionCommand::Create { name, description } => {
                print_json(&commands::create_collection(state, name, description).await?)?
            }
            CollectionCommand::Delete { id } => {
                if !commands::delete_collection(state, id).await? {
                    println!("No collection {}", id);
                }
            }
        },
        Command::Saved(cmd) => match cmd {
            SavedCommand::List { collection } => {
                print_json(&commands::load_saved_requests(state, collection).await?)?
            }
            SavedCommand::Add { name, method, url, collection } => {
                let request = CreateSavedRequest {
                    name,
                    url,
                    method,
                    headers: None,
                    body: None,
                    collection_id: collection,
                };
                print_json(&commands::create_saved_request(state, request).await?)?
            }
            SavedCommand::Show { id } => print_json(&commands::get_saved_request(state, id).await?)?,
            SavedCommand::Delete { id } => {
                if !commands::delete_saved_request(state, id).await? {
                    println!("No saved request {}", id);
                }
            }
        },
        Command::Prefs(cmd) => match cmd {
            PrefsCommand::List => print_json(&commands::load_preferences(state).await?)?,
            PrefsCommand::Get { key } => match commands::get_preference(state, key.clone()).await? {
                Some(pref) => println!("{}", pref.value),
                None => println!("{} is not set", key),
            },
            PrefsCommand::Set { key, value } => commands::set_preference(state, key, value).await?,
        },
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| format!("Failed to format output: {}", e))?;
    println!("{}", text);
    Ok(())
}
