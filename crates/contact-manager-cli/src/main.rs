use anyhow::Result;
use clap::Parser;
use config::{Command, Config};
use contact_manager_api::service::create_service_context;
use log::info;

mod commands;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Parse command line arguments and env vars with clap
    let conf = Config::parse();
    let service_context = create_service_context(conf.api_config());

    match conf.command {
        Command::List { filter } => commands::list(&service_context, filter).await?,
        Command::Show { id } => commands::show(&service_context, &id.into()).await?,
        Command::Add {
            name,
            phone,
            email,
            favorite,
            blocked,
        } => {
            let mut draft = contact_manager_api::data::ContactDraft::new(name, phone);
            draft.email = email;
            draft.is_favorite = favorite;
            draft.is_blocked = blocked;
            commands::add(&service_context, draft).await?
        }
        Command::Edit {
            id,
            name,
            email,
            phone,
            favorite,
            blocked,
        } => {
            let changes = commands::EditChanges {
                name,
                email,
                phone,
                is_favorite: favorite,
                is_blocked: blocked,
            };
            commands::edit(&service_context, &id.into(), changes).await?
        }
        Command::Favorite { id } => commands::favorite(&service_context, &id.into()).await?,
        Command::Block { id } => commands::block(&service_context, &id.into()).await?,
    }

    info!("done");
    Ok(())
}
