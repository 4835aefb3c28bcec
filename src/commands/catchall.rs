use super::{CatchallCommand, Services};

pub async fn run(command: CatchallCommand, services: &Services) -> anyhow::Result<()> {
    match command {
        CatchallCommand::Add { domain, target } => {
            services.domains.add_catchall(&domain, &target).await?;
            println!("Successfully added catch-all {} -> {}", domain, target);
        }
        CatchallCommand::Delete { domain, target } => {
            services.domains.delete_catchall(&domain, &target).await?;
            println!("Successfully deleted catch-all {} -> {}", domain, target);
        }
    }
    Ok(())
}
