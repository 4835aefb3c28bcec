use super::output::{domain_lines, print_json, print_lines};
use super::{DomainCommand, Services};
use crate::models::{Domain, FilterBy};

pub async fn run(command: DomainCommand, services: &Services) -> anyhow::Result<()> {
    match command {
        DomainCommand::List(args) => {
            let domains = match &args.domain {
                Some(name) => services.domains.list_by_name(name).await?,
                None => services.domains.list().await?,
            };
            let domains = domains.filter_by(&args.filter);
            if args.json {
                return print_json(&domains);
            }
            let lines: Vec<String> = domains.iter().flat_map(domain_lines).collect();
            print_lines(&lines, "No domains found");
        }
        DomainCommand::Info { domain, json } => {
            let domain = services.domains.get(&domain).await?;
            if json {
                return print_json(&domain);
            }
            print_lines(&domain_lines(&domain), "");
        }
        DomainCommand::Add { domain, description, settings } => {
            services
                .domains
                .add(
                    Domain::new(domain.as_str())
                        .with_description(description)
                        .with_settings(settings),
                )
                .await?;
            println!("Successfully added domain {}", domain);
        }
        DomainCommand::Delete { domain } => {
            services.domains.delete(&domain).await?;
            println!("Successfully deleted domain {}", domain);
        }
    }
    Ok(())
}
