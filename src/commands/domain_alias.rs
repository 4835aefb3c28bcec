use super::output::{domain_alias_line, print_json, print_lines};
use super::{DomainAliasCommand, Services};
use crate::entities::DomainAliasQuery;
use crate::models::FilterBy;

pub async fn run(command: DomainAliasCommand, services: &Services) -> anyhow::Result<()> {
    match command {
        DomainAliasCommand::List(args) => {
            let query = match args.domain {
                Some(domain) => DomainAliasQuery::ByDomain(domain),
                None => DomainAliasQuery::All,
            };
            let aliases = services.domain_aliases.query(&query).await?.filter_by(&args.filter);
            if args.json {
                return print_json(&aliases);
            }
            let lines: Vec<String> = aliases.iter().map(domain_alias_line).collect();
            print_lines(&lines, "No domain aliases found");
        }
        DomainAliasCommand::Add { alias, domain } => {
            services.domain_aliases.add(&alias, &domain).await?;
            println!("Successfully added domain alias {} -> {}", alias, domain);
        }
        DomainAliasCommand::Delete { alias } => {
            services.domain_aliases.delete(&alias).await?;
            println!("Successfully deleted domain alias {}", alias);
        }
    }
    Ok(())
}
