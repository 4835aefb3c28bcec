use super::output::{forwarding_line, print_json, print_lines};
use super::{ForwardingCommand, Services};
use crate::entities::ForwardingQuery;
use crate::models::FilterBy;

pub async fn run(command: ForwardingCommand, services: &Services) -> anyhow::Result<()> {
    match command {
        ForwardingCommand::List(args) => {
            let query = match args.domain {
                Some(domain) => ForwardingQuery::ByDomain(domain),
                None => ForwardingQuery::All,
            };
            let forwardings = services.forwardings.query(&query).await?.filter_by(&args.filter);
            if args.json {
                return print_json(&forwardings);
            }
            let lines: Vec<String> = forwardings.iter().map(forwarding_line).collect();
            print_lines(&lines, "No forwardings found");
        }
        ForwardingCommand::Add { address, target } => {
            services.forwardings.add(&address, &target).await?;
            println!("Successfully added forwarding {} -> {}", address, target);
        }
        ForwardingCommand::Delete { address, target } => {
            services.forwardings.delete(&address, &target).await?;
            println!("Successfully deleted forwarding {} -> {}", address, target);
        }
    }
    Ok(())
}
