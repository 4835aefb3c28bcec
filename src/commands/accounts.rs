use super::output::{alias_lines, mailbox_line, print_json, print_lines};
use super::{ListArgs, Services};
use crate::entities::{AliasQuery, MailboxQuery};
use crate::models::FilterBy;

pub async fn list_mailboxes(args: &ListArgs, services: &Services) -> anyhow::Result<()> {
    let query = match &args.domain {
        Some(domain) => MailboxQuery::ByDomain(domain.clone()),
        None => MailboxQuery::All,
    };
    let mailboxes = services.mailboxes.query(&query).await?.filter_by(&args.filter);
    if args.json {
        return print_json(&mailboxes);
    }
    let lines: Vec<String> = mailboxes.iter().map(mailbox_line).collect();
    print_lines(&lines, "No mailboxes found");
    Ok(())
}

pub async fn list_aliases(args: &ListArgs, services: &Services) -> anyhow::Result<()> {
    let query = match &args.domain {
        Some(domain) => AliasQuery::ByDomain(domain.clone()),
        None => AliasQuery::All,
    };
    let aliases = services.aliases.query(&query).await?.filter_by(&args.filter);
    if args.json {
        return print_json(&aliases);
    }
    let lines: Vec<String> = aliases.iter().flat_map(alias_lines).collect();
    print_lines(&lines, "No aliases found");
    Ok(())
}
