use serde::Serialize;

use crate::models::{Alias, Domain, DomainAlias, Forwarding, Mailbox};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_lines(lines: &[String], empty: &str) {
    if lines.is_empty() {
        println!("{}", empty);
        return;
    }
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Text Rendering
// ============================================================================

pub fn domain_lines(domain: &Domain) -> Vec<String> {
    let mut lines = Vec::with_capacity(1 + domain.aliases.len() + domain.catchalls.len());

    let mut head = domain.domain.clone();
    if !domain.description.is_empty() {
        head.push_str(&format!(" ({})", domain.description));
    }
    if !domain.settings.is_empty() {
        head.push_str(&format!(" [{}]", domain.settings));
    }
    lines.push(head);

    for alias in &domain.aliases {
        lines.push(format!("  alias     {}", alias.alias));
    }
    for catchall in &domain.catchalls {
        lines.push(format!("  catch-all -> {}", catchall.forwarding));
    }

    lines
}

pub fn domain_alias_line(alias: &DomainAlias) -> String {
    format!("{} -> {}", alias.alias, alias.domain)
}

pub fn forwarding_line(forwarding: &Forwarding) -> String {
    format!("{} -> {}", forwarding.address, forwarding.forwarding)
}

pub fn mailbox_line(mailbox: &Mailbox) -> String {
    if mailbox.name.is_empty() {
        mailbox.email.clone()
    } else {
        format!("{} ({})", mailbox.email, mailbox.name)
    }
}

pub fn alias_lines(alias: &Alias) -> Vec<String> {
    let mut lines = vec![if alias.name.is_empty() {
        alias.address.clone()
    } else {
        format!("{} ({})", alias.address, alias.name)
    }];
    for member in &alias.forwardings {
        lines.push(format!("  -> {}", member.forwarding));
    }
    lines
}
