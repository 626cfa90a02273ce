//! The export command: prompt for a token, crawl, and report.

use crate::cli::CliContext;
use crate::core::client::VaultClient;
use crate::core::crawl::{self, CrawlOptions, CrawlSummary};
use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

pub fn run(ctx: &CliContext) -> Result<()> {
    let token = read_token()?;
    let client = VaultClient::new(&ctx.target, token, ctx.list_method)
        .with_context(|| format!("build client for {}", ctx.target))?;
    debug!(vault = %ctx.target, list_method = ?client.list_method(), "client ready");

    let opts = CrawlOptions { pause: ctx.pause };
    let summary = crawl::run_export(&client, &ctx.output, &opts)?;

    print_summary(&summary);
    println!(
        "\n{} groups exported to {} ({} failed).",
        summary.total_rows(),
        ctx.output.display(),
        summary.total_failed()
    );
    Ok(())
}

fn read_token() -> Result<Zeroizing<String>> {
    let token = Zeroizing::new(
        Password::new()
            .with_prompt("Enter Vault Token")
            .allow_empty_password(false)
            .interact()
            .context("read token from prompt")?,
    );
    if token.trim().is_empty() {
        bail!("token cannot be blank");
    }
    Ok(token)
}

fn print_summary(summary: &CrawlSummary) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Namespace").add_attribute(Attribute::Bold),
        Cell::new("Groups").add_attribute(Attribute::Bold),
        Cell::new("Exported").add_attribute(Attribute::Bold),
        Cell::new("Failed").add_attribute(Attribute::Bold),
    ]);

    for ns in &summary.namespaces {
        let failed = if ns.failed_groups == 0 {
            "-".to_string()
        } else {
            ns.failed_groups.to_string()
        };
        table.add_row(vec![
            ns.namespace.clone(),
            ns.groups_listed.to_string(),
            ns.rows_written.to_string(),
            failed,
        ]);
    }

    println!("{}", table);
}
