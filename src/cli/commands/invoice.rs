//! Shell commands that call into the ledger store.

use crate::cli::core::{parse_amount, parse_id, CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn};
use crate::domain::{Displayable, Invoice, InvoiceId};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "create",
            "Record a new invoice as Pending",
            "create <client> <amount> [description...]",
            cmd_create,
        ),
        CommandEntry::new("pay", "Mark an invoice as fully paid", "pay <id>", cmd_pay),
        CommandEntry::new(
            "partial",
            "Record a partial payment toward an invoice",
            "partial <id> <amount>",
            cmd_partial,
        ),
        CommandEntry::new(
            "delete",
            "Permanently remove an invoice",
            "delete <id>",
            cmd_delete,
        ),
        CommandEntry::new("list", "Show every invoice", "list", cmd_list),
        CommandEntry::new("show", "Show a single invoice", "show <id>", cmd_show),
        CommandEntry::new(
            "summary",
            "Show paid and pending totals",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "dedupe",
            "Remove invoices with the same client, amount and description",
            "dedupe",
            cmd_dedupe,
        ),
    ]
}

fn cmd_create(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (client, amount, description) = match args {
        [] if context.is_interactive() => prompt_invoice(context)?,
        [client, amount, rest @ ..] => {
            (client.to_string(), parse_amount(amount)?, rest.join(" "))
        }
        _ => return Err(usage("create <client> <amount> [description...]")),
    };

    let invoice = context
        .store
        .create_invoice(&client, amount, &description)?;
    output::success(format!(
        "Invoice #{} for {} ({}) has been recorded as Pending.",
        invoice.id,
        invoice.client,
        context.money(invoice.amount)
    ));
    Ok(())
}

fn prompt_invoice(context: &ShellContext) -> Result<(String, f64, String), CommandError> {
    let client = context.prompt_text("Client name", false)?;
    let amount = parse_amount(&context.prompt_text("Amount", false)?)?;
    let description = context.prompt_text("Description", true)?;
    Ok((client, amount, description))
}

fn cmd_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = single_id(args, "pay <id>")?;
    let invoice = context.store.mark_invoice_as_paid(id)?;
    output::success(format!("Invoice #{} has been marked as Paid.", invoice.id));
    Ok(())
}

fn cmd_partial(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (id, payment) = match args {
        [id, amount] => (parse_id(id)?, parse_amount(amount)?),
        _ => return Err(usage("partial <id> <amount>")),
    };

    let balance = context.store.record_partial_payment(id, payment)?;
    output::success(format!(
        "Recorded {} toward invoice #{}. Remaining balance: {}.",
        context.money(payment),
        id,
        context.money(balance)
    ));
    if balance == 0.0 {
        output::info(format!("Invoice #{id} is now fully Paid."));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = single_id(args, "delete <id>")?;
    if context.config.confirm_deletes && context.is_interactive() {
        let invoice = context.store.get_invoice(id)?;
        let question = format!("Delete {} permanently?", invoice.display_label());
        if !context.confirm(&question)? {
            output::info("Deletion cancelled.");
            return Ok(());
        }
    }

    context.store.delete_invoice(id)?;
    output::success(format!("Invoice #{id} has been deleted."));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let invoices = context.store.list_invoices()?;
    if invoices.is_empty() {
        output::info("No invoices yet. Use `create` to record your first one.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Client").max_width(24),
        TableColumn::left("Description").max_width(32),
        TableColumn::right("Amount"),
        TableColumn::right("Paid"),
        TableColumn::right("Balance"),
        TableColumn::left("Status"),
    ]);
    for invoice in &invoices {
        table.push(invoice_row(context, invoice));
    }
    output::info(table.render());
    Ok(())
}

fn invoice_row(context: &ShellContext, invoice: &Invoice) -> Vec<String> {
    vec![
        invoice.id.to_string(),
        invoice.date.format("%Y-%m-%d").to_string(),
        invoice.client.clone(),
        invoice.description.clone(),
        context.money(invoice.amount),
        context.money(invoice.paid_amount),
        context.money(invoice.balance()),
        output::status_label(invoice.is_paid()),
    ]
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = single_id(args, "show <id>")?;
    let invoice = context.store.get_invoice(id)?;
    output::section(format!("Invoice #{}", invoice.id));
    output::info(format!("  Client      : {}", invoice.client));
    output::info(format!("  Description : {}", invoice.description));
    output::info(format!("  Date        : {}", invoice.date));
    output::info(format!("  Amount      : {}", context.money(invoice.amount)));
    output::info(format!("  Paid        : {}", context.money(invoice.paid_amount)));
    output::info(format!("  Balance     : {}", context.money(invoice.balance())));
    output::info(format!(
        "  Status      : {}",
        output::status_label(invoice.is_paid())
    ));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.store.get_financial_summary()?;
    output::section("Financial Overview");
    output::info(format!("- Total Paid: {}", context.money(summary.total_paid)));
    output::info(format!(
        "- Total Pending: {}",
        context.money(summary.total_pending)
    ));
    output::info(format!("- Outstanding Invoices: {}", summary.pending_count));
    output::info(format!(
        "- Still Owed: {} (received {} across {} invoice(s))",
        context.money(summary.outstanding_balance),
        context.money(summary.total_received),
        summary.invoice_count
    ));
    Ok(())
}

fn cmd_dedupe(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let removed = context.store.remove_duplicate_invoices()?;
    output::success(format!(
        "Cleanup complete! Removed {removed} duplicate entries."
    ));
    Ok(())
}

fn single_id(args: &[&str], usage_text: &str) -> Result<InvoiceId, CommandError> {
    match args {
        [id] => parse_id(id),
        _ => Err(usage(usage_text)),
    }
}

fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {text}"))
}
