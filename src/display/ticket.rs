//! Ticket display formatting
//!
//! Formats support tickets for terminal output.

use crate::models::Ticket;

/// Format a list of tickets as a table
pub fn format_ticket_list(tickets: &[Ticket]) -> String {
    if tickets.is_empty() {
        return "No tickets found.".to_string();
    }

    let subject_width = tickets
        .iter()
        .map(|t| t.subject.len())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<subject_width$}  {:<11}  {:<8}  {}\n",
        "ID",
        "Subject",
        "Status",
        "Priority",
        "Opened",
        subject_width = subject_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<subject_width$}  {:-<11}  {:-<8}  {:-<16}\n",
        "",
        "",
        "",
        "",
        "",
        subject_width = subject_width,
    ));

    for ticket in tickets {
        output.push_str(&format!(
            "{:<12}  {:<subject_width$}  {:<11}  {:<8}  {}\n",
            ticket.id.to_string(),
            ticket.subject,
            ticket.status.to_string(),
            ticket.priority.to_string(),
            ticket.created_at.format("%Y-%m-%d %H:%M"),
            subject_width = subject_width,
        ));
    }

    output
}

/// Format a single ticket's details
pub fn format_ticket_details(ticket: &Ticket) -> String {
    let mut output = String::new();

    output.push_str(&format!("Ticket: {}\n", ticket.subject));
    output.push_str(&format!("  ID:       {}\n", ticket.id));
    output.push_str(&format!("  Customer: {}\n", ticket.customer_id));
    output.push_str(&format!("  Status:   {}\n", ticket.status));
    output.push_str(&format!("  Priority: {}\n", ticket.priority));

    match &ticket.assigned_to {
        Some(admin_id) => output.push_str(&format!("  Assigned: {}\n", admin_id)),
        None => output.push_str("  Assigned: (unassigned)\n"),
    }

    if !ticket.body.is_empty() {
        output.push('\n');
        output.push_str(&format!("  {}\n", ticket.body));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Opened:   {}\n",
        ticket.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        ticket.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomerId;

    #[test]
    fn test_format_ticket_list() {
        let tickets = vec![Ticket::new(CustomerId::new(), "No output under load")];

        let output = format_ticket_list(&tickets);
        assert!(output.contains("No output under load"));
        assert!(output.contains("Open"));
        assert!(output.contains("Medium"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_ticket_list(&[]);
        assert!(output.contains("No tickets found"));
    }

    #[test]
    fn test_format_ticket_details_unassigned() {
        let ticket = Ticket::new(CustomerId::new(), "No output under load");
        let output = format_ticket_details(&ticket);
        assert!(output.contains("(unassigned)"));
    }
}
