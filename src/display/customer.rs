//! Customer display formatting
//!
//! Formats customers for terminal output in table and detail views.

use crate::models::Customer;

/// Format a list of customers as a table
pub fn format_customer_list(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "No customers found.".to_string();
    }

    let name_width = customers
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let email_width = customers
        .iter()
        .map(|c| c.email.len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<email_width$}  {}\n",
        "ID",
        "Name",
        "Email",
        "Status",
        name_width = name_width,
        email_width = email_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<email_width$}  {:-<8}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
        email_width = email_width,
    ));

    for customer in customers {
        let status = if customer.active { "Active" } else { "Inactive" };
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:<email_width$}  {}\n",
            customer.id.to_string(),
            customer.name,
            customer.email,
            status,
            name_width = name_width,
            email_width = email_width,
        ));
    }

    output
}

/// Format a single customer's details
pub fn format_customer_details(customer: &Customer) -> String {
    let mut output = String::new();

    output.push_str(&format!("Customer: {}\n", customer.name));
    output.push_str(&format!("  ID:      {}\n", customer.id));
    output.push_str(&format!("  Email:   {}\n", customer.email));

    if !customer.phone.is_empty() {
        output.push_str(&format!("  Phone:   {}\n", customer.phone));
    }
    if !customer.company.is_empty() {
        output.push_str(&format!("  Company: {}\n", customer.company));
    }
    if !customer.address.is_empty() {
        output.push_str(&format!("  Address: {}\n", customer.address));
    }

    output.push_str(&format!(
        "  Status:  {}\n",
        if customer.active { "Active" } else { "Inactive" }
    ));

    if !customer.notes.is_empty() {
        output.push('\n');
        output.push_str(&format!("  Notes: {}\n", customer.notes));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        customer.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        customer.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_customer_list() {
        let customers = vec![
            Customer::new("Harbor Marine Ltd", "ops@harbormarine.test"),
            Customer::new("Ridge Farms", "office@ridgefarms.test"),
        ];

        let output = format_customer_list(&customers);
        assert!(output.contains("Harbor Marine Ltd"));
        assert!(output.contains("office@ridgefarms.test"));
        assert!(output.contains("Active"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_customer_list(&[]);
        assert!(output.contains("No customers found"));
    }

    #[test]
    fn test_format_customer_details() {
        let mut customer = Customer::new("Harbor Marine Ltd", "ops@harbormarine.test");
        customer.phone = "+1 555 010 2030".to_string();

        let output = format_customer_details(&customer);
        assert!(output.contains("Harbor Marine Ltd"));
        assert!(output.contains("+1 555 010 2030"));
        assert!(output.contains("Created:"));
    }
}
