//! Purchase request display formatting
//!
//! Formats purchase requests for terminal output.

use crate::models::PurchaseRequest;

/// Format a list of purchase requests as a table
pub fn format_request_list(requests: &[PurchaseRequest]) -> String {
    if requests.is_empty() {
        return "No purchase requests found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<12}  {:<12}  {:>4}  {:<9}  {}\n",
        "ID", "Customer", "Generator", "Qty", "Status", "Submitted",
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<12}  {:-<12}  {:->4}  {:-<9}  {:-<16}\n",
        "", "", "", "", "", "",
    ));

    for request in requests {
        output.push_str(&format!(
            "{:<12}  {:<12}  {:<12}  {:>4}  {:<9}  {}\n",
            request.id.to_string(),
            request.customer_id.to_string(),
            request.generator_id.to_string(),
            request.quantity,
            request.status.to_string(),
            request.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }

    output
}

/// Format a single purchase request's details
pub fn format_request_details(request: &PurchaseRequest) -> String {
    let mut output = String::new();

    output.push_str(&format!("Purchase Request: {}\n", request.id));
    output.push_str(&format!("  Customer:  {}\n", request.customer_id));
    output.push_str(&format!("  Generator: {}\n", request.generator_id));
    output.push_str(&format!("  Quantity:  {}\n", request.quantity));
    output.push_str(&format!("  Status:    {}\n", request.status));

    if !request.notes.is_empty() {
        output.push('\n');
        output.push_str(&format!("  Notes: {}\n", request.notes));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Submitted: {}\n",
        request.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified:  {}\n",
        request.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerId, GeneratorId};

    #[test]
    fn test_format_request_list() {
        let requests = vec![PurchaseRequest::new(CustomerId::new(), GeneratorId::new(), 3)];

        let output = format_request_list(&requests);
        assert!(output.contains("Pending"));
        assert!(output.contains("3"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_request_list(&[]);
        assert!(output.contains("No purchase requests found"));
    }
}
