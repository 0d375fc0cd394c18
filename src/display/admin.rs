//! Admin account display formatting
//!
//! Formats admin accounts and their capability matrix for terminal output.

use crate::models::{AdminUser, Module};

/// Format a list of admin accounts as a table
pub fn format_admin_list(admins: &[AdminUser]) -> String {
    if admins.is_empty() {
        return "No admin accounts found.".to_string();
    }

    let name_width = admins
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let email_width = admins
        .iter()
        .map(|a| a.email.len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<email_width$}  {:<11}  {}\n",
        "ID",
        "Name",
        "Email",
        "Role",
        "Status",
        name_width = name_width,
        email_width = email_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<email_width$}  {:-<11}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        email_width = email_width,
    ));

    for admin in admins {
        let status = if admin.active { "Active" } else { "Inactive" };
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:<email_width$}  {:<11}  {}\n",
            admin.id.to_string(),
            admin.name,
            admin.email,
            admin.role.to_string(),
            status,
            name_width = name_width,
            email_width = email_width,
        ));
    }

    output
}

/// Format a single admin's details including the capability matrix
pub fn format_admin_details(admin: &AdminUser) -> String {
    let mut output = String::new();

    output.push_str(&format!("Admin: {}\n", admin.name));
    output.push_str(&format!("  ID:     {}\n", admin.id));
    output.push_str(&format!("  Email:  {}\n", admin.email));
    output.push_str(&format!("  Role:   {}\n", admin.role));
    output.push_str(&format!(
        "  Status: {}\n",
        if admin.active { "Active" } else { "Inactive" }
    ));

    output.push('\n');
    output.push_str("  Permissions (create/read/update/delete):\n");
    for module in Module::ALL {
        let permissions = admin.permissions.module(*module);
        let flag = |allowed: bool| if allowed { "yes" } else { " - " };
        output.push_str(&format!(
            "    {:<18} {:>4} {:>4} {:>4} {:>4}\n",
            module.to_string(),
            flag(permissions.create),
            flag(permissions.read),
            flag(permissions.update),
            flag(permissions.delete),
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        admin.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        admin.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminRole;

    #[test]
    fn test_format_admin_list() {
        let admins = vec![
            AdminUser::new("Root", "root@example.com", AdminRole::SuperAdmin),
            AdminUser::new("Desk", "desk@example.com", AdminRole::Admin),
        ];

        let output = format_admin_list(&admins);
        assert!(output.contains("root@example.com"));
        assert!(output.contains("Desk"));
    }

    #[test]
    fn test_format_admin_details_shows_matrix() {
        let admin = AdminUser::new("Desk", "desk@example.com", AdminRole::Admin);
        let output = format_admin_details(&admin);
        assert!(output.contains("Permissions"));
        assert!(output.contains("tickets"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_admin_list(&[]);
        assert!(output.contains("No admin accounts found"));
    }
}
