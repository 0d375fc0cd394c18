//! Generator catalog display formatting
//!
//! Formats generator models for terminal output.

use crate::models::GeneratorModel;

/// Format a price in cents as dollars
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}

/// Format a list of generator models as a table
pub fn format_generator_list(generators: &[GeneratorModel]) -> String {
    if generators.is_empty() {
        return "No generator models found.".to_string();
    }

    let name_width = generators
        .iter()
        .map(|g| g.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let brand_width = generators
        .iter()
        .map(|g| g.brand.len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<brand_width$}  {:<11}  {:>8}  {:>12}  {:>5}  {}\n",
        "Name",
        "Brand",
        "Fuel",
        "Power",
        "Price",
        "Stock",
        "Status",
        name_width = name_width,
        brand_width = brand_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<brand_width$}  {:-<11}  {:->8}  {:->12}  {:->5}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        brand_width = brand_width,
    ));

    for generator in generators {
        let status = if generator.archived { "Archived" } else { "" };
        output.push_str(&format!(
            "{:<name_width$}  {:<brand_width$}  {:<11}  {:>6}kW  {:>12}  {:>5}  {}\n",
            generator.name,
            generator.brand,
            generator.fuel.to_string(),
            generator.power_kw,
            format_price(generator.price_cents),
            generator.stock,
            status,
            name_width = name_width,
            brand_width = brand_width,
        ));
    }

    output
}

/// Format a single generator model's details
pub fn format_generator_details(generator: &GeneratorModel) -> String {
    let mut output = String::new();

    output.push_str(&format!("Generator: {}\n", generator.name));
    output.push_str(&format!("  ID:       {}\n", generator.id));
    output.push_str(&format!("  Brand:    {}\n", generator.brand));
    output.push_str(&format!("  Fuel:     {}\n", generator.fuel));
    output.push_str(&format!("  Power:    {} kW\n", generator.power_kw));
    output.push_str(&format!(
        "  Price:    {}\n",
        format_price(generator.price_cents)
    ));
    output.push_str(&format!("  Stock:    {}\n", generator.stock));
    output.push_str(&format!(
        "  Archived: {}\n",
        if generator.archived { "Yes" } else { "No" }
    ));

    if !generator.description.is_empty() {
        output.push('\n');
        output.push_str(&format!("  {}\n", generator.description));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        generator.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        generator.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
