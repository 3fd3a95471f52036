use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use printshop_catalog::ProductCatalog;
use printshop_observability::LogFormat;
use printshop_pricing::{PriceBreakdown, PricingPolicy, ProductCustomization, format_price, quote};

/// Price a print order from a catalog file and a customization file.
#[derive(Debug, Parser)]
#[command(name = "printshop-quote", version, about)]
struct Args {
    /// Product catalog (JSON array of products).
    #[arg(long)]
    catalog: PathBuf,

    /// Customization to price (JSON object).
    #[arg(long)]
    customization: PathBuf,

    /// Pricing policy file (.toml or .json). Built-in rates when omitted.
    #[arg(long, env = "PRINTSHOP_POLICY")]
    policy: Option<PathBuf>,

    /// Print the breakdown as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.json_logs {
        printshop_observability::init();
    } else {
        printshop_observability::init_with(LogFormat::Compact);
    }

    let catalog = load_catalog(&args.catalog)?;
    let customization = load_customization(&args.customization)?;
    let policy = match &args.policy {
        Some(path) => PricingPolicy::load(path)
            .with_context(|| format!("Failed to load pricing policy: {}", path.display()))?,
        None => PricingPolicy::default(),
    };

    let today = chrono::Local::now().date_naive();
    if !policy.is_effective_on(today) {
        tracing::warn!(
            version = policy.version,
            effective_from = ?policy.effective_from,
            "pricing policy is not yet in effect"
        );
    }

    let breakdown = quote(&catalog, &customization, &policy)
        .with_context(|| format!("Failed to price {}", customization.product_id))?;

    tracing::info!(
        product = %customization.product_id,
        quantity = breakdown.quantity,
        final_price = breakdown.final_price,
        "quote ready"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print!("{}", render(&breakdown));
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<ProductCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    ProductCatalog::from_json_str(&content)
        .with_context(|| format!("Failed to load catalog: {}", path.display()))
}

fn load_customization(path: &Path) -> Result<ProductCustomization> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read customization: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse customization: {}", path.display()))
}

fn render(b: &PriceBreakdown) -> String {
    let mut rows = vec![
        ("Base price", format_price(b.base_price)),
        ("Size multiplier", format!("x{}", b.size_multiplier)),
        ("Paper multiplier", format!("x{}", b.paper_multiplier)),
    ];

    let additions = [
        ("Colour", b.color_addition),
        ("Double-sided", b.double_side_addition),
        ("Lamination", b.lamination_addition),
    ];
    rows.extend(
        additions
            .into_iter()
            .filter(|(_, amount)| *amount != 0.0)
            .map(|(label, amount)| (label, format!("+{}", format_price(amount)))),
    );

    rows.push(("Quantity", b.quantity.to_string()));
    rows.push(("Subtotal", format_price(b.subtotal)));
    if b.finishing_addition != 0.0 {
        rows.push(("Finishing", format!("+{}", format_price(b.finishing_addition))));
    }
    if b.urgent_addition != 0.0 {
        rows.push(("Urgent delivery", format!("+{}", format_price(b.urgent_addition))));
    }
    if b.bulk_discount != 0.0 {
        rows.push((
            "Bulk discount",
            format!("-{} ({}%)", format_price(b.bulk_discount), b.bulk_discount_percent),
        ));
    }
    rows.push(("Total", format_price(b.final_price)));
    rows.push(("Per unit", format_price(b.price_per_unit)));

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{label:<width$}  {value}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown() -> PriceBreakdown {
        PriceBreakdown {
            base_price: 10.0,
            size_multiplier: 1.0,
            paper_multiplier: 1.0,
            color_addition: 200.0,
            double_side_addition: 0.0,
            lamination_addition: 0.0,
            finishing_addition: 0.0,
            urgent_addition: 0.0,
            quantity: 100,
            unit_price: 12.0,
            subtotal: 1200.0,
            bulk_discount_percent: 0.0,
            bulk_discount: 0.0,
            final_price: 1200.0,
            price_per_unit: 12.0,
        }
    }

    #[test]
    fn render_lists_only_applied_modifiers() {
        let text = render(&breakdown());
        assert!(text.contains("Colour"));
        assert!(text.contains("+₹200"));
        assert!(!text.contains("Double-sided"));
        assert!(!text.contains("Bulk discount"));
        assert!(text.contains("Total             ₹1,200\n"));
        assert!(text.ends_with("Per unit          ₹12\n"));
    }

    #[test]
    fn render_lists_order_level_adjustments() {
        let b = PriceBreakdown {
            color_addition: 0.0,
            unit_price: 10.0,
            subtotal: 1000.0,
            finishing_addition: 40.0,
            urgent_addition: 250.0,
            bulk_discount_percent: 10.0,
            bulk_discount: 129.0,
            final_price: 1161.0,
            price_per_unit: 11.61,
            ..breakdown()
        };

        let text = render(&b);
        assert!(!text.contains("Colour"));
        assert!(text.contains("Finishing         +₹40\n"));
        assert!(text.contains("Urgent delivery   +₹250\n"));
        assert!(text.contains("Bulk discount     -₹129 (10%)\n"));
        assert!(text.contains("Total             ₹1,161\n"));
        assert!(text.ends_with("Per unit          ₹11.61\n"));

        let subtotal = text.find("Subtotal").unwrap();
        let discount = text.find("Bulk discount").unwrap();
        assert!(subtotal < text.find("Finishing").unwrap());
        assert!(text.find("Urgent delivery").unwrap() < discount);
        assert!(discount < text.find("Total").unwrap());
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "printshop-quote",
            "--catalog",
            "catalog.json",
            "--customization",
            "order.json",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.catalog, PathBuf::from("catalog.json"));
        assert!(args.json);
        assert!(!args.json_logs);
    }
}
