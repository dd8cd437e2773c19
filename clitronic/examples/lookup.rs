//! Look up components by free text and list one category.
//!
//! Run: cargo run --example lookup -- "push button"

use clitronic::prelude::*;

fn main() {
    let query = std::env::args().nth(1).unwrap_or_else(|| "red led".to_string());
    let catalog = builtin_catalog();

    match catalog.resolve(&query) {
        Some(component) => {
            println!("{} ({})", component.name, component.category);
            println!("  {}", component.description);
            for spec in &component.specs {
                println!("  {}: {}", spec.label, spec.value);
            }
        }
        None => println!("No component matches {:?}", query),
    }

    println!("\nInput components:");
    for component in catalog.search(&SearchQuery::in_category(Category::Input)) {
        println!("  {:<16} {}", component.id, component.name);
    }
}
