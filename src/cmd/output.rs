use anyhow::Result;
use serde::Serialize;

use kisskh::{MediaItem, Shelf};

use crate::OutputFormat;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_item(item: &MediaItem) {
    match &item.thumbnail {
        Some(thumb) => println!("  {:>8}  {}  [{thumb}]", item.id, item.title),
        None => println!("  {:>8}  {}", item.id, item.title),
    }
}

pub fn print_shelves(shelves: &[Shelf], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(shelves);
    }
    if shelves.is_empty() {
        println!("No results");
    }
    for shelf in shelves {
        println!("{} ({})", shelf.title, shelf.items.len());
        for item in &shelf.items {
            print_item(item);
        }
    }
    Ok(())
}
