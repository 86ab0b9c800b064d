use anyhow::Result;

use kisskh::{HomeFeedClient, KissKhExtension, SearchFeedClient, Tab, Track, TrackClient};

use super::output::{print_item, print_json, print_shelves};
use crate::OutputFormat;

pub async fn cmd_tabs(ext: &KissKhExtension, format: OutputFormat) -> Result<()> {
    let tabs = ext.home_tabs().await?;
    if format == OutputFormat::Json {
        return print_json(&tabs);
    }
    for tab in &tabs {
        println!("{:<10} {}", tab.id, tab.title);
    }
    Ok(())
}

pub async fn cmd_home(ext: &KissKhExtension, page: u32, format: OutputFormat) -> Result<()> {
    // Pages travel to the feed as tab ids
    let tab = Tab::new(&page.to_string(), &format!("Page {page}"));
    let shelves = ext.home_feed(Some(&tab)).await?;
    print_shelves(&shelves, format)
}

pub async fn cmd_search(ext: &KissKhExtension, query: &str, format: OutputFormat) -> Result<()> {
    let shelves = ext.search_feed(query, None).await?;
    print_shelves(&shelves, format)
}

pub async fn cmd_quick_search(
    ext: &KissKhExtension,
    query: &str,
    format: OutputFormat,
) -> Result<()> {
    let results = ext.quick_search(query).await?;
    if format == OutputFormat::Json {
        return print_json(&results);
    }
    for result in &results {
        print_item(&result.item);
    }
    Ok(())
}

pub async fn cmd_track(ext: &KissKhExtension, id: &str, format: OutputFormat) -> Result<()> {
    let stub = Track {
        id: id.to_string(),
        title: id.to_string(),
        thumbnail: None,
        description: None,
    };
    let track = ext.load_track(&stub).await?;
    if format == OutputFormat::Json {
        return print_json(&track);
    }

    println!("Title: {}", track.title);
    println!("Id: {}", track.id);
    if let Some(ref thumb) = track.thumbnail {
        println!("Thumbnail: {thumb}");
    }
    if let Some(ref desc) = track.description {
        println!("Description: {desc}");
    }
    Ok(())
}
