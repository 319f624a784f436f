//! Top-level menu loop.
//!
//! One choice is processed to a terminal outcome before the next is
//! read. Flow errors are reported and absorbed here, the loop always
//! regains control; only quitting (or losing the input source) ends it.

use super::prompt::LineReader;
use super::workflows::{
    add_artist_flow, add_artwork_flow, change_status_flow, delete_artwork_flow,
    list_artworks_flow, FlowOutcome, ALL_STATUSES, AVAILABLE_ONLY,
};
use crate::catalog_store::CatalogStore;
use crate::cli_style;
use anyhow::Result;
use tracing::error;

fn print_menu() {
    println!();
    cli_style::print_heading("ART CATALOG");
    println!("(1) Add a new artist");
    println!("(2) Show all artworks by an artist");
    println!("(3) Show available artworks by an artist");
    println!("(4) Add a new artwork");
    println!("(5) Delete an artwork");
    println!("(6) Change an artwork's availability");
    cli_style::print_rule();
    println!("An empty line or Ctrl-C cancels any prompt.");
    println!();
}

pub fn run_menu(store: &dyn CatalogStore, reader: &mut dyn LineReader) -> Result<()> {
    loop {
        print_menu();
        let choice = match reader.read_line("Please choose an option, type Q to quit: ")? {
            Some(choice) => choice,
            None => return Ok(()),
        };
        if choice.chars().count() > 1 {
            println!("Invalid entry.");
            continue;
        }

        let outcome = match choice.as_str() {
            "1" => add_artist_flow(store, reader),
            "2" => list_artworks_flow(store, reader, ALL_STATUSES),
            "3" => list_artworks_flow(store, reader, AVAILABLE_ONLY),
            "4" => add_artwork_flow(store, reader),
            "5" => delete_artwork_flow(store, reader),
            "6" => change_status_flow(store, reader),
            "Q" | "q" => return Ok(()),
            _ => continue,
        };

        match outcome {
            Ok(FlowOutcome::Completed) => {}
            Ok(FlowOutcome::Cancelled) => println!("Cancelled."),
            Err(err) => {
                error!("Operation failed: {err:#}");
                cli_style::print_error(&format!("{err:#}"));
            }
        }
    }
}
