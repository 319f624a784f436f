//! The user-initiated catalog flows.
//!
//! Each flow collects validated input through the prompt loops, calls
//! the store and reports the outcome on stdout. Not-found and conflict
//! conditions are reported and recovered here; genuine storage errors
//! propagate to the menu, which reports them and keeps running. Every
//! abort path leaves the catalog unchanged.

use super::prompt::{
    prompt_artist_name, prompt_confirm_change, prompt_delete_choice, prompt_email, prompt_price,
    prompt_status, prompt_title, DeleteChoice, LineReader,
};
use crate::catalog_store::{Artist, Artwork, ArtworkStatus, CatalogError, CatalogStore};
use anyhow::Result;

/// Status pair selecting every artwork of an artist.
pub const ALL_STATUSES: [ArtworkStatus; 2] = [ArtworkStatus::Available, ArtworkStatus::Sold];

/// Status pair selecting available artwork only.
pub const AVAILABLE_ONLY: [ArtworkStatus; 2] = [ArtworkStatus::Available, ArtworkStatus::Available];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    Completed,
    Cancelled,
}

/// Prompt for an artist name until an existing artist is found. Misses
/// are reported and re-prompted; an empty line cancels.
fn resolve_artist(
    store: &dyn CatalogStore,
    reader: &mut dyn LineReader,
) -> Result<Option<Artist>> {
    loop {
        let name = match prompt_artist_name(reader)? {
            Some(name) => name,
            None => return Ok(None),
        };
        match store.find_artist(&name)? {
            Some(artist) => return Ok(Some(artist)),
            None => println!("Artist not found."),
        }
    }
}

/// Prompt for a title until an artwork of this artist is found.
fn resolve_artwork(
    store: &dyn CatalogStore,
    reader: &mut dyn LineReader,
    artist: &Artist,
) -> Result<Option<Artwork>> {
    loop {
        let title = match prompt_title(reader)? {
            Some(title) => title,
            None => return Ok(None),
        };
        match store.find_artwork(artist.id, &title)? {
            Some(artwork) => return Ok(Some(artwork)),
            None => println!("Artwork not found."),
        }
    }
}

fn print_artwork(artwork: &Artwork) {
    println!(
        "  [{}] {} by {}, ${} ({})",
        artwork.id, artwork.title, artwork.artist_name, artwork.price, artwork.status
    );
}

/// Menu option 1: add a new artist.
pub fn add_artist_flow(store: &dyn CatalogStore, reader: &mut dyn LineReader) -> Result<FlowOutcome> {
    let name = match prompt_artist_name(reader)? {
        Some(name) => name,
        None => return Ok(FlowOutcome::Cancelled),
    };
    let email = match prompt_email(reader)? {
        Some(email) => email,
        None => return Ok(FlowOutcome::Cancelled),
    };
    match store.add_artist(&name, &email) {
        Ok(artist) => {
            println!("Added artist {} (id {}).", artist.name, artist.id);
            Ok(FlowOutcome::Completed)
        }
        Err(CatalogError::DuplicateArtist { .. }) => {
            println!("Artist already in the catalog.");
            Ok(FlowOutcome::Completed)
        }
        Err(e) => Err(e.into()),
    }
}

/// Menu options 2 and 3: list an artist's artworks, all of them or the
/// available ones only, in insertion order.
pub fn list_artworks_flow(
    store: &dyn CatalogStore,
    reader: &mut dyn LineReader,
    statuses: [ArtworkStatus; 2],
) -> Result<FlowOutcome> {
    let artist = match resolve_artist(store, reader)? {
        Some(artist) => artist,
        None => return Ok(FlowOutcome::Cancelled),
    };
    let artworks = store.list_artworks(artist.id, statuses)?;
    if artworks.is_empty() {
        println!("No artworks found for {}.", artist.name);
    } else {
        for artwork in &artworks {
            print_artwork(artwork);
        }
    }
    Ok(FlowOutcome::Completed)
}

/// Resolve an artist for the add-artwork flow, creating them on the spot
/// when the name is unknown.
fn resolve_or_create_artist(
    store: &dyn CatalogStore,
    reader: &mut dyn LineReader,
) -> Result<Option<Artist>> {
    let name = match prompt_artist_name(reader)? {
        Some(name) => name,
        None => return Ok(None),
    };
    if let Some(artist) = store.find_artist(&name)? {
        return Ok(Some(artist));
    }
    println!("Artist not found, adding them to the catalog first.");
    let email = match prompt_email(reader)? {
        Some(email) => email,
        None => return Ok(None),
    };
    Ok(Some(store.add_artist(&name, &email)?))
}

/// Menu option 4: add a new artwork, resolving or creating its artist
/// first. Titles are unique across the whole catalog, so the title loop
/// re-prompts while the chosen one is taken by anybody.
pub fn add_artwork_flow(store: &dyn CatalogStore, reader: &mut dyn LineReader) -> Result<FlowOutcome> {
    let artist = match resolve_or_create_artist(store, reader)? {
        Some(artist) => artist,
        None => return Ok(FlowOutcome::Cancelled),
    };

    let title = loop {
        let candidate = match prompt_title(reader)? {
            Some(title) => title,
            None => return Ok(FlowOutcome::Cancelled),
        };
        if store.title_exists(&candidate)? {
            println!("Artwork title already in the catalog.");
            continue;
        }
        break candidate;
    };

    let price = match prompt_price(reader)? {
        Some(price) => price,
        None => return Ok(FlowOutcome::Cancelled),
    };
    let status = match prompt_status(reader)? {
        Some(status) => status,
        None => return Ok(FlowOutcome::Cancelled),
    };

    let artwork = store.add_artwork(artist.id, &title, status, price)?;
    println!("Added artwork {} (id {}).", artwork.title, artwork.id);
    Ok(FlowOutcome::Completed)
}

/// Menu option 5: delete an artwork after an explicit DELETE confirmation.
pub fn delete_artwork_flow(
    store: &dyn CatalogStore,
    reader: &mut dyn LineReader,
) -> Result<FlowOutcome> {
    let artist = match resolve_artist(store, reader)? {
        Some(artist) => artist,
        None => return Ok(FlowOutcome::Cancelled),
    };
    let artwork = match resolve_artwork(store, reader, &artist)? {
        Some(artwork) => artwork,
        None => return Ok(FlowOutcome::Cancelled),
    };

    match prompt_delete_choice(reader, &artwork.title)? {
        Some(DeleteChoice::Delete) => match store.delete_artwork(artist.id, &artwork.title) {
            Ok(()) => {
                println!("Artwork deleted.");
                Ok(FlowOutcome::Completed)
            }
            Err(CatalogError::ArtworkNotFound { .. }) => {
                println!("Artwork not found.");
                Ok(FlowOutcome::Completed)
            }
            Err(e) => Err(e.into()),
        },
        Some(DeleteChoice::Cancel) | None => Ok(FlowOutcome::Cancelled),
    }
}

/// Menu option 6: flip an artwork between AVAILABLE and SOLD after a Y/N
/// confirmation.
pub fn change_status_flow(
    store: &dyn CatalogStore,
    reader: &mut dyn LineReader,
) -> Result<FlowOutcome> {
    let artist = match resolve_artist(store, reader)? {
        Some(artist) => artist,
        None => return Ok(FlowOutcome::Cancelled),
    };
    let artwork = match resolve_artwork(store, reader, &artist)? {
        Some(artwork) => artwork,
        None => return Ok(FlowOutcome::Cancelled),
    };

    println!("Artwork is currently: {}", artwork.status);
    match prompt_confirm_change(reader)? {
        Some(true) => {
            let new_status = artwork.status.toggled();
            match store.update_artwork_status(artist.id, &artwork.title, new_status) {
                Ok(()) => {
                    println!("Status changed to: {new_status}");
                    Ok(FlowOutcome::Completed)
                }
                Err(CatalogError::ArtworkNotFound { .. }) => {
                    println!("Artwork not found.");
                    Ok(FlowOutcome::Completed)
                }
                Err(e) => Err(e.into()),
            }
        }
        Some(false) | None => Ok(FlowOutcome::Cancelled),
    }
}
