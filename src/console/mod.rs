mod menu;
mod prompt;
mod workflows;

pub use menu::run_menu;
pub use prompt::{DeleteChoice, LineReader, RustylineReader, ScriptedReader};
pub use workflows::{
    add_artist_flow, add_artwork_flow, change_status_flow, delete_artwork_flow,
    list_artworks_flow, FlowOutcome, ALL_STATUSES, AVAILABLE_ONLY,
};
