// icons.rs - Icon library bootstrap
//
// The page loads Lucide from a CDN. If it did not arrive the icons stay as
// bare `<i data-lucide>` tags, which is ugly but harmless.

use tracing::info;

use crate::error::{Error, Result};

pub const LUCIDE: &str = "lucide";

/// Something that turns icon placeholders into SVG.
pub trait IconLibrary {
    fn create_icons(&self) -> Result<()>;
}

/// Run the library once over the whole document.
pub fn bootstrap_icons<L: IconLibrary>(library: Option<&L>) -> Result<()> {
    let library = library.ok_or(Error::MissingLibrary(LUCIDE))?;
    library.create_icons()?;
    info!("icons created");
    Ok(())
}
