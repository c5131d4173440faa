//! Shared system font database for label rendering.

use std::sync::{Arc, LazyLock};

use resvg::usvg::fontdb;

/// Lazily-loaded system font database.
///
/// Loading system fonts is slow, so it happens once per process and the
/// database is shared by every render.
pub(crate) static FONTDB: LazyLock<Arc<fontdb::Database>> = LazyLock::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    log::debug!("Loaded {} font faces from system", db.len());
    if db.len() == 0 {
        log::warn!("No system fonts found; labels and titles will not be drawn");
    }
    Arc::new(db)
});
