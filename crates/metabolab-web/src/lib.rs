//! metabolab-web — HTTP front for the mock metabolome feed.
//! Serves:
//!   - `GET /api/data`    one fresh point plus the trailing window
//!   - `GET /api/initial` the full retained history
//!   - everything else from the built single-page app, `index.html` for unknown paths

pub mod router;
pub mod handlers;
pub mod state;
