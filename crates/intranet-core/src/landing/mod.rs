//! Landing page effects: the starfield backdrop, tilting tiles, the theme
//! picker and the downloadable site bundle.

mod bundle;
mod starfield;
mod theme;
mod tilt;

pub use bundle::{
    SITE_ARCHIVE_NAME, SITE_FILES, SiteFile, bundle_failed_status, bundle_ready_status,
    bundle_site,
};
pub use starfield::{AREA_PER_STAR, Star, Starfield};
pub use theme::{AppliedTheme, PRESETS, ThemeSettings};
pub use tilt::{TILT_REST, tilt_transform};
