//! Request handlers.

mod download;
mod images;
mod set_wallpaper;
mod types;
mod wallpapers;

pub use download::download_image;
pub use images::search_images;
pub use set_wallpaper::set_wallpaper;
pub use types::{ErrorBody, error_response, handle_panic};
pub use wallpapers::search_wallpapers;
