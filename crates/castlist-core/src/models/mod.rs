mod favorite;
mod load_status;

pub use favorite::FavoriteEntry;
pub use load_status::LoadStatus;
