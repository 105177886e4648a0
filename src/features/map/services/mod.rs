mod map_session;

pub use map_session::{LoadStatus, MapSession};
