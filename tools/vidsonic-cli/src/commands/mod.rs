pub mod change_points;
pub mod extract;
pub mod info;
pub mod tracks;
