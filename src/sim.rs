pub mod patrol;
pub mod player;
pub mod state;
