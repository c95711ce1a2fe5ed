pub mod canvas;
pub mod composer;
pub mod composite;
pub mod font;
pub mod layout;
pub mod text;
