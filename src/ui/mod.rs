pub mod components;
pub mod layout;
pub mod skin;
pub mod theme;
