pub mod html;
pub mod time;
pub mod validation;
