pub mod dates;
pub mod html;
pub mod password;
