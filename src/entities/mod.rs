pub mod prelude;

pub mod factor;
pub mod factor_hecho;
pub mod hecho;
pub mod usuario;
