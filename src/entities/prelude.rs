pub use super::factor::Entity as Factor;
pub use super::factor_hecho::Entity as FactorHecho;
pub use super::hecho::Entity as Hecho;
pub use super::usuario::Entity as Usuario;
