pub mod credentials;
pub use credentials::CredentialHasher;

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService, FactorValues, NewCondition};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{NewUser, UserError, UserService, UserUpdate};
pub use user_service_impl::SeaOrmUserService;
