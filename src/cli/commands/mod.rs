mod check;
mod init;
mod migrate;

pub use check::cmd_check;
pub use init::cmd_init;
pub use migrate::cmd_migrate;
