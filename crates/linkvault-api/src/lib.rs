pub mod auth;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod wallet;
pub mod wallets;

pub use error::WalletError;
pub use wallet::WalletWriter;
