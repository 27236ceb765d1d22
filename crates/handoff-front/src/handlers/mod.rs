pub mod auth_token;
pub mod health;
pub mod products;
pub mod upload_url;
