pub mod capabilities;
pub mod health;
pub mod info;
pub mod login;
pub mod roles;
pub mod scopes;
