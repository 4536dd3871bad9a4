pub(crate) mod auth;
pub(crate) mod drugs;
pub(crate) mod upload;
