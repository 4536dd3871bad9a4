pub(crate) mod auth_otp;
pub(crate) mod drugs;
pub(crate) mod upload;
