pub mod drug;
pub mod interaction;
pub mod otp;
pub mod user;
