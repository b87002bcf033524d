pub mod credential;
pub mod hasher;
pub mod reset;
pub mod session;
