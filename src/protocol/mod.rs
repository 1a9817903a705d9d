pub mod command;
pub mod packet;
pub mod response;
