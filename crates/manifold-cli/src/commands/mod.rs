pub mod activate;
pub mod current;
pub mod init;
pub mod list;
pub mod upload;
