pub mod init;
pub mod inspect;
