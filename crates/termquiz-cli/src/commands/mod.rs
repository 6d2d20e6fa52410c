pub mod init;
pub mod range;
pub mod run;
pub mod shuffle;
pub mod sort;
pub mod validate;
