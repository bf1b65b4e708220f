pub mod generate;
pub mod init;
pub mod prompts;
pub mod statements;
