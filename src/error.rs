use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("tcgetattr: {0}")]
    GetAttr(#[source] nix::Error),

    #[error("tcsetattr: {0}")]
    SetAttr(#[source] nix::Error),

    #[error("read: {0}")]
    Read(#[source] io::Error),

    #[error("write: {0}")]
    Write(#[source] io::Error),
}
