mod error;
mod export;
