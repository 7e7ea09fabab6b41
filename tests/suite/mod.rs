mod config;
mod pipeline;
mod stars;
