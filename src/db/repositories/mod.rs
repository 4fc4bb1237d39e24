mod preferences;
mod readings;
mod sessions;
mod stats;
