mod bearer_token;
mod error_location;
