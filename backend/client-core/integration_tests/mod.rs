mod articles;
mod auth;
mod helpers;
mod http_client;
